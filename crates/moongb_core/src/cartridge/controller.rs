use std::fmt;

/// Cartridge bank-controller hardware, from header byte 0x147.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankController {
    None,
    NoneRam,
    NoneBatteryRam,
    Mbc1,
    Mbc1Ram,
    Mbc1BatteryRam,
    Mbc2,
    Mbc2Battery,
    Mbc3,
    Mbc3Ram,
    Mbc3BatteryRam,
    Mbc3BatteryTimer,
    Mbc3BatteryRamTimer,
    Mbc5,
    Mbc5Ram,
    Mbc5BatteryRam,
    Mbc5Rumble,
    Mbc5RumbleRam,
    Mbc5RumbleBatteryRam,
    Mbc6,
    HuC3,
    HuC1,
    /// A code this loader does not recognise. Treated as RAM-less and
    /// volatile.
    Unknown(u8),
}

impl BankController {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::None,
            0x01 => Self::Mbc1,
            0x02 => Self::Mbc1Ram,
            0x03 => Self::Mbc1BatteryRam,
            0x05 => Self::Mbc2,
            0x06 => Self::Mbc2Battery,
            0x08 => Self::NoneRam,
            0x09 => Self::NoneBatteryRam,
            0x0F => Self::Mbc3BatteryTimer,
            0x10 => Self::Mbc3BatteryRamTimer,
            0x11 => Self::Mbc3,
            0x12 => Self::Mbc3Ram,
            0x13 => Self::Mbc3BatteryRam,
            0x19 => Self::Mbc5,
            0x1A => Self::Mbc5Ram,
            0x1B => Self::Mbc5BatteryRam,
            0x1C => Self::Mbc5Rumble,
            0x1D => Self::Mbc5RumbleRam,
            0x1E => Self::Mbc5RumbleBatteryRam,
            0x20 => Self::Mbc6,
            0xFE => Self::HuC3,
            0xFF => Self::HuC1,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Mbc1 => 0x01,
            Self::Mbc1Ram => 0x02,
            Self::Mbc1BatteryRam => 0x03,
            Self::Mbc2 => 0x05,
            Self::Mbc2Battery => 0x06,
            Self::NoneRam => 0x08,
            Self::NoneBatteryRam => 0x09,
            Self::Mbc3BatteryTimer => 0x0F,
            Self::Mbc3BatteryRamTimer => 0x10,
            Self::Mbc3 => 0x11,
            Self::Mbc3Ram => 0x12,
            Self::Mbc3BatteryRam => 0x13,
            Self::Mbc5 => 0x19,
            Self::Mbc5Ram => 0x1A,
            Self::Mbc5BatteryRam => 0x1B,
            Self::Mbc5Rumble => 0x1C,
            Self::Mbc5RumbleRam => 0x1D,
            Self::Mbc5RumbleBatteryRam => 0x1E,
            Self::Mbc6 => 0x20,
            Self::HuC3 => 0xFE,
            Self::HuC1 => 0xFF,
            Self::Unknown(code) => code,
        }
    }

    /// Battery-backed: cartridge RAM must survive power-off. MBC3 with a
    /// timer and no RAM counts, though it only gets a save file when the
    /// header declares RAM.
    pub fn is_persistent(self) -> bool {
        matches!(
            self,
            Self::NoneBatteryRam
                | Self::Mbc1BatteryRam
                | Self::Mbc2Battery
                | Self::Mbc3BatteryTimer
                | Self::Mbc3BatteryRamTimer
                | Self::Mbc3BatteryRam
                | Self::Mbc5BatteryRam
                | Self::Mbc5RumbleBatteryRam
        )
    }

    /// RAM banks the controller carries on-chip, independent of the header's
    /// RAM size code. MBC2 has 512 half-bytes, exposed as one bank.
    pub fn built_in_ram_banks(self) -> usize {
        match self {
            Self::Mbc2 | Self::Mbc2Battery => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for BankController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "ROM ONLY",
            Self::NoneRam => "ROM+RAM",
            Self::NoneBatteryRam => "ROM+RAM+BATTERY",
            Self::Mbc1 => "MBC1",
            Self::Mbc1Ram => "MBC1+RAM",
            Self::Mbc1BatteryRam => "MBC1+RAM+BATTERY",
            Self::Mbc2 => "MBC2",
            Self::Mbc2Battery => "MBC2+BATTERY",
            Self::Mbc3 => "MBC3",
            Self::Mbc3Ram => "MBC3+RAM",
            Self::Mbc3BatteryRam => "MBC3+RAM+BATTERY",
            Self::Mbc3BatteryTimer => "MBC3+TIMER+BATTERY",
            Self::Mbc3BatteryRamTimer => "MBC3+TIMER+RAM+BATTERY",
            Self::Mbc5 => "MBC5",
            Self::Mbc5Ram => "MBC5+RAM",
            Self::Mbc5BatteryRam => "MBC5+RAM+BATTERY",
            Self::Mbc5Rumble => "MBC5+RUMBLE",
            Self::Mbc5RumbleRam => "MBC5+RUMBLE+RAM",
            Self::Mbc5RumbleBatteryRam => "MBC5+RUMBLE+RAM+BATTERY",
            Self::Mbc6 => "MBC6",
            Self::HuC3 => "HuC3",
            Self::HuC1 => "HuC1+RAM+BATTERY",
            Self::Unknown(code) => return write!(f, "unknown (0x{code:02X})"),
        };
        f.write_str(name)
    }
}
