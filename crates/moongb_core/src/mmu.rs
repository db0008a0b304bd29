mod eram;

pub use eram::{ExternalRam, ERAM_BANK_SIZE};

use std::path::Path;

use crate::cartridge::BankController;
use crate::cpu::Bus;
use crate::error::MemoryError;

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const VRAM_BANK_SIZE: usize = 0x2000;
pub const WRAM_BANK_SIZE: usize = 0x1000;
pub const VRAM_BANKS: usize = 2;
pub const WRAM1_BANKS: usize = 7;
pub const OAM_SIZE: usize = 0xA0;
pub const IO_SIZE: usize = 0x80;
pub const HRAM_SIZE: usize = 0x7F;

/// Value seen on reads that hit nothing (locked, unmapped, bad bank).
pub const OPEN_BUS: u8 = 0xFF;

/// A contiguous block of storage and its lock state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryBank {
    data: Vec<u8>,
    locked: bool,
}

impl MemoryBank {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
            locked: false,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            locked: false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[inline]
    pub fn get(&self, offset: u16) -> u8 {
        self.data[usize::from(offset)]
    }

    #[inline]
    pub fn set(&mut self, offset: u16, value: u8) {
        self.data[usize::from(offset)] = value;
    }
}

/// Address space regions, each backed by exactly one bank class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Rom0,
    Rom1,
    Vram,
    Eram,
    Wram0,
    Wram1,
    /// Mirror of 0xC000–0xDDFF.
    Echo,
    Oam,
    /// 0xFEA0–0xFEFF. Nothing is mapped here.
    Unusable,
    Io,
    Hram,
    Ie,
}

impl Region {
    pub fn of(addr: u16) -> Region {
        match addr {
            0x0000..=0x3FFF => Region::Rom0,
            0x4000..=0x7FFF => Region::Rom1,
            0x8000..=0x9FFF => Region::Vram,
            0xA000..=0xBFFF => Region::Eram,
            0xC000..=0xCFFF => Region::Wram0,
            0xD000..=0xDFFF => Region::Wram1,
            0xE000..=0xFDFF => Region::Echo,
            0xFE00..=0xFE9F => Region::Oam,
            0xFEA0..=0xFEFF => Region::Unusable,
            0xFF00..=0xFF7F => Region::Io,
            0xFF80..=0xFFFE => Region::Hram,
            0xFFFF => Region::Ie,
        }
    }

    /// First address of the region.
    pub fn base(self) -> u16 {
        match self {
            Region::Rom0 => 0x0000,
            Region::Rom1 => 0x4000,
            Region::Vram => 0x8000,
            Region::Eram => 0xA000,
            Region::Wram0 => 0xC000,
            Region::Wram1 => 0xD000,
            Region::Echo => 0xE000,
            Region::Oam => 0xFE00,
            Region::Unusable => 0xFEA0,
            Region::Io => 0xFF00,
            Region::Hram => 0xFF80,
            Region::Ie => 0xFFFF,
        }
    }
}

/// Banked Game Boy memory map.
///
/// Construct with [`Mmu::new`], then let the cartridge loader fill ROM and
/// set up external RAM.
#[derive(Debug)]
pub struct Mmu {
    rom0: MemoryBank,
    rom1: Vec<MemoryBank>,
    vram: Vec<MemoryBank>,
    wram0: MemoryBank,
    wram1: Vec<MemoryBank>,
    oam: MemoryBank,
    io: MemoryBank,
    hram: MemoryBank,
    ie: MemoryBank,
    eram: ExternalRam,
    rom1_index: usize,
    vram_index: usize,
    wram1_index: usize,
    eram_index: usize,
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new()
    }
}

impl Mmu {
    pub fn new() -> Self {
        Self {
            rom0: MemoryBank::new(ROM_BANK_SIZE),
            rom1: Vec::new(),
            vram: vec![MemoryBank::new(VRAM_BANK_SIZE); VRAM_BANKS],
            wram0: MemoryBank::new(WRAM_BANK_SIZE),
            wram1: vec![MemoryBank::new(WRAM_BANK_SIZE); WRAM1_BANKS],
            oam: MemoryBank::new(OAM_SIZE),
            io: MemoryBank::new(IO_SIZE),
            hram: MemoryBank::new(HRAM_SIZE),
            ie: MemoryBank::new(1),
            eram: ExternalRam::None,
            rom1_index: 0,
            vram_index: 0,
            wram1_index: 0,
            eram_index: 0,
        }
    }

    /// Read a byte, honoring VRAM/OAM locks.
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.read(addr, false)
    }

    /// Read a byte as if no region were locked.
    pub fn read_byte_unlocked(&self, addr: u16) -> u8 {
        self.read(addr, true)
    }

    fn read(&self, addr: u16, ignore_lock: bool) -> u8 {
        let region = Region::of(addr);
        let offset = addr - region.base();

        let bank = match region {
            Region::Rom0 => &self.rom0,
            Region::Rom1 => match self.bank(&self.rom1, self.rom1_index, "ROM1", addr) {
                Some(bank) => bank,
                None => return OPEN_BUS,
            },
            Region::Vram => match self.bank(&self.vram, self.vram_index, "VRAM", addr) {
                Some(bank) => bank,
                None => return OPEN_BUS,
            },
            Region::Eram => {
                return match self.eram.read(self.eram_index, offset) {
                    Ok(value) => value,
                    Err(err) => {
                        self.log_degraded(&err, addr);
                        OPEN_BUS
                    }
                };
            }
            Region::Wram0 => &self.wram0,
            Region::Wram1 => match self.bank(&self.wram1, self.wram1_index, "WRAM1", addr) {
                Some(bank) => bank,
                None => return OPEN_BUS,
            },
            Region::Echo => return self.read(addr - 0x2000, ignore_lock),
            Region::Oam => &self.oam,
            Region::Unusable => {
                log::debug!("read from unusable address 0x{addr:04X}");
                return OPEN_BUS;
            }
            Region::Io => &self.io,
            Region::Hram => &self.hram,
            Region::Ie => &self.ie,
        };

        if bank.is_locked() && !ignore_lock {
            return OPEN_BUS;
        }
        bank.get(offset)
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        let region = Region::of(addr);
        let offset = addr - region.base();

        let (index, count) = match region {
            Region::Rom0 | Region::Rom1 => {
                log::debug!("rejected write 0x{value:02X} to ROM address 0x{addr:04X}");
                return;
            }
            Region::Eram => {
                if let Err(err) = self.eram.write(self.eram_index, offset, value) {
                    self.log_degraded(&err, addr);
                }
                return;
            }
            Region::Echo => return self.write_byte(addr - 0x2000, value),
            Region::Unusable => {
                log::debug!("dropped write 0x{value:02X} to unusable address 0x{addr:04X}");
                return;
            }
            Region::Vram => (self.vram_index, self.vram.len()),
            Region::Wram1 => (self.wram1_index, self.wram1.len()),
            _ => (0, 1),
        };

        if index >= count {
            let err = MemoryError::InvalidBank {
                region: if region == Region::Vram { "VRAM" } else { "WRAM1" },
                index,
                count,
            };
            self.log_degraded(&err, addr);
            return;
        }

        let bank = match region {
            Region::Vram => &mut self.vram[index],
            Region::Wram1 => &mut self.wram1[index],
            Region::Wram0 => &mut self.wram0,
            Region::Oam => &mut self.oam,
            Region::Io => &mut self.io,
            Region::Hram => &mut self.hram,
            Region::Ie => &mut self.ie,
            Region::Rom0 | Region::Rom1 | Region::Eram | Region::Echo | Region::Unusable => {
                unreachable!("handled above")
            }
        };

        if bank.is_locked() {
            return;
        }
        bank.set(offset, value);
    }

    /// Lock-ignoring, silent read for diagnostics. Unmapped addresses and
    /// bad banks read as 0x00.
    pub fn peek_byte(&self, addr: u16) -> u8 {
        let region = Region::of(addr);
        let offset = addr - region.base();
        let bank = match region {
            Region::Rom0 => Some(&self.rom0),
            Region::Rom1 => self.rom1.get(self.rom1_index),
            Region::Vram => self.vram.get(self.vram_index),
            Region::Eram => return self.eram.read(self.eram_index, offset).unwrap_or(0x00),
            Region::Wram0 => Some(&self.wram0),
            Region::Wram1 => self.wram1.get(self.wram1_index),
            Region::Echo => return self.peek_byte(addr - 0x2000),
            Region::Oam => Some(&self.oam),
            Region::Unusable => None,
            Region::Io => Some(&self.io),
            Region::Hram => Some(&self.hram),
            Region::Ie => Some(&self.ie),
        };
        bank.map_or(0x00, |bank| bank.get(offset))
    }

    fn bank<'a>(
        &self,
        banks: &'a [MemoryBank],
        index: usize,
        region: &'static str,
        addr: u16,
    ) -> Option<&'a MemoryBank> {
        let bank = banks.get(index);
        if bank.is_none() {
            let err = MemoryError::InvalidBank {
                region,
                index,
                count: banks.len(),
            };
            self.log_degraded(&err, addr);
        }
        bank
    }

    fn log_degraded(&self, err: &MemoryError, addr: u16) {
        match err {
            MemoryError::SaveIo { .. } => log::warn!(
                "{err} at 0x{addr:04X} ({})",
                self.eram
                    .save_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
            _ => log::debug!(
                "{err} at 0x{addr:04X} (rom1={} vram={} wram1={} eram={})",
                self.rom1_index,
                self.vram_index,
                self.wram1_index,
                self.eram_index,
            ),
        }
    }

    /// Copy the fixed 16 KiB bank.
    pub fn load_rom0(&mut self, data: &[u8; ROM_BANK_SIZE]) {
        self.rom0 = MemoryBank::from_bytes(data);
    }

    /// Replace the switchable ROM banks with `bank_count` banks copied from
    /// `data`. Banks past the end of `data` are zero-filled.
    pub fn load_rom1(&mut self, data: &[u8], bank_count: usize) {
        self.rom1 = (0..bank_count)
            .map(|n| {
                let mut bank = MemoryBank::new(ROM_BANK_SIZE);
                let start = (n * ROM_BANK_SIZE).min(data.len());
                let end = (start + ROM_BANK_SIZE).min(data.len());
                bank.data[..end - start].copy_from_slice(&data[start..end]);
                bank
            })
            .collect();
    }

    pub fn rom1_bank_count(&self) -> usize {
        self.rom1.len()
    }

    /// Set up cartridge RAM.
    ///
    /// Battery-backed RAM is stored in the file at `save_path`, created or
    /// resized to `bank_count * 0x2000` bytes. Errors here are load-fatal.
    pub fn set_eram(
        &mut self,
        bank_count: usize,
        persistent: bool,
        save_path: Option<&Path>,
        controller: BankController,
    ) -> Result<(), MemoryError> {
        self.eram = if persistent && bank_count > 0 {
            let path = save_path.ok_or(MemoryError::MissingSavePath)?;
            ExternalRam::persistent(path, bank_count)?
        } else {
            ExternalRam::volatile(bank_count)
        };
        self.eram_index = 0;

        log::info!(
            "external RAM: {} bank(s), {} ({controller})",
            bank_count,
            if self.eram.is_persistent() { "persistent" } else { "volatile" },
        );
        Ok(())
    }

    pub fn eram(&self) -> &ExternalRam {
        &self.eram
    }

    pub fn flush_eram(&mut self) -> Result<(), MemoryError> {
        self.eram.flush()
    }

    pub fn set_rom1_index(&mut self, index: usize) {
        self.rom1_index = index;
    }

    pub fn set_vram_index(&mut self, index: usize) {
        self.vram_index = index;
    }

    pub fn set_wram1_index(&mut self, index: usize) {
        self.wram1_index = index;
    }

    pub fn set_eram_index(&mut self, index: usize) {
        self.eram_index = index;
    }

    pub fn set_vram_lock(&mut self, locked: bool) {
        for bank in &mut self.vram {
            bank.set_locked(locked);
        }
    }

    pub fn set_oam_lock(&mut self, locked: bool) {
        self.oam.set_locked(locked);
    }

    /// Log the whole address space as 32-byte rows.
    pub fn dump(&self) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        for row in (0x0000..=0xFFFFu32).step_by(32) {
            let bytes: Vec<String> = (row..row + 32)
                .map(|addr| format!("{:02X}", self.peek_byte(addr as u16)))
                .collect();
            log::trace!("{row:04X}: {}", bytes.join(" "));
        }
    }
}

impl Bus for Mmu {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write_byte(addr, value);
    }
}
