use bitflags::bitflags;

/// Registers for the Game Boy CPU (SM83).
///
/// F is stored as a raw byte here; during execution the CPU works on the
/// decoded [`FlagRegister`] and writes it back once the opcode is done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// Operand identifiers produced by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    None,
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
    Immediate,
    Bit(u8),
}

impl Target {
    /// Register selected by the three-bit field used across the opcode
    /// table: 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    ///
    /// Index 6 maps to `HL`; callers treat it as an indirection.
    pub fn from_index(index: u8) -> Target {
        match index & 0x07 {
            0 => Target::B,
            1 => Target::C,
            2 => Target::D,
            3 => Target::E,
            4 => Target::H,
            5 => Target::L,
            6 => Target::HL,
            _ => Target::A,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::None => Ok(()),
            Target::A => f.write_str("A"),
            Target::F => f.write_str("F"),
            Target::B => f.write_str("B"),
            Target::C => f.write_str("C"),
            Target::D => f.write_str("D"),
            Target::E => f.write_str("E"),
            Target::H => f.write_str("H"),
            Target::L => f.write_str("L"),
            Target::AF => f.write_str("AF"),
            Target::BC => f.write_str("BC"),
            Target::DE => f.write_str("DE"),
            Target::HL => f.write_str("HL"),
            Target::SP => f.write_str("SP"),
            Target::PC => f.write_str("PC"),
            Target::Immediate => f.write_str("n"),
            Target::Bit(bit) => write!(f, "{bit}"),
        }
    }
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        // Lower 4 bits of F are always zero.
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }

    /// Read an 8-bit register.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not an 8-bit register. The decoder never
    /// produces such a request, so hitting this is a bug.
    pub fn get_byte_reg(&self, target: Target) -> u8 {
        match target {
            Target::A => self.a,
            Target::F => self.f & 0xF0,
            Target::B => self.b,
            Target::C => self.c,
            Target::D => self.d,
            Target::E => self.e,
            Target::H => self.h,
            Target::L => self.l,
            other => panic!("{other:?} is not an 8-bit register"),
        }
    }

    /// Write an 8-bit register. Panics like [`Registers::get_byte_reg`].
    pub fn set_byte_reg(&mut self, target: Target, value: u8) {
        match target {
            Target::A => self.a = value,
            Target::F => self.f = value & 0xF0,
            Target::B => self.b = value,
            Target::C => self.c = value,
            Target::D => self.d = value,
            Target::E => self.e = value,
            Target::H => self.h = value,
            Target::L => self.l = value,
            other => panic!("{other:?} is not an 8-bit register"),
        }
    }

    /// Read a 16-bit register or register pair.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a 16-bit view.
    pub fn get_short_reg(&self, target: Target) -> u16 {
        match target {
            Target::AF => self.af(),
            Target::BC => self.bc(),
            Target::DE => self.de(),
            Target::HL => self.hl(),
            Target::SP => self.sp,
            Target::PC => self.pc,
            other => panic!("{other:?} is not a 16-bit register"),
        }
    }

    pub fn set_short_reg(&mut self, target: Target, value: u16) {
        match target {
            Target::AF => self.set_af(value),
            Target::BC => self.set_bc(value),
            Target::DE => self.set_de(value),
            Target::HL => self.set_hl(value),
            Target::SP => self.sp = value,
            Target::PC => self.pc = value,
            other => panic!("{other:?} is not a 16-bit register"),
        }
    }
}

bitflags! {
    /// Bit positions of the flags inside F. Bits 0–3 are always zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FlagBits: u8 {
        const ZERO = 1 << 7;
        const SUBTRACT = 1 << 6;
        const HALF_CARRY = 1 << 5;
        const CARRY = 1 << 4;
    }
}

/// Decoded view of F used while an opcode executes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlagRegister {
    pub zero: bool,
    pub subtract: bool,
    pub half_carry: bool,
    pub carry: bool,
}

impl From<u8> for FlagRegister {
    fn from(f: u8) -> Self {
        let bits = FlagBits::from_bits_truncate(f);
        Self {
            zero: bits.contains(FlagBits::ZERO),
            subtract: bits.contains(FlagBits::SUBTRACT),
            half_carry: bits.contains(FlagBits::HALF_CARRY),
            carry: bits.contains(FlagBits::CARRY),
        }
    }
}

impl From<FlagRegister> for u8 {
    fn from(flags: FlagRegister) -> u8 {
        let mut bits = FlagBits::empty();
        bits.set(FlagBits::ZERO, flags.zero);
        bits.set(FlagBits::SUBTRACT, flags.subtract);
        bits.set(FlagBits::HALF_CARRY, flags.half_carry);
        bits.set(FlagBits::CARRY, flags.carry);
        bits.bits()
    }
}

impl std::fmt::Display for FlagRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            mark(self.zero, 'Z'),
            mark(self.subtract, 'N'),
            mark(self.half_carry, 'H'),
            mark(self.carry, 'C')
        )
    }
}
