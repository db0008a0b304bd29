use std::fmt;

use super::Target;

/// Log-only record of the last fetched instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub target1: Target,
    pub target2: Target,
    pub t1_indirect: bool,
    pub t2_indirect: bool,
    /// Address the opcode was fetched from.
    pub pc: u16,
    /// Raw opcode; CB-prefixed opcodes are stored as `0xCBxx`.
    pub opcode: u16,
    pub two_byte: bool,
    pub cycles: u32,
}

impl Default for Instruction {
    fn default() -> Self {
        Self {
            mnemonic: String::from("NOP"),
            target1: Target::None,
            target2: Target::None,
            t1_indirect: false,
            t2_indirect: false,
            pc: 0,
            opcode: 0,
            two_byte: false,
            cycles: 0,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, target: Target, indirect: bool) -> fmt::Result {
    match (target, indirect) {
        (Target::Immediate, true) => f.write_str("(nn)"),
        (t, true) => write!(f, "({t})"),
        (t, false) => write!(f, "{t}"),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.two_byte {
            write!(f, "{:04X}: {:04X} {}", self.pc, self.opcode, self.mnemonic)?;
        } else {
            write!(f, "{:04X}: {:02X}   {}", self.pc, self.opcode, self.mnemonic)?;
        }

        if self.target1 != Target::None {
            f.write_str(" ")?;
            write_operand(f, self.target1, self.t1_indirect)?;
        }
        if self.target2 != Target::None {
            f.write_str(",")?;
            write_operand(f, self.target2, self.t2_indirect)?;
        }
        write!(f, " [{} cycles]", self.cycles)
    }
}
