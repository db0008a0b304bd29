//! Opcode decoding.
//!
//! `Op::decode` and `CbOp::decode` are pure: they look only at the opcode
//! byte and return a descriptor that `Cpu::exec_op` pattern-matches on.

use super::Target;

/// Where an 8-bit operand lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// An 8-bit register (A, B, C, D, E, H or L).
    Reg(Target),
    /// Memory addressed by BC, DE or HL.
    Indirect(Target),
    /// `(HL+)`: memory at HL, then HL is incremented.
    IndirectInc,
    /// `(HL-)`: memory at HL, then HL is decremented.
    IndirectDec,
    /// The byte following the opcode.
    Immediate,
    /// `(nn)`: memory at the 16-bit address following the opcode.
    Absolute,
    /// `(FF00+n)`.
    HighImmediate,
    /// `(FF00+C)`.
    HighC,
}

impl Operand {
    /// Operand selected by the three-bit register field; 6 is `(HL)`.
    pub fn from_index(index: u8) -> Operand {
        match Target::from_index(index) {
            Target::HL => Operand::Indirect(Target::HL),
            reg => Operand::Reg(reg),
        }
    }

    pub(super) fn target(self) -> Target {
        match self {
            Operand::Reg(t) | Operand::Indirect(t) => t,
            Operand::IndirectInc | Operand::IndirectDec => Target::HL,
            Operand::HighC => Target::C,
            Operand::Immediate | Operand::Absolute | Operand::HighImmediate => Target::Immediate,
        }
    }

    pub(super) fn is_indirect(self) -> bool {
        !matches!(self, Operand::Reg(_) | Operand::Immediate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    fn from_index(index: u8) -> AluOp {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Adc => "ADC",
            AluOp::Sub => "SUB",
            AluOp::Sbc => "SBC",
            AluOp::And => "AND",
            AluOp::Xor => "XOR",
            AluOp::Or => "OR",
            AluOp::Cp => "CP",
        }
    }
}

/// Rotate and shift family shared by the accumulator shorthands and the
/// CB table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl Shift {
    fn from_index(index: u8) -> Shift {
        match index & 0x07 {
            0 => Shift::Rlc,
            1 => Shift::Rrc,
            2 => Shift::Rl,
            3 => Shift::Rr,
            4 => Shift::Sla,
            5 => Shift::Sra,
            6 => Shift::Swap,
            _ => Shift::Srl,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Shift::Rlc => "RLC",
            Shift::Rrc => "RRC",
            Shift::Rl => "RL",
            Shift::Rr => "RR",
            Shift::Sla => "SLA",
            Shift::Sra => "SRA",
            Shift::Swap => "SWAP",
            Shift::Srl => "SRL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Always,
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    fn from_index(index: u8) -> Condition {
        match index & 0x03 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NotCarry,
            _ => Condition::Carry,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Condition::Always => "",
            Condition::NotZero => " NZ",
            Condition::Zero => " Z",
            Condition::NotCarry => " NC",
            Condition::Carry => " C",
        }
    }
}

/// A decoded base opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    /// Every 8-bit load, including the LDH/LDI/LDD forms.
    Ld { dst: Operand, src: Operand },
    /// `LD rr,nn`.
    LdImm16(Target),
    LdSpHl,
    /// `LD HL,SP+n`.
    LdHlSpOffset,
    /// `LD (nn),SP`.
    StoreSp,
    Inc(Operand),
    Dec(Operand),
    Inc16(Target),
    Dec16(Target),
    Alu { op: AluOp, src: Operand },
    AddHl(Target),
    /// `ADD SP,n`.
    AddSpOffset,
    Push(Target),
    Pop(Target),
    Daa,
    Cpl,
    Ccf,
    Scf,
    Halt,
    Stop,
    Di,
    Ei,
    Jp(Condition),
    JpHl,
    Jr(Condition),
    Call(Condition),
    Ret(Condition),
    Reti,
    Rst(u16),
    /// `RLCA`, `RRCA`, `RLA`, `RRA`.
    RotateA(Shift),
    /// The `0xCB` prefix; the second byte is decoded with [`CbOp::decode`].
    Prefix,
    Unknown(u8),
}

fn pair_sp(index: u8) -> Target {
    match index & 0x03 {
        0 => Target::BC,
        1 => Target::DE,
        2 => Target::HL,
        _ => Target::SP,
    }
}

fn pair_af(index: u8) -> Target {
    match index & 0x03 {
        0 => Target::BC,
        1 => Target::DE,
        2 => Target::HL,
        _ => Target::AF,
    }
}

impl Op {
    pub fn decode(opcode: u8) -> Op {
        use Operand::*;

        let y = (opcode >> 3) & 0x07;
        let z = opcode & 0x07;
        let p = (opcode >> 4) & 0x03;

        match opcode {
            // Register-to-register group. 0x76 sits in the middle of it.
            0x76 => Op::Halt,
            0x40..=0x7F => Op::Ld {
                dst: Operand::from_index(y),
                src: Operand::from_index(z),
            },

            // ALU on A with a register or (HL).
            0x80..=0xBF => Op::Alu {
                op: AluOp::from_index(y),
                src: Operand::from_index(z),
            },

            0xCB => Op::Prefix,

            0x00 => Op::Nop,
            0x10 => Op::Stop,
            0x08 => Op::StoreSp,

            0x01 | 0x11 | 0x21 | 0x31 => Op::LdImm16(pair_sp(p)),
            0x09 | 0x19 | 0x29 | 0x39 => Op::AddHl(pair_sp(p)),
            0x03 | 0x13 | 0x23 | 0x33 => Op::Inc16(pair_sp(p)),
            0x0B | 0x1B | 0x2B | 0x3B => Op::Dec16(pair_sp(p)),

            0x02 => Op::Ld { dst: Indirect(Target::BC), src: Reg(Target::A) },
            0x12 => Op::Ld { dst: Indirect(Target::DE), src: Reg(Target::A) },
            0x22 => Op::Ld { dst: IndirectInc, src: Reg(Target::A) },
            0x32 => Op::Ld { dst: IndirectDec, src: Reg(Target::A) },
            0x0A => Op::Ld { dst: Reg(Target::A), src: Indirect(Target::BC) },
            0x1A => Op::Ld { dst: Reg(Target::A), src: Indirect(Target::DE) },
            0x2A => Op::Ld { dst: Reg(Target::A), src: IndirectInc },
            0x3A => Op::Ld { dst: Reg(Target::A), src: IndirectDec },

            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
                Op::Inc(Operand::from_index(y))
            }
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
                Op::Dec(Operand::from_index(y))
            }
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => Op::Ld {
                dst: Operand::from_index(y),
                src: Immediate,
            },

            0x07 => Op::RotateA(Shift::Rlc),
            0x0F => Op::RotateA(Shift::Rrc),
            0x17 => Op::RotateA(Shift::Rl),
            0x1F => Op::RotateA(Shift::Rr),
            0x27 => Op::Daa,
            0x2F => Op::Cpl,
            0x37 => Op::Scf,
            0x3F => Op::Ccf,

            0x18 => Op::Jr(Condition::Always),
            0x20 | 0x28 | 0x30 | 0x38 => Op::Jr(Condition::from_index(y)),

            0xC0 | 0xC8 | 0xD0 | 0xD8 => Op::Ret(Condition::from_index(y)),
            0xC9 => Op::Ret(Condition::Always),
            0xD9 => Op::Reti,
            0xC2 | 0xCA | 0xD2 | 0xDA => Op::Jp(Condition::from_index(y)),
            0xC3 => Op::Jp(Condition::Always),
            0xE9 => Op::JpHl,
            0xC4 | 0xCC | 0xD4 | 0xDC => Op::Call(Condition::from_index(y)),
            0xCD => Op::Call(Condition::Always),
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
                Op::Rst(u16::from(opcode & 0x38))
            }

            0xC1 | 0xD1 | 0xE1 | 0xF1 => Op::Pop(pair_af(p)),
            0xC5 | 0xD5 | 0xE5 | 0xF5 => Op::Push(pair_af(p)),

            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => Op::Alu {
                op: AluOp::from_index(y),
                src: Immediate,
            },

            0xE0 => Op::Ld { dst: HighImmediate, src: Reg(Target::A) },
            0xF0 => Op::Ld { dst: Reg(Target::A), src: HighImmediate },
            0xE2 => Op::Ld { dst: HighC, src: Reg(Target::A) },
            0xF2 => Op::Ld { dst: Reg(Target::A), src: HighC },
            0xEA => Op::Ld { dst: Absolute, src: Reg(Target::A) },
            0xFA => Op::Ld { dst: Reg(Target::A), src: Absolute },

            0xE8 => Op::AddSpOffset,
            0xF8 => Op::LdHlSpOffset,
            0xF9 => Op::LdSpHl,

            0xF3 => Op::Di,
            0xFB => Op::Ei,

            // 0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD
            _ => Op::Unknown(opcode),
        }
    }

    /// Mnemonic and operands for the instruction log.
    pub(super) fn describe(self) -> (String, Target, Operand, Target, Operand) {
        let reg = |t| (t, Operand::Reg(t));
        let op = |o: Operand| (o.target(), o);

        let (mnemonic, (t1, o1), (t2, o2)) = match self {
            Op::Nop => ("NOP".into(), reg(Target::None), reg(Target::None)),
            Op::Ld { dst, src } => {
                let mnemonic = match (dst, src) {
                    (Operand::HighImmediate | Operand::HighC, _)
                    | (_, Operand::HighImmediate | Operand::HighC) => "LDH",
                    (Operand::IndirectInc, _) | (_, Operand::IndirectInc) => "LDI",
                    (Operand::IndirectDec, _) | (_, Operand::IndirectDec) => "LDD",
                    _ => "LD",
                };
                (mnemonic.into(), op(dst), op(src))
            }
            Op::LdImm16(t) => ("LD".into(), reg(t), reg(Target::Immediate)),
            Op::LdSpHl => ("LD".into(), reg(Target::SP), reg(Target::HL)),
            Op::LdHlSpOffset => ("LD".into(), reg(Target::HL), reg(Target::SP)),
            Op::StoreSp => ("LD".into(), op(Operand::Absolute), reg(Target::SP)),
            Op::Inc(o) => ("INC".into(), op(o), reg(Target::None)),
            Op::Dec(o) => ("DEC".into(), op(o), reg(Target::None)),
            Op::Inc16(t) => ("INC".into(), reg(t), reg(Target::None)),
            Op::Dec16(t) => ("DEC".into(), reg(t), reg(Target::None)),
            Op::Alu { op: alu, src } => (alu.mnemonic().into(), reg(Target::A), op(src)),
            Op::AddHl(t) => ("ADD".into(), reg(Target::HL), reg(t)),
            Op::AddSpOffset => ("ADD".into(), reg(Target::SP), reg(Target::Immediate)),
            Op::Push(t) => ("PUSH".into(), reg(t), reg(Target::None)),
            Op::Pop(t) => ("POP".into(), reg(t), reg(Target::None)),
            Op::Daa => ("DAA".into(), reg(Target::None), reg(Target::None)),
            Op::Cpl => ("CPL".into(), reg(Target::None), reg(Target::None)),
            Op::Ccf => ("CCF".into(), reg(Target::None), reg(Target::None)),
            Op::Scf => ("SCF".into(), reg(Target::None), reg(Target::None)),
            Op::Halt => ("HALT".into(), reg(Target::None), reg(Target::None)),
            Op::Stop => ("STOP".into(), reg(Target::None), reg(Target::None)),
            Op::Di => ("DI".into(), reg(Target::None), reg(Target::None)),
            Op::Ei => ("EI".into(), reg(Target::None), reg(Target::None)),
            Op::Jp(cc) => (format!("JP{}", cc.suffix()), reg(Target::Immediate), reg(Target::None)),
            Op::JpHl => ("JP".into(), reg(Target::HL), reg(Target::None)),
            Op::Jr(cc) => (format!("JR{}", cc.suffix()), reg(Target::Immediate), reg(Target::None)),
            Op::Call(cc) => (
                format!("CALL{}", cc.suffix()),
                reg(Target::Immediate),
                reg(Target::None),
            ),
            Op::Ret(cc) => (format!("RET{}", cc.suffix()), reg(Target::None), reg(Target::None)),
            Op::Reti => ("RETI".into(), reg(Target::None), reg(Target::None)),
            Op::Rst(vector) => (format!("RST {vector:02X}H"), reg(Target::None), reg(Target::None)),
            Op::RotateA(shift) => (
                format!("{}A", shift.mnemonic()),
                reg(Target::None),
                reg(Target::None),
            ),
            Op::Prefix => ("PREFIX CB".into(), reg(Target::None), reg(Target::None)),
            Op::Unknown(_) => ("UNKNOWN".into(), reg(Target::None), reg(Target::None)),
        };
        (mnemonic, t1, o1, t2, o2)
    }
}

/// A decoded `0xCB`-prefixed opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CbOp {
    Shift { kind: Shift, operand: Operand },
    Bit { bit: u8, operand: Operand },
    Res { bit: u8, operand: Operand },
    Set { bit: u8, operand: Operand },
}

impl CbOp {
    pub fn decode(opcode: u8) -> CbOp {
        let y = (opcode >> 3) & 0x07;
        let operand = Operand::from_index(opcode & 0x07);

        match opcode >> 6 {
            0 => CbOp::Shift {
                kind: Shift::from_index(y),
                operand,
            },
            1 => CbOp::Bit { bit: y, operand },
            2 => CbOp::Res { bit: y, operand },
            _ => CbOp::Set { bit: y, operand },
        }
    }

    pub fn operand(self) -> Operand {
        match self {
            CbOp::Shift { operand, .. }
            | CbOp::Bit { operand, .. }
            | CbOp::Res { operand, .. }
            | CbOp::Set { operand, .. } => operand,
        }
    }

    pub(super) fn describe(self) -> (String, Target, Target) {
        let target = self.operand().target();
        match self {
            CbOp::Shift { kind, .. } => (kind.mnemonic().into(), target, Target::None),
            CbOp::Bit { bit, .. } => ("BIT".into(), Target::Bit(bit), target),
            CbOp::Res { bit, .. } => ("RES".into(), Target::Bit(bit), target),
            CbOp::Set { bit, .. } => ("SET".into(), Target::Bit(bit), target),
        }
    }
}
