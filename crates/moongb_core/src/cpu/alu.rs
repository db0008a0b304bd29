use crate::config::CarrySource;
use crate::util;

use super::{AluOp, Cpu, Operand};

/// How H and C are derived for one 8-bit ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlagOrder {
    /// From A and the operand, carry-in counted separately.
    Operands,
    /// From A and `operand + carry`, wrapped to 8 bits. Legacy immediate forms.
    FoldedOperand,
    /// From the updated A and `operand + carry`. Legacy register forms.
    PostResult,
}

impl Cpu {
    fn flag_order(&self, src: Operand) -> FlagOrder {
        match self.quirks.carry_source {
            CarrySource::Operands => FlagOrder::Operands,
            CarrySource::PostResult if src == Operand::Immediate => FlagOrder::FoldedOperand,
            CarrySource::PostResult => FlagOrder::PostResult,
        }
    }

    /// Apply an 8-bit ALU operation to A. `src` is where `value` came from.
    pub(super) fn alu(&mut self, op: AluOp, src: Operand, value: u8) {
        let order = self.flag_order(src);
        match op {
            AluOp::Add => self.alu_add(value, false, order),
            AluOp::Adc => self.alu_add(value, true, order),
            AluOp::Sub => self.regs.a = self.alu_sub(value, false, order),
            AluOp::Sbc => self.regs.a = self.alu_sub(value, true, order),
            AluOp::And => self.alu_logic(self.regs.a & value, true),
            AluOp::Xor => self.alu_logic(self.regs.a ^ value, false),
            AluOp::Or => self.alu_logic(self.regs.a | value, false),
            // CP discards the difference.
            AluOp::Cp => {
                self.alu_sub(value, false, order);
            }
        }
    }

    fn alu_add(&mut self, value: u8, use_carry: bool, order: FlagOrder) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.flags.carry);

        let full = u16::from(a) + u16::from(value) + u16::from(carry_in);
        let result = full as u8;
        self.regs.a = result;

        self.flags.zero = result == 0;
        self.flags.subtract = false;
        let operand = value.wrapping_add(carry_in);
        match order {
            FlagOrder::Operands => {
                self.flags.half_carry = (a & 0x0F) + (value & 0x0F) + carry_in > 0x0F;
                self.flags.carry = full > 0xFF;
            }
            FlagOrder::FoldedOperand => {
                self.flags.half_carry = util::half_carry_add(a, operand);
                self.flags.carry = util::overflow_add8(a, operand);
            }
            FlagOrder::PostResult => {
                self.flags.half_carry = util::half_carry_add(result, operand);
                self.flags.carry = util::overflow_add8(result, operand);
            }
        }
    }

    /// SUB/SBC/CP core. Returns the difference; A is left untouched.
    fn alu_sub(&mut self, value: u8, use_carry: bool, order: FlagOrder) -> u8 {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.flags.carry);

        let full = i16::from(a) - i16::from(value) - i16::from(carry_in);
        let result = full as u8;

        self.flags.zero = result == 0;
        self.flags.subtract = true;
        let operand = value.wrapping_add(carry_in);
        match order {
            FlagOrder::Operands => {
                self.flags.half_carry =
                    i16::from(a & 0x0F) - i16::from(value & 0x0F) - i16::from(carry_in) < 0;
                self.flags.carry = full < 0;
            }
            FlagOrder::FoldedOperand => {
                self.flags.half_carry = util::half_borrow_sub(a, operand);
                self.flags.carry = util::underflow_sub8(a, operand);
            }
            FlagOrder::PostResult => {
                self.flags.half_carry = util::half_borrow_sub(result, operand);
                self.flags.carry = util::underflow_sub8(result, operand);
            }
        }
        result
    }

    fn alu_logic(&mut self, result: u8, half_carry: bool) {
        self.regs.a = result;
        self.flags.zero = result == 0;
        self.flags.subtract = self.quirks.logic_sets_subtract;
        self.flags.half_carry = half_carry;
        self.flags.carry = false;
    }

    /// INC r / INC (HL). Carry is unchanged.
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.flags.zero = result == 0;
        self.flags.subtract = false;
        self.flags.half_carry = match self.quirks.carry_source {
            CarrySource::Operands => util::half_carry_add(value, 1),
            CarrySource::PostResult => util::half_carry_add(result, 1),
        };
        result
    }

    /// DEC r / DEC (HL). Carry is unchanged.
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.flags.zero = result == 0;
        self.flags.subtract = true;
        self.flags.half_carry = match self.quirks.carry_source {
            CarrySource::Operands => util::half_borrow_sub(value, 1),
            CarrySource::PostResult => util::half_borrow_sub(result, 1),
        };
        result
    }

    /// ADD HL,rr: Z unchanged, N cleared, H from bit 11, C from bit 15.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);
        self.regs.set_hl(result);

        self.flags.subtract = false;
        self.flags.half_carry = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
        self.flags.carry = util::overflow_add16(hl, value);
    }

    /// SP plus a signed immediate, shared by ADD SP,n and LD HL,SP+n.
    ///
    /// Z and N are cleared; H and C come from the unsigned low-byte add.
    pub(super) fn alu_add16_signed(&mut self, base: u16, offset: u8) -> u16 {
        let signed = i16::from(util::u8_to_i8(offset));
        let result = base.wrapping_add(util::i16_to_u16(signed));

        self.flags.zero = false;
        self.flags.subtract = false;
        self.flags.half_carry = util::half_carry_add(base as u8, offset);
        self.flags.carry = util::overflow_add8(base as u8, offset);
        result
    }

    /// Decimal adjust A after a BCD add or subtract. N is unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.flags.carry { 0x60 } else { 0x00 };
        if self.flags.half_carry {
            adjust |= 0x06;
        }

        if !self.flags.subtract {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.flags.carry = adjust >= 0x60;
        self.flags.half_carry = false;
        self.flags.zero = a == 0;
        self.regs.a = a;
    }
}
