use super::{Bus, CbOp, Cpu, Shift};

impl Cpu {
    /// Execute a `0xCB`-prefixed opcode. The prefix byte has already been
    /// fetched.
    ///
    /// Register forms cost 8 cycles, `BIT b,(HL)` 12 and the other `(HL)`
    /// forms 16, all from the counted read and write of the operand.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B, op: CbOp) {
        let operand = op.operand();
        self.modify_operand(bus, operand, |cpu, value| match op {
            CbOp::Shift { kind, .. } => Some(cpu.shift(kind, value, true)),
            CbOp::Bit { bit, .. } => {
                cpu.flags.zero = value & (1 << bit) == 0;
                cpu.flags.subtract = false;
                cpu.flags.half_carry = true;
                None
            }
            CbOp::Res { bit, .. } => Some(value & !(1 << bit)),
            CbOp::Set { bit, .. } => Some(value | (1 << bit)),
        });
    }

    /// Rotate/shift `value` and update flags.
    ///
    /// `set_zero` is false for the accumulator shorthands (RLCA, RRCA, RLA,
    /// RRA), which always clear Z.
    pub(super) fn shift(&mut self, kind: Shift, value: u8, set_zero: bool) -> u8 {
        let carry_in = u8::from(self.flags.carry);
        let (result, carry) = match kind {
            Shift::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            Shift::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            Shift::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
            Shift::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            Shift::Sla => (value << 1, value & 0x80 != 0),
            Shift::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Shift::Swap => (value.rotate_left(4), false),
            Shift::Srl => (value >> 1, value & 0x01 != 0),
        };

        self.flags.zero = set_zero && result == 0;
        self.flags.subtract = false;
        self.flags.half_carry = false;
        self.flags.carry = carry;
        result
    }
}
