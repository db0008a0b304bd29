use crate::cpu::{AluOp, Bus, Cpu, Operand, Target};

impl Cpu {
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: Operand) {
        let value = self.read_operand(bus, src);
        self.alu(op, src, value);
    }

    pub(super) fn exec_add_hl(&mut self, target: Target) {
        let value = self.regs.get_short_reg(target);
        self.alu_add16_hl(value);
    }

    /// ADD SP,n with a signed 8-bit immediate.
    pub(super) fn exec_add_sp_offset<B: Bus>(&mut self, bus: &mut B) {
        let offset = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, offset);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.flags.subtract = true;
        self.flags.half_carry = true;
    }

    pub(super) fn exec_scf(&mut self) {
        self.flags.subtract = false;
        self.flags.half_carry = false;
        self.flags.carry = true;
    }

    pub(super) fn exec_ccf(&mut self) {
        self.flags.subtract = false;
        self.flags.half_carry = false;
        self.flags.carry = !self.flags.carry;
    }
}
