use crate::cpu::{Bus, Cpu, Operand, Target};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, operand: Operand) {
        self.modify_operand(bus, operand, |cpu, value| Some(cpu.alu_inc8(value)));
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, operand: Operand) {
        self.modify_operand(bus, operand, |cpu, value| Some(cpu.alu_dec8(value)));
    }

    /// 16-bit INC rr. No flags are affected.
    pub(super) fn exec_inc16(&mut self, target: Target) {
        let value = self.regs.get_short_reg(target).wrapping_add(1);
        self.regs.set_short_reg(target, value);
    }

    /// 16-bit DEC rr. No flags are affected.
    pub(super) fn exec_dec16(&mut self, target: Target) {
        let value = self.regs.get_short_reg(target).wrapping_sub(1);
        self.regs.set_short_reg(target, value);
    }
}
