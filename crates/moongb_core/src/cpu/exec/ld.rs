use crate::cpu::{Bus, Cpu, Operand, Target};

impl Cpu {
    /// 8-bit load. The source is read (and any immediate fetched) before
    /// the destination address is resolved.
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, dst: Operand, src: Operand) {
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value);
    }

    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, target: Target) {
        debug_assert!(matches!(
            target,
            Target::BC | Target::DE | Target::HL | Target::SP
        ));

        let value = self.fetch16(bus);
        self.regs.set_short_reg(target, value);
    }

    pub(super) fn exec_ld_hl_sp_offset<B: Bus>(&mut self, bus: &mut B) {
        let offset = self.fetch8(bus);
        let value = self.alu_add16_signed(self.regs.sp, offset);
        self.regs.set_hl(value);
    }

    pub(super) fn exec_store_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        self.write8(bus, addr, lo);
        self.write8(bus, addr.wrapping_add(1), hi);
    }
}
