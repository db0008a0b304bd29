use crate::cpu::{Bus, Cpu, FlagRegister, Target};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, target: Target) {
        let value = match target {
            // F is re-encoded at the end of the instruction; push the live flags.
            Target::AF => u16::from_be_bytes([self.regs.a, u8::from(self.flags)]),
            other => self.regs.get_short_reg(other),
        };
        self.push_u16(bus, value);
    }

    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, target: Target) {
        let value = self.pop_u16(bus);
        self.regs.set_short_reg(target, value);
        if target == Target::AF {
            // Keep the popped F from being overwritten by the stale flags.
            self.flags = FlagRegister::from(self.regs.f);
        }
    }
}
