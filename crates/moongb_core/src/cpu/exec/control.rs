use crate::cpu::{Bus, Condition, Cpu};

impl Cpu {
    /// JP nn / JP cc,nn. The address is fetched whether or not the jump
    /// is taken.
    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cond: Condition) {
        let addr = self.fetch16(bus);
        if self.condition(cond) {
            self.regs.pc = addr;
        }
    }

    /// JR n / JR cc,n. The displacement is relative to the address
    /// following the operand.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cond: Condition) {
        let offset = self.fetch8(bus) as i8;
        if self.condition(cond) {
            self.regs.pc = self.regs.pc.wrapping_add_signed(i16::from(offset));
        }
    }

    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Condition) {
        let addr = self.fetch16(bus);
        if self.condition(cond) {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
        }
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Condition) {
        if self.condition(cond) {
            self.regs.pc = self.pop_u16(bus);
        }
    }

    /// RETI enables IME immediately and drops any pending DI/EI request.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        self.next_interrupt_state = None;
        self.interrupt_delay = false;
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u16) {
        debug_assert!(vector & !0x38 == 0);

        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = vector;
    }
}
