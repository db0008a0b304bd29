use crate::cpu::{Bus, Cpu, P1_ADDR};

impl Cpu {
    /// STOP is only valid when followed by a literal 0 byte. Anything else
    /// is treated as an unknown opcode and the peeked byte is left for the
    /// next fetch. The P1 lines are sampled on entry so that only a new
    /// key press ends the stop.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        let pc = self.regs.pc;
        let next = self.read8(bus, pc);
        if next == 0x00 {
            self.regs.pc = pc.wrapping_add(1);
            self.stopped = true;
            self.stop_lines = bus.read8(P1_ADDR) & 0x0F;
            log::debug!("STOP at 0x{:04X}", pc.wrapping_sub(1));
        } else {
            log::debug!(
                "unknown opcode 0x10 0x{next:02X} at 0x{:04X}",
                pc.wrapping_sub(1)
            );
        }
    }

    /// DI/EI: request an IME change that lands after the next instruction.
    /// A new request replaces one still in flight.
    pub(super) fn schedule_ime(&mut self, enabled: bool) {
        self.next_interrupt_state = Some(enabled);
        self.interrupt_delay = false;
    }
}
