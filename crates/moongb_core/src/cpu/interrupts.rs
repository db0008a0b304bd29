use bitflags::bitflags;

use super::{Bus, Cpu};

pub const IF_ADDR: u16 = 0xFF0F;
pub const IE_ADDR: u16 = 0xFFFF;

bitflags! {
    /// Interrupt lines in IE/IF, lowest bit has the highest priority.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const LCD = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl Cpu {
    fn pending_interrupts<B: Bus>(bus: &mut B) -> InterruptFlags {
        let ie = InterruptFlags::from_bits_truncate(bus.read8(IE_ADDR));
        let iflags = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
        ie & iflags
    }

    /// True when an enabled interrupt is requested, regardless of IME.
    pub(super) fn interrupt_pending<B: Bus>(&self, bus: &mut B) -> bool {
        !Self::pending_interrupts(bus).is_empty()
    }

    /// Service the highest-priority pending interrupt if IME is set.
    ///
    /// Returns `Some(20)` when an interrupt was taken. The entry pushes PC,
    /// clears the IF bit, clears IME and wakes the CPU from HALT.
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.ime {
            return None;
        }
        let pending = Self::pending_interrupts(bus);
        if pending.is_empty() {
            return None;
        }

        let index = pending.bits().trailing_zeros() as u16;
        let vector = 0x0040 + index * 8;

        self.ime = false;
        self.halted = false;

        let iflags = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, iflags & !(1 << index));

        let [lo, hi] = self.regs.pc.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);

        log::debug!(
            "interrupt: idx={} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            index,
            vector,
            self.regs.pc,
            self.regs.sp,
        );
        self.regs.pc = vector;

        Some(20)
    }

    /// Apply the IME change requested by DI/EI.
    ///
    /// Runs after every executed instruction: the first call (right after
    /// DI/EI) arms the change, the second applies it.
    pub(super) fn apply_ime_delay(&mut self) {
        let Some(state) = self.next_interrupt_state else {
            return;
        };
        if self.interrupt_delay {
            self.ime = state;
            self.next_interrupt_state = None;
            self.interrupt_delay = false;
        } else {
            self.interrupt_delay = true;
        }
    }
}
