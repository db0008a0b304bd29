use super::{Bus, Condition, Cpu, Operand};

impl Cpu {
    /// Counted bus read. Each call adds 4 cycles to the current instruction.
    #[inline]
    pub(super) fn read8<B: Bus>(&mut self, bus: &mut B, addr: u16) -> u8 {
        self.accesses += 1;
        bus.read8(addr)
    }

    /// Counted bus write.
    #[inline]
    pub(super) fn write8<B: Bus>(&mut self, bus: &mut B, addr: u16, value: u8) {
        self.accesses += 1;
        bus.write8(addr, value);
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.read8(bus, self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // Stack grows downward: memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write8(bus, self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write8(bus, self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.read8(bus, self.regs.sp);
        let hi = self.read8(bus, self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// Read an 8-bit operand, performing whatever fetches and memory
    /// accesses its addressing mode needs.
    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(target) => self.regs.get_byte_reg(target),
            Operand::Indirect(target) => {
                let addr = self.regs.get_short_reg(target);
                self.read8(bus, addr)
            }
            Operand::IndirectInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                self.read8(bus, hl)
            }
            Operand::IndirectDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                self.read8(bus, hl)
            }
            Operand::Immediate => self.fetch8(bus),
            Operand::Absolute => {
                let addr = self.fetch16(bus);
                self.read8(bus, addr)
            }
            Operand::HighImmediate => {
                let offset = self.fetch8(bus);
                self.read8(bus, 0xFF00 | u16::from(offset))
            }
            Operand::HighC => self.read8(bus, 0xFF00 | u16::from(self.regs.c)),
        }
    }

    /// Store to an 8-bit operand.
    ///
    /// # Panics
    ///
    /// Panics when asked to store to an immediate, which the decoder never
    /// produces.
    pub(super) fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        match operand {
            Operand::Reg(target) => self.regs.set_byte_reg(target, value),
            Operand::Indirect(target) => {
                let addr = self.regs.get_short_reg(target);
                self.write8(bus, addr, value);
            }
            Operand::IndirectInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                self.write8(bus, hl, value);
            }
            Operand::IndirectDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                self.write8(bus, hl, value);
            }
            Operand::Absolute => {
                let addr = self.fetch16(bus);
                self.write8(bus, addr, value);
            }
            Operand::HighImmediate => {
                let offset = self.fetch8(bus);
                self.write8(bus, 0xFF00 | u16::from(offset), value);
            }
            Operand::HighC => self.write8(bus, 0xFF00 | u16::from(self.regs.c), value),
            Operand::Immediate => panic!("cannot store to an immediate operand"),
        }
    }

    /// Read-modify-write on a register or `(HL)`. Returning `None` from `f`
    /// skips the write-back.
    pub(super) fn modify_operand<B: Bus>(
        &mut self,
        bus: &mut B,
        operand: Operand,
        f: impl FnOnce(&mut Self, u8) -> Option<u8>,
    ) {
        match operand {
            Operand::Reg(target) => {
                let value = self.regs.get_byte_reg(target);
                if let Some(result) = f(self, value) {
                    self.regs.set_byte_reg(target, result);
                }
            }
            Operand::Indirect(target) => {
                let addr = self.regs.get_short_reg(target);
                let value = self.read8(bus, addr);
                if let Some(result) = f(self, value) {
                    self.write8(bus, addr, result);
                }
            }
            other => panic!("{other:?} cannot be modified in place"),
        }
    }

    #[inline]
    pub(super) fn condition(&self, cond: Condition) -> bool {
        match cond {
            Condition::Always => true,
            Condition::NotZero => !self.flags.zero,
            Condition::Zero => self.flags.zero,
            Condition::NotCarry => !self.flags.carry,
            Condition::Carry => self.flags.carry,
        }
    }
}
