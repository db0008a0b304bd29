use super::{Bus, Cpu, FlagRegister, Registers};

/// Hardware register values left behind by the boot ROM (CGB in DMG mode).
const IO_POWER_ON: &[(u16, u8)] = &[
    (0xFF00, 0xC7), // P1
    (0xFF01, 0x00), // SB
    (0xFF02, 0x7F), // SC
    (0xFF04, 0x00), // DIV
    (0xFF05, 0x00), // TIMA
    (0xFF06, 0x00), // TMA
    (0xFF07, 0xF8), // TAC
    (0xFF0F, 0xE1), // IF
    (0xFF10, 0x80), // NR10
    (0xFF11, 0xBF), // NR11
    (0xFF12, 0xF3), // NR12
    (0xFF13, 0xFF), // NR13
    (0xFF14, 0xBF), // NR14
    (0xFF16, 0x3F), // NR21
    (0xFF17, 0x00), // NR22
    (0xFF18, 0xFF), // NR23
    (0xFF19, 0xBF), // NR24
    (0xFF1A, 0x7F), // NR30
    (0xFF1B, 0xFF), // NR31
    (0xFF1C, 0x9F), // NR32
    (0xFF1D, 0xFF), // NR33
    (0xFF1E, 0xBF), // NR34
    (0xFF20, 0xFF), // NR41
    (0xFF21, 0x00), // NR42
    (0xFF22, 0x00), // NR43
    (0xFF23, 0xBF), // NR44
    (0xFF24, 0x77), // NR50
    (0xFF25, 0xF3), // NR51
    (0xFF26, 0xF1), // NR52
    (0xFF40, 0x91), // LCDC
    (0xFF41, 0x00), // STAT
    (0xFF42, 0x00), // SCY
    (0xFF43, 0x00), // SCX
    (0xFF44, 0x00), // LY
    (0xFF45, 0x00), // LYC
    (0xFF46, 0x00), // DMA
    (0xFF47, 0xFC), // BGP
    (0xFF48, 0x00), // OBP0
    (0xFF49, 0x00), // OBP1
    (0xFF4A, 0x00), // WY
    (0xFF4B, 0x00), // WX
    (0xFF4D, 0xFF), // KEY1
    (0xFF4F, 0xFF), // VBK
    (0xFF51, 0xFF), // HDMA1
    (0xFF52, 0xFF), // HDMA2
    (0xFF53, 0xFF), // HDMA3
    (0xFF54, 0xFF), // HDMA4
    (0xFF55, 0xFF), // HDMA5
    (0xFF56, 0xFF), // RP
    (0xFF68, 0x00), // BCPS
    (0xFF69, 0x00), // BCPD
    (0xFF6A, 0x00), // OCPS
    (0xFF6B, 0x00), // OCPD
    (0xFF70, 0xFF), // SVBK
    (0xFFFF, 0x00), // IE
];

impl Cpu {
    /// Reset registers and interrupt state to all zeros.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.flags = FlagRegister::default();
        self.ime = false;
        self.halted = false;
        self.stopped = false;
        self.stop_lines = 0x0F;
        self.next_interrupt_state = None;
        self.interrupt_delay = false;
        self.accesses = 0;
    }

    /// Initialize registers and IO to the state the boot ROM hands over at
    /// 0x0100.
    ///
    /// B depends on the licensee: when the old licensee code (0x14B) is
    /// 0x01, or it is 0x33 and the new licensee code (0x144–0x145) reads
    /// "01", B is the wrapping sum of the title bytes 0x134–0x143. HL then
    /// depends on B.
    pub fn apply_boot_state<B: Bus>(&mut self, bus: &mut B) {
        self.reset();

        let old_licensee = bus.read8(0x014B);
        let new_licensee = [bus.read8(0x0144), bus.read8(0x0145)];

        let b = if old_licensee == 0x01 || (old_licensee == 0x33 && new_licensee == *b"01") {
            (0x0134..=0x0143u16).fold(0u8, |sum, addr| sum.wrapping_add(bus.read8(addr)))
        } else {
            0x00
        };

        self.regs.a = 0x11;
        self.regs.f = 0x80;
        self.regs.b = b;
        self.regs.c = 0x00;
        self.regs.d = 0x00;
        self.regs.e = 0x00;
        self.regs.set_hl(if b == 0x43 || b == 0x58 { 0x991A } else { 0x007C });
        self.regs.pc = 0x0100;
        self.regs.sp = 0xFFFE;
        self.flags = FlagRegister::from(self.regs.f);

        for &(addr, value) in IO_POWER_ON {
            bus.write8(addr, value);
        }
    }
}
