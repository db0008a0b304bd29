use crate::mmu::Mmu;

pub const LCDC_ADDR: u16 = 0xFF40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PpuMode {
    HBlank,
    VBlank,
    #[default]
    OamSearch,
    PixelTransfer,
}

/// LCD register window 0xFF40–0xFF4B, minus DMA at 0xFF46.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PpuRegisters {
    pub lcdc: u8,
    pub stat: u8,
    pub scy: u8,
    pub scx: u8,
    pub ly: u8,
    pub lyc: u8,
    pub bgp: u8,
    pub obp0: u8,
    pub obp1: u8,
    pub wy: u8,
    pub wx: u8,
}

/// Pixel processing unit shim.
///
/// Only the register contract exists: every step loads the LCD registers
/// from IO, runs the mode machine (which does not advance yet) and stores
/// them back unchanged.
#[derive(Clone, Debug, Default)]
pub struct Ppu {
    regs: PpuRegisters,
    mode: PpuMode,
}

impl Ppu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registers(&self) -> &PpuRegisters {
        &self.regs
    }

    pub fn mode(&self) -> PpuMode {
        self.mode
    }

    /// Advance by `cycles` T-cycles. The mode stays in OAM search.
    pub fn step(&mut self, _cycles: u32, mmu: &mut Mmu) {
        self.read_registers(mmu);
        self.write_registers(mmu);
    }

    fn read_registers(&mut self, mmu: &Mmu) {
        let r = |offset: u16| mmu.read_byte_unlocked(LCDC_ADDR + offset);
        self.regs = PpuRegisters {
            lcdc: r(0x0),
            stat: r(0x1),
            scy: r(0x2),
            scx: r(0x3),
            ly: r(0x4),
            lyc: r(0x5),
            bgp: r(0x7),
            obp0: r(0x8),
            obp1: r(0x9),
            wy: r(0xA),
            wx: r(0xB),
        };
    }

    fn write_registers(&self, mmu: &mut Mmu) {
        let regs = self.regs;
        for (offset, value) in [
            (0x0, regs.lcdc),
            (0x1, regs.stat),
            (0x2, regs.scy),
            (0x3, regs.scx),
            (0x4, regs.ly),
            (0x5, regs.lyc),
            (0x7, regs.bgp),
            (0x8, regs.obp0),
            (0x9, regs.obp1),
            (0xA, regs.wy),
            (0xB, regs.wx),
        ] {
            mmu.write_byte(LCDC_ADDR + offset, value);
        }
    }

    pub fn dump(&self) {
        let r = &self.regs;
        log::debug!("PPU LCDC=0b{:08b} STAT=0b{:08b}", r.lcdc, r.stat);
        log::debug!("PPU SCX={} SCY={} LY={} LYC={}", r.scx, r.scy, r.ly, r.lyc);
        log::debug!("PPU BGP=0x{:02X} OBP0=0x{:02X} OBP1=0x{:02X}", r.bgp, r.obp0, r.obp1);
        log::debug!("PPU WY={} WX={} mode={:?}", r.wy, r.wx, self.mode);
    }
}
