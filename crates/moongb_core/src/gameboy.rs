use std::path::Path;

use crate::cartridge::Cartridge;
use crate::config::CoreConfig;
use crate::cpu::Cpu;
use crate::error::{CartridgeError, MemoryError};
use crate::mmu::Mmu;
use crate::ppu::Ppu;

/// A running session: one cartridge loaded into one memory map, driven by
/// one CPU.
#[derive(Debug)]
pub struct GameBoy {
    pub cpu: Cpu,
    pub mmu: Mmu,
    pub ppu: Ppu,
    cartridge: Cartridge,
    config: CoreConfig,
    cycle: u32,
}

impl GameBoy {
    /// Validate and load the ROM at `rom_path`, then bring the CPU up.
    ///
    /// Any cartridge or save-file failure is returned before a single
    /// instruction runs.
    pub fn new(rom_path: impl AsRef<Path>, config: CoreConfig) -> Result<Self, CartridgeError> {
        let rom_path = rom_path.as_ref();
        log::debug!("loading ROM from '{}'", rom_path.display());

        let cartridge = Cartridge::init(rom_path)?;
        let mut mmu = Mmu::new();
        cartridge.load(&mut mmu)?;

        let mut cpu = Cpu::new(config.flags);
        if config.emulate_boot_state {
            cpu.apply_boot_state(&mut mmu);
        } else {
            cpu.regs.pc = 0x0100;
            cpu.regs.sp = 0xFFFE;
        }

        log::info!("loaded '{}'", cartridge.game_title());

        Ok(Self {
            cpu,
            mmu,
            ppu: Ppu::new(),
            cartridge,
            config,
            cycle: 0,
        })
    }

    /// Execute one instruction and return the cycles it took.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.execute(&mut self.mmu);
        self.ppu.step(cycles, &mut self.mmu);
        self.cycle += cycles;
        cycles
    }

    /// Run until a frame's worth of cycles has accumulated, then carry the
    /// overshoot into the next frame.
    pub fn step_frame(&mut self) {
        while self.cycle < self.config.cycles_per_frame {
            self.step();
        }
        self.reset_cycle();
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn cycles_per_frame(&self) -> u32 {
        self.config.cycles_per_frame
    }

    /// Subtract one frame from the cycle counter, flooring at zero.
    pub fn reset_cycle(&mut self) {
        self.cycle = self.cycle.saturating_sub(self.config.cycles_per_frame);
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn rom_file_path(&self) -> &Path {
        self.cartridge.rom_file_path()
    }

    pub fn game_title(&self) -> &str {
        self.cartridge.game_title()
    }

    /// Sync battery-backed RAM to disk.
    pub fn flush(&mut self) -> Result<(), MemoryError> {
        self.mmu.flush_eram()
    }

    pub fn dump_system(&self) {
        self.cpu.dump();
        self.ppu.dump();
        self.cartridge.dump();
        self.mmu.dump();
    }
}
