//! Game Boy emulation core: an SM83 interpreter over a banked memory map,
//! fed by a cartridge loader.

pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;
pub mod gameboy;
pub mod mmu;
pub mod ppu;
pub mod util;

pub use cartridge::{BankController, Cartridge};
pub use config::{CarrySource, CoreConfig, FlagQuirks};
pub use cpu::{Bus, Cpu};
pub use error::{CartridgeError, MemoryError};
pub use gameboy::GameBoy;
pub use mmu::Mmu;
