mod controller;
mod header;

pub use controller::BankController;
pub use header::{header_checksum, ram_banks, rom_banks, CartridgeHeader, HEADER_LEN, HEADER_START};

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::CartridgeError;
use crate::mmu::{Mmu, ROM_BANK_SIZE};

/// Metadata for a validated ROM file.
///
/// [`Cartridge::init`] reads and checks the header; [`Cartridge::load`]
/// streams the ROM into an [`Mmu`] and sets up its external RAM.
#[derive(Clone, Debug)]
pub struct Cartridge {
    rom_path: PathBuf,
    sav_path: Option<PathBuf>,
    header: CartridgeHeader,
}

fn has_rom_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gb") || ext.eq_ignore_ascii_case("gbc"))
}

fn open_rom(path: &Path) -> Result<File, CartridgeError> {
    File::open(path).map_err(|source| CartridgeError::Open {
        path: path.to_path_buf(),
        source,
    })
}

impl Cartridge {
    pub fn init(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CartridgeError::NotFound(path.to_path_buf()));
        }
        if !has_rom_extension(path) {
            return Err(CartridgeError::BadExtension(path.to_path_buf()));
        }

        let mut file = open_rom(path)?;
        let mut raw = [0u8; HEADER_LEN];
        file.seek(SeekFrom::Start(HEADER_START))
            .and_then(|_| file.read_exact(&mut raw))
            .map_err(CartridgeError::Header)?;

        let header = CartridgeHeader::parse(&raw)?;
        let sav_path = header
            .controller
            .is_persistent()
            .then(|| path.with_extension("sav"));

        log::info!(
            "cartridge '{}': {}, {} ROM bank(s), {} RAM bank(s)",
            header.title,
            header.controller,
            header.rom_banks,
            header.ram_banks,
        );

        Ok(Self {
            rom_path: path.to_path_buf(),
            sav_path,
            header,
        })
    }

    /// Fill `mmu` with this cartridge: external RAM first, then the fixed
    /// bank and every switchable bank. ROM1 is left at bank 0.
    pub fn load(&self, mmu: &mut Mmu) -> Result<(), CartridgeError> {
        mmu.set_eram(
            self.ram_bank_amount(),
            self.is_persistent(),
            self.sav_file_path(),
            self.header.controller,
        )?;

        let mut file = open_rom(&self.rom_path)?;
        file.seek(SeekFrom::Start(0))
            .map_err(CartridgeError::StaticRom)?;

        let mut rom0 = [0u8; ROM_BANK_SIZE];
        file.read_exact(&mut rom0)
            .map_err(CartridgeError::StaticRom)?;

        let switchable = self.header.rom_banks - 1;
        let mut banks = vec![0u8; switchable * ROM_BANK_SIZE];
        for (index, chunk) in banks.chunks_exact_mut(ROM_BANK_SIZE).enumerate() {
            file.read_exact(chunk).map_err(|source| CartridgeError::Bank {
                bank: index + 1,
                source,
            })?;
        }

        mmu.load_rom0(&rom0);
        mmu.load_rom1(&banks, switchable);
        mmu.set_rom1_index(0);

        log::debug!(
            "loaded {} bytes from '{}'",
            ROM_BANK_SIZE + banks.len(),
            self.rom_path.display()
        );
        Ok(())
    }

    pub fn rom_file_path(&self) -> &Path {
        &self.rom_path
    }

    /// Save file next to the ROM, present for battery-backed cartridges.
    pub fn sav_file_path(&self) -> Option<&Path> {
        self.sav_path.as_deref()
    }

    pub fn game_title(&self) -> &str {
        &self.header.title
    }

    pub fn bank_controller(&self) -> BankController {
        self.header.controller
    }

    pub fn rom_bank_amount(&self) -> usize {
        self.header.rom_banks
    }

    /// External RAM banks, including RAM built into the controller when
    /// the header declares none.
    pub fn ram_bank_amount(&self) -> usize {
        match self.header.ram_banks {
            0 => self.header.controller.built_in_ram_banks(),
            banks => banks,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.header.controller.is_persistent()
    }

    pub fn dump(&self) {
        log::info!("cartridge rom={}", self.rom_path.display());
        log::info!(
            "cartridge sav={}",
            self.sav_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| String::from("<none>"))
        );
        log::info!(
            "cartridge title='{}' controller={} (0x{:02X}) rom_banks={} ram_banks={} persistent={}",
            self.header.title,
            self.header.controller,
            self.header.controller.code(),
            self.rom_bank_amount(),
            self.ram_bank_amount(),
            self.is_persistent(),
        );
    }
}
