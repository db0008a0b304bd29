use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised inside the memory map.
///
/// Setup failures (creating or sizing the save file) are surfaced to the
/// loader. Everything else is produced during emulation, logged, and
/// replaced by an open-bus value or a dropped write.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("persistent external RAM requested without a save file path")]
    MissingSavePath,

    #[error("failed to open save file '{}'", .path.display())]
    SaveOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to size save file '{}' to {size} bytes", .path.display())]
    SaveResize {
        path: PathBuf,
        size: u64,
        #[source]
        source: io::Error,
    },

    #[error("save file access at offset {offset:#X} failed")]
    SaveIo {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("{region} bank {index} is out of range ({count} banks present)")]
    InvalidBank {
        region: &'static str,
        index: usize,
        count: usize,
    },
}

/// Load-fatal cartridge failures. None of these leave a usable session.
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("ROM file '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' is not a .gb or .gbc file", .0.display())]
    BadExtension(PathBuf),

    #[error("failed to open ROM file '{}'", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read cartridge header")]
    Header(#[source] io::Error),

    #[error("header checksum mismatch: header says {expected:#04X}, computed {computed:#04X}")]
    Checksum { expected: u8, computed: u8 },

    #[error("unsupported ROM size code {0:#04X}")]
    RomSize(u8),

    #[error("unsupported RAM size code {0:#04X}")]
    RamSize(u8),

    #[error("ROM is corrupt: unable to read the fixed bank")]
    StaticRom(#[source] io::Error),

    #[error("ROM is corrupt: unable to read bank {bank}")]
    Bank {
        bank: usize,
        #[source]
        source: io::Error,
    },

    #[error("unable to set up external RAM")]
    SaveFile(#[from] MemoryError),
}
