use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::MemoryError;

pub const ERAM_BANK_SIZE: usize = 0x2000;

/// Cartridge RAM mapped at 0xA000–0xBFFF.
///
/// Battery-backed cartridges keep it in a save file so that writes survive
/// the session; everything else gets an in-memory buffer. Byte `offset` of
/// bank `bank` lives at `bank * 0x2000 + offset` in either backing.
#[derive(Debug, Default)]
pub enum ExternalRam {
    #[default]
    None,
    Volatile {
        data: Vec<u8>,
        banks: usize,
    },
    Persistent {
        file: File,
        path: PathBuf,
        banks: usize,
    },
}

impl ExternalRam {
    pub fn volatile(banks: usize) -> Self {
        if banks == 0 {
            return ExternalRam::None;
        }
        ExternalRam::Volatile {
            data: vec![0; banks * ERAM_BANK_SIZE],
            banks,
        }
    }

    /// Open (or create) the save file at `path` and size it to hold
    /// `banks` banks. Existing contents are kept.
    pub fn persistent(path: &Path, banks: usize) -> Result<Self, MemoryError> {
        if banks == 0 {
            return Ok(ExternalRam::None);
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| MemoryError::SaveOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let size = (banks * ERAM_BANK_SIZE) as u64;
        file.set_len(size).map_err(|source| MemoryError::SaveResize {
            path: path.to_path_buf(),
            size,
            source,
        })?;

        Ok(ExternalRam::Persistent {
            file,
            path: path.to_path_buf(),
            banks,
        })
    }

    pub fn bank_count(&self) -> usize {
        match self {
            ExternalRam::None => 0,
            ExternalRam::Volatile { banks, .. } | ExternalRam::Persistent { banks, .. } => *banks,
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, ExternalRam::Persistent { .. })
    }

    pub fn save_path(&self) -> Option<&Path> {
        match self {
            ExternalRam::Persistent { path, .. } => Some(path),
            _ => None,
        }
    }

    fn position(&self, bank: usize, offset: u16) -> Result<usize, MemoryError> {
        debug_assert!(usize::from(offset) < ERAM_BANK_SIZE);

        let count = self.bank_count();
        if bank >= count {
            return Err(MemoryError::InvalidBank {
                region: "ERAM",
                index: bank,
                count,
            });
        }
        Ok(bank * ERAM_BANK_SIZE + usize::from(offset))
    }

    pub fn read(&self, bank: usize, offset: u16) -> Result<u8, MemoryError> {
        let pos = self.position(bank, offset)?;
        match self {
            ExternalRam::None => unreachable!("position() rejects every bank without RAM"),
            ExternalRam::Volatile { data, .. } => Ok(data[pos]),
            ExternalRam::Persistent { file, .. } => {
                let mut file = file;
                let mut byte = [0u8; 1];
                file.seek(SeekFrom::Start(pos as u64))
                    .and_then(|_| file.read_exact(&mut byte))
                    .map_err(|source| MemoryError::SaveIo {
                        offset: pos as u64,
                        source,
                    })?;
                Ok(byte[0])
            }
        }
    }

    pub fn write(&mut self, bank: usize, offset: u16, value: u8) -> Result<(), MemoryError> {
        let pos = self.position(bank, offset)?;
        match self {
            ExternalRam::None => unreachable!("position() rejects every bank without RAM"),
            ExternalRam::Volatile { data, .. } => {
                data[pos] = value;
                Ok(())
            }
            ExternalRam::Persistent { file, .. } => file
                .seek(SeekFrom::Start(pos as u64))
                .and_then(|_| file.write_all(&[value]))
                .map_err(|source| MemoryError::SaveIo {
                    offset: pos as u64,
                    source,
                }),
        }
    }

    /// Push buffered save data to disk. A no-op for volatile RAM.
    pub fn flush(&mut self) -> Result<(), MemoryError> {
        if let ExternalRam::Persistent { file, .. } = self {
            file.sync_data()
                .map_err(|source| MemoryError::SaveIo { offset: 0, source })?;
        }
        Ok(())
    }
}
