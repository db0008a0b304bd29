use crate::error::CartridgeError;

use super::BankController;

/// The header occupies 0x100–0x14F; offsets below are relative to 0x100.
pub const HEADER_START: u64 = 0x100;
pub const HEADER_LEN: usize = 0x50;

const TITLE: std::ops::RangeInclusive<usize> = 0x34..=0x43;
const CONTROLLER: usize = 0x47;
const ROM_SIZE: usize = 0x48;
const RAM_SIZE: usize = 0x49;
const CHECKSUM: usize = 0x4D;

/// Decoded cartridge header fields used by the loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub controller: BankController,
    pub rom_banks: usize,
    pub ram_banks: usize,
}

/// `sum(!b)` over header bytes 0x134–0x14C, wrapping.
pub fn header_checksum(header: &[u8; HEADER_LEN]) -> u8 {
    header[0x34..=0x4C]
        .iter()
        .fold(0u8, |sum, &byte| sum.wrapping_add(!byte))
}

/// Number of 16 KiB ROM banks for a ROM size code.
pub fn rom_banks(code: u8) -> Result<usize, CartridgeError> {
    match code {
        0x00..=0x08 => Ok(2usize << code),
        other => Err(CartridgeError::RomSize(other)),
    }
}

/// Number of 8 KiB RAM banks for a RAM size code. Code 0x01 (an unused
/// 2 KiB size) is rejected.
pub fn ram_banks(code: u8) -> Result<usize, CartridgeError> {
    match code {
        0x00 => Ok(0),
        0x02 => Ok(1),
        0x03 => Ok(4),
        0x04 => Ok(16),
        0x05 => Ok(8),
        other => Err(CartridgeError::RamSize(other)),
    }
}

/// Printable ASCII from the title field, stopping at the first NUL.
pub fn title(header: &[u8; HEADER_LEN]) -> String {
    header[TITLE]
        .iter()
        .take_while(|&&byte| byte != 0)
        .filter(|byte| byte.is_ascii_graphic() || **byte == b' ')
        .map(|&byte| char::from(byte))
        .collect()
}

impl CartridgeHeader {
    pub fn parse(header: &[u8; HEADER_LEN]) -> Result<Self, CartridgeError> {
        let computed = header_checksum(header);
        if computed != header[CHECKSUM] {
            return Err(CartridgeError::Checksum {
                expected: header[CHECKSUM],
                computed,
            });
        }

        Ok(Self {
            title: title(header),
            controller: BankController::from_code(header[CONTROLLER]),
            rom_banks: rom_banks(header[ROM_SIZE])?,
            ram_banks: ram_banks(header[RAM_SIZE])?,
        })
    }
}
