//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte
//! header (magic "NES\x1A", PRG size in 16 KiB units, CHR size in 8 KiB
//! units, flags 6-7 for mirroring/battery/mapper), then PRG ROM, then CHR
//! ROM. CHR becomes 8 KiB RAM when the image carries no CHR banks.
//! A malformed header or unknown mapper id refuses to construct; nothing
//! downstream ever sees a half-built cartridge.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::cartridge::mapper::cnrom::Cnrom;
use crate::cartridge::mapper::nrom::Nrom;
use crate::cartridge::mapper::sxrom::Sxrom;
use crate::cartridge::mapper::uxrom::Uxrom;
use crate::cartridge::mapper::{Mapper, Mirroring};

/// Errors that prevent constructing a usable cartridge.
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("failed to read ROM file: {0}")]
    Io(#[from] io::Error),
    #[error("not an iNES image (bad magic)")]
    BadMagic,
    #[error("image declares no PRG ROM banks")]
    NoPrgBanks,
    #[error("ROM image truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),
}

/// A parsed cartridge: the mapper (which owns PRG/CHR) plus header facts
/// the rest of the console needs.
#[derive(Clone)]
pub struct Cartridge {
    pub mapper: Mapper,
    has_extended_ram: bool,
}

impl Cartridge {
    /// Load a cartridge from an iNES file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let data = fs::read(path)?;
        Self::from_ines(&data)
    }

    /// Parse a cartridge from iNES image bytes.
    pub fn from_ines(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < 16 || &data[0..4] != b"NES\x1A" {
            return Err(CartridgeError::BadMagic);
        }

        let prg_banks = data[4] as usize;
        let chr_banks = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];

        if prg_banks == 0 {
            return Err(CartridgeError::NoPrgBanks);
        }

        let prg_size = prg_banks * 0x4000;
        let chr_size = chr_banks * 0x2000;
        let expected = 16 + prg_size + chr_size;
        if data.len() < expected {
            return Err(CartridgeError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        // Flags 6: bit 0 vertical mirroring, bit 1 battery RAM, bit 3 four-screen;
        // mapper id low nibble in bits 4-7, high nibble in flags 7.
        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let has_extended_ram = flags6 & 0x02 != 0;
        let mapper_id = (flags6 >> 4) | (flags7 & 0xF0);

        let prg_rom = data[16..16 + prg_size].to_vec();
        let (chr, chr_is_ram) = if chr_banks == 0 {
            (vec![0; 0x2000], true)
        } else {
            (data[16 + prg_size..expected].to_vec(), false)
        };

        let mapper = match mapper_id {
            0 => Mapper::Nrom(Nrom::new(prg_rom, chr, chr_is_ram, mirroring)),
            1 => Mapper::Sxrom(Sxrom::new(prg_rom, chr, chr_is_ram)),
            2 => Mapper::Uxrom(Uxrom::new(prg_rom, chr, chr_is_ram, mirroring)),
            3 => Mapper::Cnrom(Cnrom::new(prg_rom, chr, mirroring)),
            id => return Err(CartridgeError::UnsupportedMapper(id)),
        };

        Ok(Self {
            mapper,
            has_extended_ram,
        })
    }

    /// Read from the PRG window ($8000-$FFFF).
    pub fn read_prg(&self, addr: u16) -> u8 {
        self.mapper.read_prg(addr)
    }

    /// Write to the PRG window (drives mapper bank-select registers).
    pub fn write_prg(&mut self, addr: u16, data: u8) {
        self.mapper.write_prg(addr, data);
    }

    /// Read from CHR pattern memory ($0000-$1FFF).
    pub fn read_chr(&self, addr: u16) -> u8 {
        self.mapper.read_chr(addr)
    }

    /// Write to CHR memory (effective only with CHR RAM).
    pub fn write_chr(&mut self, addr: u16, data: u8) {
        self.mapper.write_chr(addr, data);
    }

    /// Current nametable mirroring as reported by the mapper.
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }

    /// True when the header advertises battery-backed RAM at $6000-$7FFF.
    pub fn has_extended_ram(&self) -> bool {
        self.has_extended_ram
    }
}
