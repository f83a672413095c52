//! Cartridge mappers: PRG/CHR address decoding and bank switching.
//!
//! NROM (0), SxROM/MMC1 (1), UxROM (2), CNROM (3). The hardware universe
//! here is closed, so dispatch is a plain enum over the four circuits;
//! snapshots clone the whole variant, bank latches included.

pub mod cnrom;
pub mod nrom;
pub mod sxrom;
pub mod uxrom;

use crate::cartridge::mapper::cnrom::Cnrom;
use crate::cartridge::mapper::nrom::Nrom;
use crate::cartridge::mapper::sxrom::Sxrom;
use crate::cartridge::mapper::uxrom::Uxrom;

/// Nametable mirroring mode presented to the picture bus.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    OneScreenLower,
    OneScreenUpper,
    /// Four distinct nametables; needs cartridge VRAM that is not modeled.
    FourScreen,
}

/// One of the supported cartridge circuits. CPU PRG accesses ($8000-$FFFF)
/// and PPU CHR accesses ($0000-$1FFF) route through here.
#[derive(Clone)]
pub enum Mapper {
    Nrom(Nrom),
    Sxrom(Sxrom),
    Uxrom(Uxrom),
    Cnrom(Cnrom),
}

impl Mapper {
    /// Read a byte from the PRG window ($8000-$FFFF).
    pub fn read_prg(&self, addr: u16) -> u8 {
        match self {
            Mapper::Nrom(m) => m.read_prg(addr),
            Mapper::Sxrom(m) => m.read_prg(addr),
            Mapper::Uxrom(m) => m.read_prg(addr),
            Mapper::Cnrom(m) => m.read_prg(addr),
        }
    }

    /// Write to the PRG window. ROM itself is read-only; writes drive the
    /// mapper's bank-select registers where the circuit has them.
    pub fn write_prg(&mut self, addr: u16, data: u8) {
        match self {
            Mapper::Nrom(m) => m.write_prg(addr, data),
            Mapper::Sxrom(m) => m.write_prg(addr, data),
            Mapper::Uxrom(m) => m.write_prg(addr, data),
            Mapper::Cnrom(m) => m.write_prg(addr, data),
        }
    }

    /// Read a byte from CHR pattern memory ($0000-$1FFF).
    pub fn read_chr(&self, addr: u16) -> u8 {
        match self {
            Mapper::Nrom(m) => m.read_chr(addr),
            Mapper::Sxrom(m) => m.read_chr(addr),
            Mapper::Uxrom(m) => m.read_chr(addr),
            Mapper::Cnrom(m) => m.read_chr(addr),
        }
    }

    /// Write to CHR memory; only effective on cartridges with CHR RAM.
    pub fn write_chr(&mut self, addr: u16, data: u8) {
        match self {
            Mapper::Nrom(m) => m.write_chr(addr, data),
            Mapper::Sxrom(m) => m.write_chr(addr, data),
            Mapper::Uxrom(m) => m.write_chr(addr, data),
            Mapper::Cnrom(m) => m.write_chr(addr, data),
        }
    }

    /// Current nametable mirroring. Fixed from the header except on SxROM,
    /// where the control register selects it.
    pub fn mirroring(&self) -> Mirroring {
        match self {
            Mapper::Nrom(m) => m.mirroring(),
            Mapper::Sxrom(m) => m.mirroring(),
            Mapper::Uxrom(m) => m.mirroring(),
            Mapper::Cnrom(m) => m.mirroring(),
        }
    }
}
