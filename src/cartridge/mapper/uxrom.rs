//! UxROM (mapper 2): PRG bank switching with a fixed top bank.
//!
//! Any PRG-window write selects the 16 KiB bank visible at $8000-$BFFF;
//! $C000-$FFFF always shows the last bank. CHR is fixed (usually RAM).

use crate::cartridge::mapper::Mirroring;

/// PRG-bank-only switching; no CHR banking.
#[derive(Clone)]
pub struct Uxrom {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    select_prg: usize,
    mirroring: Mirroring,
}

impl Uxrom {
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, chr_is_ram: bool, mirroring: Mirroring) -> Self {
        Self {
            prg_rom,
            chr,
            chr_is_ram,
            select_prg: 0,
            mirroring,
        }
    }

    pub fn read_prg(&self, addr: u16) -> u8 {
        let offset = if addr < 0xC000 {
            ((addr as usize - 0x8000) & 0x3FFF) | (self.select_prg << 14)
        } else {
            // fixed last bank
            self.prg_rom.len().saturating_sub(0x4000) + (addr as usize & 0x3FFF)
        };
        self.prg_rom.get(offset).copied().unwrap_or(0)
    }

    pub fn write_prg(&mut self, _addr: u16, data: u8) {
        self.select_prg = data as usize;
    }

    pub fn read_chr(&self, addr: u16) -> u8 {
        self.chr.get(addr as usize & 0x1FFF).copied().unwrap_or(0)
    }

    pub fn write_chr(&mut self, addr: u16, data: u8) {
        if self.chr_is_ram {
            self.chr[addr as usize & 0x1FFF] = data;
        } else {
            tracing::debug!(addr, "write to read-only CHR memory ignored");
        }
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
