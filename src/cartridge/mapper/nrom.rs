//! NROM (mapper 0): no bank switching.
//!
//! 16 KiB PRG mirrored across both windows, or 32 KiB mapped linearly.
//! CHR is a single fixed 8 KiB bank (ROM, or RAM when the image carries
//! no CHR banks).

use crate::cartridge::mapper::Mirroring;

/// Fixed-mapping cartridge: PRG and CHR as shipped, no registers.
#[derive(Clone)]
pub struct Nrom {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    one_bank: bool,
    mirroring: Mirroring,
}

impl Nrom {
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, chr_is_ram: bool, mirroring: Mirroring) -> Self {
        let one_bank = prg_rom.len() <= 0x4000;
        Self {
            prg_rom,
            chr,
            chr_is_ram,
            one_bank,
            mirroring,
        }
    }

    pub fn read_prg(&self, addr: u16) -> u8 {
        let offset = if self.one_bank {
            (addr as usize - 0x8000) & 0x3FFF
        } else {
            addr as usize - 0x8000
        };
        self.prg_rom.get(offset).copied().unwrap_or(0)
    }

    pub fn write_prg(&mut self, addr: u16, _data: u8) {
        tracing::debug!(addr, "write to NROM PRG ROM ignored");
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
