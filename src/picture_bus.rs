//! Picture bus: the PPU's private 14-bit address space.
//!
//! $0000-$1FFF pattern tables (cartridge CHR), $2000-$2FFF nametables
//! (2 KiB console VRAM behind a mirroring offset table, mirrored again at
//! $3000-$3EFF), $3F00-$3FFF the 32-byte palette. The CPU never touches
//! this bus directly; it reaches it through the PPU's $2006/$2007 latch.

use crate::cartridge::cartridge::Cartridge;
use crate::cartridge::mapper::Mirroring;

/// VRAM, palette, and the nametable offset table derived from the
/// cartridge's mirroring mode.
#[derive(Clone)]
pub struct PictureBus {
    ram: [u8; 0x800],
    /// Start offset into `ram` of each of the four logical nametables.
    name_tables: [usize; 4],
    palette: [u8; 32],
    mirroring: Mirroring,
}

impl PictureBus {
    pub fn new(mirroring: Mirroring) -> Self {
        let mut bus = Self {
            ram: [0; 0x800],
            name_tables: [0; 4],
            palette: [0; 32],
            mirroring,
        };
        bus.update_mirroring(mirroring);
        bus
    }

    /// Read a byte from the 14-bit picture address space.
    pub fn read(&self, cart: &Cartridge, addr: u16) -> u8 {
        match addr & 0x3FFF {
            0x0000..=0x1FFF => cart.read_chr(addr & 0x1FFF),
            0x2000..=0x3EFF => self.ram[self.name_table_index(addr)],
            _ => self.palette[Self::palette_index(addr)],
        }
    }

    /// Write a byte to the 14-bit picture address space.
    pub fn write(&mut self, cart: &mut Cartridge, addr: u16, data: u8) {
        match addr & 0x3FFF {
            0x0000..=0x1FFF => cart.write_chr(addr & 0x1FFF, data),
            0x2000..=0x3EFF => self.ram[self.name_table_index(addr)] = data,
            // Palette entries are 6-bit on hardware
            _ => self.palette[Self::palette_index(addr)] = data & 0x3F,
        }
    }

    /// Color index for the renderer; `entry` is the composed palette address
    /// low byte (0 = backdrop, $10 | n = sprite palettes).
    pub fn read_palette(&self, entry: u8) -> u8 {
        self.palette[Self::palette_index(0x3F00 | entry as u16)]
    }

    /// Current mirroring arrangement.
    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    /// Rebuild the nametable offset table for a (possibly new) mirroring
    /// mode. SxROM switches modes at runtime via its control register.
    pub fn update_mirroring(&mut self, mode: Mirroring) {
        self.name_tables = match mode {
            Mirroring::Horizontal => [0, 0, 0x400, 0x400],
            Mirroring::Vertical => [0, 0x400, 0, 0x400],
            Mirroring::OneScreenLower => [0; 4],
            Mirroring::OneScreenUpper => [0x400; 4],
            Mirroring::FourScreen => {
                // Needs cartridge VRAM this core does not model
                tracing::warn!("four-screen mirroring unsupported; using one-screen");
                [0; 4]
            }
        };
        self.mirroring = mode;
    }

    /// Map a nametable address ($2000-$3EFF incl. mirrors) to a VRAM index.
    fn name_table_index(&self, addr: u16) -> usize {
        let addr = (addr as usize) & 0x0FFF;
        self.name_tables[addr / 0x400] + (addr & 0x3FF)
    }

    /// Resolve a palette address to a 32-byte index. Every 4th entry
    /// aliases the universal backdrop color at $3F00.
    fn palette_index(addr: u16) -> usize {
        let i = (addr & 0x1F) as usize;
        if i >= 0x10 && i % 4 == 0 { 0 } else { i }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chr_ram_cart() -> Cartridge {
        let mut rom = Vec::new();
        rom.extend_from_slice(b"NES\x1A");
        rom.push(1); // one PRG bank
        rom.push(0); // CHR RAM
        rom.extend_from_slice(&[0u8; 10]);
        rom.extend(std::iter::repeat(0u8).take(0x4000));
        Cartridge::from_ines(&rom).unwrap()
    }

    #[test]
    fn horizontal_mirroring_pairs_tables_vertically() {
        let mut cart = chr_ram_cart();
        let mut bus = PictureBus::new(Mirroring::Horizontal);
        bus.write(&mut cart, 0x2000, 0x11);
        assert_eq!(bus.read(&cart, 0x2400), 0x11); // NT1 mirrors NT0
        assert_eq!(bus.read(&cart, 0x2800), 0x00); // NT2 is the other bank
    }

    #[test]
    fn vertical_mirroring_pairs_tables_horizontally() {
        let mut cart = chr_ram_cart();
        let mut bus = PictureBus::new(Mirroring::Vertical);
        bus.write(&mut cart, 0x2000, 0x22);
        assert_eq!(bus.read(&cart, 0x2800), 0x22); // NT2 mirrors NT0
        assert_eq!(bus.read(&cart, 0x2400), 0x00);
    }

    #[test]
    fn nametable_region_mirrors_at_0x3000() {
        let mut cart = chr_ram_cart();
        let mut bus = PictureBus::new(Mirroring::Vertical);
        bus.write(&mut cart, 0x2005, 0x33);
        assert_eq!(bus.read(&cart, 0x3005), 0x33);
    }

    #[test]
    fn palette_backdrop_aliases_every_fourth_sprite_entry() {
        let mut cart = chr_ram_cart();
        let mut bus = PictureBus::new(Mirroring::Horizontal);
        bus.write(&mut cart, 0x3F10, 0x2A);
        assert_eq!(bus.read(&cart, 0x3F00), 0x2A);
        bus.write(&mut cart, 0x3F00, 0x15);
        assert_eq!(bus.read(&cart, 0x3F10), 0x15);
        assert_eq!(bus.read(&cart, 0x3F14), 0x15);
        assert_eq!(bus.read(&cart, 0x3F1C), 0x15);
    }

    #[test]
    fn palette_writes_are_six_bit() {
        let mut cart = chr_ram_cart();
        let mut bus = PictureBus::new(Mirroring::Horizontal);
        bus.write(&mut cart, 0x3F01, 0xFF);
        assert_eq!(bus.read(&cart, 0x3F01), 0x3F);
    }

    #[test]
    fn pattern_space_reaches_chr() {
        let mut cart = chr_ram_cart();
        let mut bus = PictureBus::new(Mirroring::Horizontal);
        bus.write(&mut cart, 0x1000, 0x77);
        assert_eq!(bus.read(&cart, 0x1000), 0x77);
    }
}
