//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: Parses iNES (.nes) images, holds PRG/CHR and the mapper.
//! - **mapper**: NROM (0), SxROM/MMC1 (1), UxROM (2), CNROM (3); PRG/CHR
//!   bank switching and nametable mirroring.

pub mod cartridge;
pub mod mapper;
