//! PPU (Picture Processing Unit) emulation.
//!
//! See [PPU](https://www.nesdev.org/wiki/PPU) and
//! [PPU registers](https://www.nesdev.org/wiki/PPU_registers). A per-dot
//! pipeline over 262 scanlines of 341 dots: pre-render setup, visible
//! rendering with background/sprite compositing, post-render, and the
//! vertical-blank interval where the vblank NMI is raised.

pub mod ppu;
