//! Famicore: a cycle-stepped NES emulation core with rewind.
//!
//! Emulates the NES chipset as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): 6502
//! CPU, 2C02-style PPU pipeline, a simplified APU, the main and picture
//! buses, controller I/O, and NROM/MMC1/UxROM/CNROM cartridge mappers.
//! One [`emulator::Emulator::step`] advances exactly one video frame,
//! filling the 256×240 framebuffer and one frame of 44.1 kHz audio;
//! `backup()`/`restore()` deep-copy the whole machine so an external
//! driver can rewind execution to a checkpoint.
//!
//! ## Modules (NESdev references)
//!
//! - **apu** – [APU](https://www.nesdev.org/wiki/APU): pulse×2, triangle,
//!   noise, DMC placeholder; per-frame synthesis
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map):
//!   RAM, PPU, APU, controllers, cartridge; 3 PPU dots per CPU cycle
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading;
//!   [Mapper](https://www.nesdev.org/wiki/Mapper) 0/1/2/3
//! - **controller** – [Controller reading](https://www.nesdev.org/wiki/Controller_reading):
//!   $4016 strobe, shift-out
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU): documented opcode
//!   set, [NMI](https://www.nesdev.org/wiki/NMI)/IRQ latches
//! - **emulator** – frame stepping, snapshot/rewind, external accessors
//! - **picture_bus** – [PPU memory map](https://www.nesdev.org/wiki/PPU_memory_map):
//!   nametables, mirroring, palette
//! - **ppu** – [PPU](https://www.nesdev.org/wiki/PPU): per-dot pipeline,
//!   OAM, sprite evaluation, 256×240

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod emulator;
pub mod picture_bus;
pub mod ppu;
