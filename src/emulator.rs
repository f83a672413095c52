//! Top-level orchestrator: one `step()` = one video frame.
//!
//! Owns the live machine (CPU, which owns the bus and through it every
//! other unit) plus one full backup copy for rewind. Within a frame the
//! CPU runs whole instructions; the bus keeps the PPU and APU exactly in
//! step, so at any frame boundary all three have consumed the same number
//! of CPU cycles. `backup()`/`restore()` deep-copy the whole aggregate; no
//! buffer is shared between the live and backup machines.

use std::path::Path;

use crate::bus::MainBus;
use crate::cartridge::cartridge::{Cartridge, CartridgeError};
use crate::cpu::cpu::Cpu;
use crate::ppu::ppu::{SCANLINE_VISIBLE_DOTS, VISIBLE_SCANLINES};

/// Visible screen width in pixels.
pub const WIDTH: usize = SCANLINE_VISIBLE_DOTS;
/// Visible screen height in pixels.
pub const HEIGHT: usize = VISIBLE_SCANLINES;

/// CPU cycles budgeted per 60 Hz frame.
pub const CYCLES_PER_FRAME: usize = 29_781;

/// An NES machine with frame-granular stepping and snapshot/rewind.
pub struct Emulator {
    cpu: Cpu<MainBus>,
    backup: Cpu<MainBus>,
    /// Cycles the previous frame ran past its budget; deducted from the
    /// next frame so the long-run clock is exact.
    cycle_carry: usize,
    backup_carry: usize,
}

impl Emulator {
    /// Build a machine from a ROM file. Fails when the file is unreadable,
    /// the header malformed, or the mapper unsupported.
    pub fn new<P: AsRef<Path>>(rom_path: P) -> Result<Self, CartridgeError> {
        Ok(Self::with_cartridge(Cartridge::load(rom_path)?))
    }

    /// Build a machine from in-memory iNES image bytes.
    pub fn from_ines(data: &[u8]) -> Result<Self, CartridgeError> {
        Ok(Self::with_cartridge(Cartridge::from_ines(data)?))
    }

    fn with_cartridge(cartridge: Cartridge) -> Self {
        let mut cpu = Cpu::new(MainBus::new(cartridge));
        cpu.reset();
        let backup = cpu.clone();
        Self {
            cpu,
            backup,
            cycle_carry: 0,
            backup_carry: 0,
        }
    }

    /// Re-initialize CPU, picture, and audio state without reallocating
    /// memory. A reset machine fetches its first instruction from the same
    /// address a freshly constructed one does.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.cpu.bus.ppu.reset();
        self.cpu.bus.apu.reset();
        self.cycle_carry = 0;
    }

    /// Advance exactly one video frame: run instructions against the frame
    /// cycle budget (carrying any overshoot into the next frame), then
    /// synthesize the frame's audio samples.
    pub fn step(&mut self) {
        self.cpu.bus.ppu.frame_complete = false;
        let budget = CYCLES_PER_FRAME - self.cycle_carry;
        let mut elapsed = 0;
        while elapsed < budget {
            elapsed += self.cpu.step();
        }
        self.cycle_carry = elapsed - budget;
        self.cpu.bus.apu.generate_frame_audio();
    }

    /// Snapshot the whole machine. Everything reachable through the buses
    /// is value-copied, mapper latches and CHR RAM included.
    pub fn backup(&mut self) {
        self.backup = self.cpu.clone();
        self.backup_carry = self.cycle_carry;
    }

    /// Return the machine to the state captured by the last `backup()`.
    pub fn restore(&mut self) {
        self.cpu = self.backup.clone();
        self.cycle_carry = self.backup_carry;
    }

    /// The 256×240 framebuffer, one packed 0xRRGGBB pixel per cell.
    pub fn screen_buffer(&self) -> &[u32] {
        &self.cpu.bus.ppu.framebuffer
    }

    /// The console's 2 KiB work RAM.
    pub fn memory_buffer(&self) -> &[u8; 2048] {
        self.cpu.bus.ram()
    }

    pub fn memory_buffer_mut(&mut self) -> &mut [u8; 2048] {
        self.cpu.bus.ram_mut()
    }

    /// Button byte currently latched for a controller port (0 or 1).
    pub fn controller(&self, port: usize) -> u8 {
        self.cpu.bus.controllers[port].buttons
    }

    /// Set the button byte for a controller port (0 or 1).
    pub fn set_controller(&mut self, port: usize, buttons: u8) {
        self.cpu.bus.controllers[port].buttons = buttons;
    }

    /// Accumulated audio samples since the last drain.
    pub fn audio_buffer(&self) -> &[f32] {
        self.cpu.bus.apu.audio_buffer()
    }

    /// Take all accumulated audio samples, leaving the buffer empty.
    pub fn get_and_clear_audio_buffer(&mut self) -> Vec<f32> {
        self.cpu.bus.apu.get_and_clear_buffer()
    }

    /// Master volume, clamped to [0, 1].
    pub fn set_master_volume(&mut self, volume: f32) {
        self.cpu.bus.apu.set_master_volume(volume);
    }

    /// Enable or disable audio synthesis.
    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.cpu.bus.apu.set_audio_enabled(enabled);
    }

    /// Total CPU cycles elapsed since the last reset.
    pub fn elapsed_cycles(&self) -> u64 {
        self.cpu.cycles
    }
}
