//! APU (Audio Processing Unit) emulation.
//!
//! A deliberately simplified rendition of the 2A03 audio hardware:
//! - **Pulse** (×2): square wave at 25% or 50% duty, direct volume.
//! - **Triangle**: ramp wave, linear counter.
//! - **Noise**: 15-bit LFSR.
//! - **DMC**: register state only; always silent.
//! - **Frame sequencer**: quarter-frame clocking of sweep/linear/length.
//!
//! Envelopes are direct volume passthrough and DMC sample playback is not
//! implemented. Samples are synthesized per video frame at 44.1 kHz rather
//! than per APU cycle.

pub mod apu;
