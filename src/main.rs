//! NES emulator entry point.
//!
//! Loads a cartridge, steps the emulator one frame at a time, presents the
//! framebuffer in a window, and plays each frame's audio.
//! Usage: famicore path/to/game.nes

use std::env;
use std::process;
use std::time::{Duration, Instant};

use ansi_term::Colour::Red;
use famicore::emulator::{Emulator, HEIGHT, WIDTH};
use minifb::{Key, Scale, ScaleMode, Window, WindowOptions};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};

/// NES runs at ~60.0988 Hz (NTSC). Target one frame per 16.67 ms for ~60 fps.
const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

/// Keyboard mapping in shift-out order: A, B, Select, Start, Up, Down, Left, Right.
const KEY_MAP: [(Key, u8); 8] = [
    (Key::Z, 0x01),
    (Key::X, 0x02),
    (Key::RightShift, 0x04),
    (Key::Enter, 0x08),
    (Key::Up, 0x10),
    (Key::Down, 0x20),
    (Key::Left, 0x40),
    (Key::Right, 0x80),
];

fn main() {
    tracing_subscriber::fmt::init();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: famicore path/to/game.nes");
            process::exit(2);
        }
    };

    let mut emulator = match Emulator::new(&path) {
        Ok(emulator) => emulator,
        Err(err) => {
            eprintln!("{} {}", Red.bold().paint("error:"), err);
            process::exit(1);
        }
    };

    let mut window = Window::new(
        "Famicore",
        WIDTH,
        HEIGHT,
        WindowOptions {
            resize: true,
            scale: Scale::FitScreen,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )
    .expect("Failed to create window");
    window.set_target_fps(60);

    // Audio sink; run silent when no output device is available
    let stream = OutputStream::try_default().ok();
    let sink = stream
        .as_ref()
        .and_then(|(_, handle)| Sink::try_new(handle).ok());
    if sink.is_none() {
        emulator.set_audio_enabled(false);
    }

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();

        let mut buttons = 0u8;
        for (key, bit) in KEY_MAP {
            if window.is_key_down(key) {
                buttons |= bit;
            }
        }
        emulator.set_controller(0, buttons);

        emulator.step();

        window
            .update_with_buffer(emulator.screen_buffer(), WIDTH, HEIGHT)
            .expect("Failed to update window");

        if let Some(sink) = &sink {
            let samples = emulator.get_and_clear_audio_buffer();
            if !samples.is_empty() {
                sink.append(SamplesBuffer::new(1, 44_100, samples));
            }
        }

        // Pace to ~60 fps (emulation runs far faster than a real NES)
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }
}
