//! Memory bus and address decoding for the NES.
//!
//! Maps the CPU's 64 KiB address space to RAM, PPU registers, APU registers,
//! controllers, extended RAM, and the cartridge. Register reads and writes
//! forward to the owning unit immediately; a side effect (status-latch
//! clear, controller shift) happens exactly once per access, the same act
//! as the access itself on hardware. Unmapped accesses return open-bus
//! zeroes with a diagnostic trace instead of failing.

use crate::apu::apu::Apu;
use crate::cartridge::cartridge::Cartridge;
use crate::controller::Controller;
use crate::picture_bus::PictureBus;
use crate::ppu::ppu::Ppu;

/// Memory-mapped I/O and clocking interface used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
    /// Advance the rest of the machine by `cycles` CPU cycles.
    fn tick(&mut self, cycles: usize);
    /// Consume a pending video interrupt.
    fn poll_nmi(&mut self) -> bool;
    /// Consume a pending hardware IRQ.
    fn poll_irq(&mut self) -> bool;
    /// CPU cycles the last access stalled the CPU for (OAM DMA).
    fn take_dma_stall(&mut self) -> usize {
        0
    }
}

/// The console's main bus: RAM, cartridge, picture hardware, audio
/// hardware, and the two controller ports. Ticking the bus keeps the PPU
/// (3 dots per CPU cycle) and APU (1 cycle each) in lockstep with the CPU.
#[derive(Clone)]
pub struct MainBus {
    ram: [u8; 2048],
    /// Battery-backed cartridge RAM at $6000-$7FFF, when the header
    /// advertises it; empty otherwise.
    ext_ram: Vec<u8>,
    pub cartridge: Cartridge,
    pub picture_bus: PictureBus,
    pub ppu: Ppu,
    pub apu: Apu,
    pub controllers: [Controller; 2],
    dma_stall: usize,
}

impl MainBus {
    pub fn new(cartridge: Cartridge) -> Self {
        let picture_bus = PictureBus::new(cartridge.mirroring());
        let ext_ram = if cartridge.has_extended_ram() {
            vec![0; 0x2000]
        } else {
            Vec::new()
        };
        Self {
            ram: [0; 2048],
            ext_ram,
            cartridge,
            picture_bus,
            ppu: Ppu::new(),
            apu: Apu::new(),
            controllers: [Controller::new(), Controller::new()],
            dma_stall: 0,
        }
    }

    /// The console's 2 KiB work RAM.
    pub fn ram(&self) -> &[u8; 2048] {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut [u8; 2048] {
        &mut self.ram
    }

    /// OAM DMA ($4014): copy the named 256-byte page into sprite memory and
    /// stall the CPU for the transfer.
    fn oam_dma(&mut self, page: u8) {
        let base = (page as usize) << 8;
        let mut data = [0u8; 256];
        match base {
            0x0000..=0x1FFF => {
                let start = base & 0x07FF;
                for (i, byte) in data.iter_mut().enumerate() {
                    *byte = self.ram[(start + i) & 0x07FF];
                }
            }
            0x6000..=0x7FFF if !self.ext_ram.is_empty() => {
                let start = base - 0x6000;
                for (i, byte) in data.iter_mut().enumerate() {
                    *byte = self.ext_ram[(start + i) & 0x1FFF];
                }
            }
            _ => {
                tracing::warn!(page, "OAM DMA from unmapped page skipped");
                return;
            }
        }
        self.ppu.do_dma(&data);
        self.dma_stall += 513;
    }
}

impl Bus for MainBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // Internal RAM, mirrored every 2 KiB up to $2000
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            // PPU registers, mirrored every 8 bytes
            0x2000..=0x3FFF => match addr & 0x2007 {
                0x2002 => self.ppu.read_status(),
                0x2004 => self.ppu.read_oam_data(),
                0x2007 => self.ppu.read_data(&mut self.picture_bus, &mut self.cartridge),
                reg => {
                    tracing::debug!(addr = reg, "read from write-only PPU register");
                    0
                }
            },
            0x4015 => self.apu.read_register(addr),
            0x4016 => self.controllers[0].read(),
            0x4017 => self.controllers[1].read(),
            0x4000..=0x401F => {
                tracing::debug!(addr, "read from write-only I/O register");
                0
            }
            0x4020..=0x5FFF => {
                tracing::debug!(addr, "expansion ROM read attempted, unsupported");
                0
            }
            0x6000..=0x7FFF => {
                if self.ext_ram.is_empty() {
                    tracing::debug!(addr, "read from absent extended RAM");
                    0
                } else {
                    self.ext_ram[(addr - 0x6000) as usize]
                }
            }
            // Cartridge PRG
            0x8000..=0xFFFF => self.cartridge.read_prg(addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            0x2000..=0x3FFF => match addr & 0x2007 {
                0x2000 => self.ppu.write_ctrl(data),
                0x2001 => self.ppu.write_mask(data),
                0x2003 => self.ppu.write_oam_addr(data),
                0x2004 => self.ppu.write_oam_data(data),
                0x2005 => self.ppu.write_scroll(data),
                0x2006 => self.ppu.write_addr(data),
                0x2007 => self
                    .ppu
                    .write_data(&mut self.picture_bus, &mut self.cartridge, data),
                reg => {
                    tracing::debug!(addr = reg, "write to read-only PPU register");
                }
            },
            0x4014 => self.oam_dma(data),
            // Strobe goes to both controllers
            0x4016 => {
                self.controllers[0].strobe(data);
                self.controllers[1].strobe(data);
            }
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write_register(addr, data),
            0x4018..=0x401F => {
                tracing::debug!(addr, "write to unmapped I/O register ignored");
            }
            0x4020..=0x5FFF => {
                tracing::debug!(addr, "expansion ROM write attempted, unsupported");
            }
            0x6000..=0x7FFF => {
                if self.ext_ram.is_empty() {
                    tracing::debug!(addr, "write to absent extended RAM ignored");
                } else {
                    self.ext_ram[(addr - 0x6000) as usize] = data;
                }
            }
            0x8000..=0xFFFF => {
                self.cartridge.write_prg(addr, data);
                // SxROM can retarget the nametables mid-run
                let mode = self.cartridge.mirroring();
                if mode != self.picture_bus.mirroring() {
                    self.picture_bus.update_mirroring(mode);
                }
            }
        }
    }

    fn tick(&mut self, cycles: usize) {
        for _ in 0..cycles {
            self.ppu.step(&mut self.picture_bus, &mut self.cartridge);
            self.apu.step();
        }
    }

    fn poll_nmi(&mut self) -> bool {
        std::mem::take(&mut self.ppu.nmi)
    }

    fn poll_irq(&mut self) -> bool {
        // Neither the supported mappers nor the simplified APU raise IRQs
        false
    }

    fn take_dma_stall(&mut self) -> usize {
        std::mem::take(&mut self.dma_stall)
    }
}
