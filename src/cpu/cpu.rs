//! 6502 CPU core.
//!
//! Executes one instruction per [`Cpu::step`] and reports the cycles it
//! consumed, ticking the bus by the same amount so the PPU and APU never
//! fall behind. Decoding follows the 6502's aaa-bbb-cc bit-field layout:
//! single-byte/implied forms first, then branches, then the three
//! two-bit-group families. Undocumented opcodes degrade to traced two-cycle
//! no-ops.
//!
//! NMI and IRQ requests latch and are serviced at the next instruction
//! boundary; NMI unconditionally, IRQ only with the interrupt-disable flag
//! clear.

use crate::bus::Bus;
use crate::cpu::flags::{
    FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW,
    FLAG_UNUSED, FLAG_ZERO,
};

const NMI_VECTOR: u16 = 0xFFFA;
const RESET_VECTOR: u16 = 0xFFFC;
const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles for the NMI/IRQ service sequence.
const INTERRUPT_CYCLES: usize = 7;

/// Decode masks for the aaa-bbb-cc opcode layout.
const INSTRUCTION_MODE_MASK: u8 = 0x03;
const OPERATION_MASK: u8 = 0xE0;
const OPERATION_SHIFT: u8 = 5;
const ADDR_MODE_MASK: u8 = 0x1C;
const ADDR_MODE_SHIFT: u8 = 2;

/// Branches are xxy1_0000: xx selects the flag, y the required value.
const BRANCH_INSTRUCTION_MASK: u8 = 0x1F;
const BRANCH_INSTRUCTION_RESULT: u8 = 0x10;
const BRANCH_CONDITION_MASK: u8 = 0x20;
const BRANCH_ON_FLAG_SHIFT: u8 = 6;

/// aaa values for the cc = 01 family.
mod op1 {
    pub const ORA: u8 = 0;
    pub const AND: u8 = 1;
    pub const EOR: u8 = 2;
    pub const ADC: u8 = 3;
    pub const STA: u8 = 4;
    pub const LDA: u8 = 5;
    pub const CMP: u8 = 6;
    pub const SBC: u8 = 7;
}

/// aaa values for the cc = 10 family.
mod op2 {
    pub const ASL: u8 = 0;
    pub const ROL: u8 = 1;
    pub const LSR: u8 = 2;
    pub const ROR: u8 = 3;
    pub const STX: u8 = 4;
    pub const LDX: u8 = 5;
    pub const DEC: u8 = 6;
    pub const INC: u8 = 7;
}

/// aaa values for the cc = 00 family.
mod op0 {
    pub const BIT: u8 = 1;
    pub const STY: u8 = 4;
    pub const LDY: u8 = 5;
    pub const CPY: u8 = 6;
    pub const CPX: u8 = 7;
}

/// bbb values for the cc = 01 family.
mod addr1 {
    pub const INDEXED_INDIRECT_X: u8 = 0;
    pub const ZERO_PAGE: u8 = 1;
    pub const IMMEDIATE: u8 = 2;
    pub const ABSOLUTE: u8 = 3;
    pub const INDIRECT_Y: u8 = 4;
    pub const INDEXED_X: u8 = 5;
    pub const ABSOLUTE_Y: u8 = 6;
    pub const ABSOLUTE_X: u8 = 7;
}

/// bbb values for the cc = 10 and cc = 00 families.
mod addr2 {
    pub const IMMEDIATE: u8 = 0;
    pub const ZERO_PAGE: u8 = 1;
    pub const ACCUMULATOR: u8 = 2;
    pub const ABSOLUTE: u8 = 3;
    pub const INDEXED: u8 = 5;
    pub const ABSOLUTE_INDEXED: u8 = 7;
}

/// Documented base cycle counts per opcode; 0 marks an unassigned opcode.
/// Page-cross and branch extras are added during execution.
#[rustfmt::skip]
const OPERATION_CYCLES: [u8; 256] = [
    //       x0 x1 x2 x3 x4 x5 x6 x7 x8 x9 xA xB xC xD xE xF
    /* 0x */  7, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 0, 4, 6, 0,
    /* 1x */  2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    /* 2x */  6, 6, 0, 0, 3, 3, 5, 0, 4, 2, 2, 0, 4, 4, 6, 0,
    /* 3x */  2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    /* 4x */  6, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 3, 4, 6, 0,
    /* 5x */  2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    /* 6x */  6, 6, 0, 0, 0, 3, 5, 0, 4, 2, 2, 0, 5, 4, 6, 0,
    /* 7x */  2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    /* 8x */  0, 6, 0, 0, 3, 3, 3, 0, 2, 0, 2, 0, 4, 4, 4, 0,
    /* 9x */  2, 6, 0, 0, 4, 4, 4, 0, 2, 5, 2, 0, 0, 5, 0, 0,
    /* Ax */  2, 6, 2, 0, 3, 3, 3, 0, 2, 2, 2, 0, 4, 4, 4, 0,
    /* Bx */  2, 5, 0, 0, 4, 4, 4, 0, 2, 4, 2, 0, 4, 4, 4, 0,
    /* Cx */  2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0,
    /* Dx */  2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    /* Ex */  2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0,
    /* Fx */  2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
];

/// Interrupt sources. `Break` is the software BRK entry into the IRQ vector.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Nmi,
    Irq,
    Break,
}

/// CPU register file plus the interrupt-pending latches. The CPU owns its
/// bus; every memory access and the post-instruction tick go through it.
#[derive(Clone)]
pub struct Cpu<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    /// Total CPU cycles elapsed since the last reset.
    pub cycles: u64,
    pending_nmi: bool,
    pending_irq: bool,
    /// Page-cross / branch-taken cycles for the instruction in flight.
    extra_cycles: usize,
    pub bus: B,
}

impl<B: Bus> Cpu<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: FLAG_INTERRUPT_DISABLE | FLAG_UNUSED,
            cycles: 0,
            pending_nmi: false,
            pending_irq: false,
            extra_cycles: 0,
            bus,
        }
    }

    /// Power-on/reset state: registers cleared, interrupts disabled, and
    /// the program counter primed from the reset vector.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD; // documented startup state
        self.status = FLAG_INTERRUPT_DISABLE | FLAG_UNUSED;
        self.pc = self.read_address(RESET_VECTOR);
        self.cycles = 0;
        self.pending_nmi = false;
        self.pending_irq = false;
        self.extra_cycles = 0;
    }

    /// Service a pending interrupt or execute one instruction. Returns the
    /// cycles consumed; the bus is ticked by the same amount before
    /// returning.
    pub fn step(&mut self) -> usize {
        if self.bus.poll_nmi() {
            self.pending_nmi = true;
        }
        if self.bus.poll_irq() {
            self.pending_irq = true;
        }

        self.extra_cycles = 0;
        let mut elapsed = if self.pending_nmi {
            self.pending_nmi = false;
            self.interrupt_sequence(Interrupt::Nmi);
            INTERRUPT_CYCLES
        } else if self.pending_irq && self.status & FLAG_INTERRUPT_DISABLE == 0 {
            self.pending_irq = false;
            self.interrupt_sequence(Interrupt::Irq);
            INTERRUPT_CYCLES
        } else {
            let opcode = self.fetch_byte();
            let base = OPERATION_CYCLES[opcode as usize] as usize;
            if base != 0 && self.execute(opcode) {
                base + self.extra_cycles
            } else {
                tracing::debug!(opcode, "unassigned opcode treated as a no-op");
                2
            }
        };

        // OAM DMA halts the CPU; one extra cycle when it lands on an odd cycle
        let stall = self.bus.take_dma_stall();
        if stall > 0 {
            elapsed += stall + (self.cycles & 1) as usize;
        }

        self.cycles += elapsed as u64;
        self.bus.tick(elapsed);
        elapsed
    }

    fn execute(&mut self, opcode: u8) -> bool {
        // Implied forms must be tried first and branches before the cc = 00
        // family; both overlap its bit pattern.
        self.execute_implied(opcode)
            || self.execute_branch(opcode)
            || self.execute_type1(opcode)
            || self.execute_type2(opcode)
            || self.execute_type0(opcode)
    }

    /// Push PC and flags, disable IRQs, and vector. BRK pushes PC + 1 with
    /// the B flag set, a 6502 quirk.
    fn interrupt_sequence(&mut self, kind: Interrupt) {
        if kind == Interrupt::Break {
            self.pc = self.pc.wrapping_add(1);
        }
        self.push_stack((self.pc >> 8) as u8);
        self.push_stack(self.pc as u8);

        let mut pushed = self.status | FLAG_UNUSED;
        if kind == Interrupt::Break {
            pushed |= FLAG_BREAK;
        } else {
            pushed &= !FLAG_BREAK;
        }
        self.push_stack(pushed);

        self.status |= FLAG_INTERRUPT_DISABLE;
        self.pc = match kind {
            Interrupt::Nmi => self.read_address(NMI_VECTOR),
            Interrupt::Irq | Interrupt::Break => self.read_address(IRQ_VECTOR),
        };
    }

    fn execute_implied(&mut self, opcode: u8) -> bool {
        match opcode {
            0xEA => {} // NOP
            0x00 => self.interrupt_sequence(Interrupt::Break), // BRK
            0x20 => {
                // JSR pushes the address of its last operand byte
                let return_addr = self.pc.wrapping_add(1);
                self.push_stack((return_addr >> 8) as u8);
                self.push_stack(return_addr as u8);
                self.pc = self.read_address(self.pc);
            }
            0x60 => {
                // RTS
                let lo = self.pull_stack() as u16;
                let hi = self.pull_stack() as u16;
                self.pc = (hi << 8 | lo).wrapping_add(1);
            }
            0x40 => {
                // RTI
                let flags = self.pull_stack();
                self.set_status(flags);
                let lo = self.pull_stack() as u16;
                let hi = self.pull_stack() as u16;
                self.pc = hi << 8 | lo;
            }
            0x4C => self.pc = self.read_address(self.pc), // JMP
            0x6C => {
                // JMP (indirect): a vector starting at the last byte of a
                // page wraps within that page instead of carrying
                let location = self.read_address(self.pc);
                let page = location & 0xFF00;
                let lo = self.bus.read(location) as u16;
                let hi = self.bus.read(page | (location.wrapping_add(1) & 0xFF)) as u16;
                self.pc = hi << 8 | lo;
            }
            0x08 => {
                // PHP pushes with the B flag set, no matter what
                let flags = self.status | FLAG_BREAK | FLAG_UNUSED;
                self.push_stack(flags);
            }
            0x28 => {
                // PLP
                let flags = self.pull_stack();
                self.set_status(flags);
            }
            0x48 => self.push_stack(self.a), // PHA
            0x68 => {
                // PLA
                self.a = self.pull_stack();
                self.set_zn(self.a);
            }
            0x88 => {
                // DEY
                self.y = self.y.wrapping_sub(1);
                self.set_zn(self.y);
            }
            0xCA => {
                // DEX
                self.x = self.x.wrapping_sub(1);
                self.set_zn(self.x);
            }
            0xA8 => {
                // TAY
                self.y = self.a;
                self.set_zn(self.y);
            }
            0xC8 => {
                // INY
                self.y = self.y.wrapping_add(1);
                self.set_zn(self.y);
            }
            0xE8 => {
                // INX
                self.x = self.x.wrapping_add(1);
                self.set_zn(self.x);
            }
            0x18 => self.set_flag(FLAG_CARRY, false), // CLC
            0x38 => self.set_flag(FLAG_CARRY, true),  // SEC
            0x58 => self.set_flag(FLAG_INTERRUPT_DISABLE, false), // CLI
            0x78 => self.set_flag(FLAG_INTERRUPT_DISABLE, true),  // SEI
            0xD8 => self.set_flag(FLAG_DECIMAL, false), // CLD
            0xF8 => self.set_flag(FLAG_DECIMAL, true),  // SED
            0x98 => {
                // TYA
                self.a = self.y;
                self.set_zn(self.a);
            }
            0xB8 => self.set_flag(FLAG_OVERFLOW, false), // CLV
            0x8A => {
                // TXA
                self.a = self.x;
                self.set_zn(self.a);
            }
            0x9A => self.sp = self.x, // TXS
            0xAA => {
                // TAX
                self.x = self.a;
                self.set_zn(self.x);
            }
            0xBA => {
                // TSX
                self.x = self.sp;
                self.set_zn(self.x);
            }
            _ => return false,
        }
        true
    }

    fn execute_branch(&mut self, opcode: u8) -> bool {
        if opcode & BRANCH_INSTRUCTION_MASK != BRANCH_INSTRUCTION_RESULT {
            return false;
        }

        let expected = opcode & BRANCH_CONDITION_MASK != 0;
        let flag = match opcode >> BRANCH_ON_FLAG_SHIFT {
            0 => self.status & FLAG_NEGATIVE != 0,
            1 => self.status & FLAG_OVERFLOW != 0,
            2 => self.status & FLAG_CARRY != 0,
            _ => self.status & FLAG_ZERO != 0,
        };

        if flag == expected {
            let offset = self.fetch_byte() as i8;
            // +1 taken, +1 more when the target is on another page
            self.extra_cycles += 1;
            let new_pc = self.pc.wrapping_add(offset as i16 as u16);
            self.set_page_crossed(self.pc, new_pc, 1);
            self.pc = new_pc;
        } else {
            self.pc = self.pc.wrapping_add(1);
        }
        true
    }

    fn execute_type1(&mut self, opcode: u8) -> bool {
        if opcode & INSTRUCTION_MODE_MASK != 0x1 {
            return false;
        }

        let op = (opcode & OPERATION_MASK) >> OPERATION_SHIFT;
        let mode = (opcode & ADDR_MODE_MASK) >> ADDR_MODE_SHIFT;
        // Stores never take the page-cross penalty
        let is_store = op == op1::STA;

        let location: u16 = match mode {
            addr1::INDEXED_INDIRECT_X => {
                let zero_addr = self.x.wrapping_add(self.fetch_byte());
                let lo = self.bus.read(zero_addr as u16) as u16;
                let hi = self.bus.read(zero_addr.wrapping_add(1) as u16) as u16;
                hi << 8 | lo
            }
            addr1::ZERO_PAGE => self.fetch_byte() as u16,
            addr1::IMMEDIATE => {
                let location = self.pc;
                self.pc = self.pc.wrapping_add(1);
                location
            }
            addr1::ABSOLUTE => {
                let location = self.read_address(self.pc);
                self.pc = self.pc.wrapping_add(2);
                location
            }
            addr1::INDIRECT_Y => {
                let zero_addr = self.fetch_byte();
                let lo = self.bus.read(zero_addr as u16) as u16;
                let hi = self.bus.read(zero_addr.wrapping_add(1) as u16) as u16;
                let base = hi << 8 | lo;
                let location = base.wrapping_add(self.y as u16);
                if !is_store {
                    self.set_page_crossed(base, location, 1);
                }
                location
            }
            addr1::INDEXED_X => (self.fetch_byte().wrapping_add(self.x)) as u16,
            addr1::ABSOLUTE_Y => {
                let base = self.read_address(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let location = base.wrapping_add(self.y as u16);
                if !is_store {
                    self.set_page_crossed(base, location, 1);
                }
                location
            }
            addr1::ABSOLUTE_X => {
                let base = self.read_address(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let location = base.wrapping_add(self.x as u16);
                if !is_store {
                    self.set_page_crossed(base, location, 1);
                }
                location
            }
            _ => unreachable!(), // bbb is 3 bits wide
        };

        match op {
            op1::ORA => {
                self.a |= self.bus.read(location);
                self.set_zn(self.a);
            }
            op1::AND => {
                self.a &= self.bus.read(location);
                self.set_zn(self.a);
            }
            op1::EOR => {
                self.a ^= self.bus.read(location);
                self.set_zn(self.a);
            }
            op1::ADC => {
                let operand = self.bus.read(location) as u16;
                let sum = self.a as u16 + operand + (self.status & FLAG_CARRY) as u16;
                self.set_flag(FLAG_CARRY, sum & 0x100 != 0);
                // Signed overflow: the sum's sign differs from both operands'
                self.set_flag(
                    FLAG_OVERFLOW,
                    (self.a as u16 ^ sum) & (operand ^ sum) & 0x80 != 0,
                );
                self.a = sum as u8;
                self.set_zn(self.a);
            }
            op1::STA => self.bus.write(location, self.a),
            op1::LDA => {
                self.a = self.bus.read(location);
                self.set_zn(self.a);
            }
            op1::CMP => {
                let diff = (self.a as u16).wrapping_sub(self.bus.read(location) as u16);
                self.set_flag(FLAG_CARRY, diff & 0x100 == 0);
                self.set_zn(diff as u8);
            }
            op1::SBC => {
                // Carry high means "no borrow"
                let operand = self.bus.read(location) as u16;
                let borrow = u16::from(self.status & FLAG_CARRY == 0);
                let diff = (self.a as u16).wrapping_sub(operand).wrapping_sub(borrow);
                self.set_flag(FLAG_CARRY, diff & 0x100 == 0);
                self.set_flag(
                    FLAG_OVERFLOW,
                    (self.a as u16 ^ diff) & (!operand ^ diff) & 0x80 != 0,
                );
                self.a = diff as u8;
                self.set_zn(self.a);
            }
            _ => unreachable!(), // aaa is 3 bits wide
        }
        true
    }

    fn execute_type2(&mut self, opcode: u8) -> bool {
        if opcode & INSTRUCTION_MODE_MASK != 0x2 {
            return false;
        }

        let op = (opcode & OPERATION_MASK) >> OPERATION_SHIFT;
        let mode = (opcode & ADDR_MODE_MASK) >> ADDR_MODE_SHIFT;

        let location: u16 = match mode {
            addr2::IMMEDIATE => {
                let location = self.pc;
                self.pc = self.pc.wrapping_add(1);
                location
            }
            addr2::ZERO_PAGE => self.fetch_byte() as u16,
            addr2::ACCUMULATOR => 0,
            addr2::ABSOLUTE => {
                let location = self.read_address(self.pc);
                self.pc = self.pc.wrapping_add(2);
                location
            }
            addr2::INDEXED => {
                // X/Y-indexed ops use Y for the X-register instructions
                let index = if op == op2::LDX || op == op2::STX {
                    self.y
                } else {
                    self.x
                };
                (self.fetch_byte().wrapping_add(index)) as u16
            }
            addr2::ABSOLUTE_INDEXED => {
                let index = if op == op2::LDX || op == op2::STX {
                    self.y
                } else {
                    self.x
                };
                let base = self.read_address(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let location = base.wrapping_add(index as u16);
                // Only the read op pays the page-cross penalty
                if op == op2::LDX {
                    self.set_page_crossed(base, location, 1);
                }
                location
            }
            _ => return false,
        };

        let accumulator = mode == addr2::ACCUMULATOR;
        match op {
            op2::ASL | op2::ROL => {
                let rotate = op == op2::ROL;
                let prev_carry = self.status & FLAG_CARRY != 0;
                if accumulator {
                    self.set_flag(FLAG_CARRY, self.a & 0x80 != 0);
                    self.a = (self.a << 1) | u8::from(prev_carry && rotate);
                    self.set_zn(self.a);
                } else {
                    let operand = self.bus.read(location);
                    self.set_flag(FLAG_CARRY, operand & 0x80 != 0);
                    let result = (operand << 1) | u8::from(prev_carry && rotate);
                    self.set_zn(result);
                    self.bus.write(location, result);
                }
            }
            op2::LSR | op2::ROR => {
                let rotate = op == op2::ROR;
                let prev_carry = self.status & FLAG_CARRY != 0;
                if accumulator {
                    self.set_flag(FLAG_CARRY, self.a & 0x01 != 0);
                    self.a = (self.a >> 1) | (u8::from(prev_carry && rotate) << 7);
                    self.set_zn(self.a);
                } else {
                    let operand = self.bus.read(location);
                    self.set_flag(FLAG_CARRY, operand & 0x01 != 0);
                    let result = (operand >> 1) | (u8::from(prev_carry && rotate) << 7);
                    self.set_zn(result);
                    self.bus.write(location, result);
                }
            }
            op2::STX => self.bus.write(location, self.x),
            op2::LDX => {
                self.x = self.bus.read(location);
                self.set_zn(self.x);
            }
            op2::DEC => {
                let result = self.bus.read(location).wrapping_sub(1);
                self.set_zn(result);
                self.bus.write(location, result);
            }
            op2::INC => {
                let result = self.bus.read(location).wrapping_add(1);
                self.set_zn(result);
                self.bus.write(location, result);
            }
            _ => return false,
        }
        true
    }

    fn execute_type0(&mut self, opcode: u8) -> bool {
        if opcode & INSTRUCTION_MODE_MASK != 0x0 {
            return false;
        }

        let op = (opcode & OPERATION_MASK) >> OPERATION_SHIFT;
        let mode = (opcode & ADDR_MODE_MASK) >> ADDR_MODE_SHIFT;

        let location: u16 = match mode {
            addr2::IMMEDIATE => {
                let location = self.pc;
                self.pc = self.pc.wrapping_add(1);
                location
            }
            addr2::ZERO_PAGE => self.fetch_byte() as u16,
            addr2::ABSOLUTE => {
                let location = self.read_address(self.pc);
                self.pc = self.pc.wrapping_add(2);
                location
            }
            addr2::INDEXED => (self.fetch_byte().wrapping_add(self.x)) as u16,
            addr2::ABSOLUTE_INDEXED => {
                let base = self.read_address(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let location = base.wrapping_add(self.x as u16);
                self.set_page_crossed(base, location, 1);
                location
            }
            _ => return false,
        };

        match op {
            op0::BIT => {
                let operand = self.bus.read(location);
                self.set_flag(FLAG_ZERO, self.a & operand == 0);
                self.set_flag(FLAG_OVERFLOW, operand & 0x40 != 0);
                self.set_flag(FLAG_NEGATIVE, operand & 0x80 != 0);
            }
            op0::STY => self.bus.write(location, self.y),
            op0::LDY => {
                self.y = self.bus.read(location);
                self.set_zn(self.y);
            }
            op0::CPY => {
                let diff = (self.y as u16).wrapping_sub(self.bus.read(location) as u16);
                self.set_flag(FLAG_CARRY, diff & 0x100 == 0);
                self.set_zn(diff as u8);
            }
            op0::CPX => {
                let diff = (self.x as u16).wrapping_sub(self.bus.read(location) as u16);
                self.set_flag(FLAG_CARRY, diff & 0x100 == 0);
                self.set_zn(diff as u8);
            }
            _ => return false,
        }
        true
    }

    fn fetch_byte(&mut self) -> u8 {
        let byte = self.bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    /// Read a little-endian 16-bit address.
    fn read_address(&mut self, addr: u16) -> u16 {
        let lo = self.bus.read(addr) as u16;
        let hi = self.bus.read(addr.wrapping_add(1)) as u16;
        hi << 8 | lo
    }

    fn push_stack(&mut self, value: u8) {
        self.bus.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull_stack(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.bus.read(0x0100 | self.sp as u16)
    }

    /// Charge `penalty` cycles when `a` and `b` sit on different pages.
    fn set_page_crossed(&mut self, a: u16, b: u16, penalty: usize) {
        if a & 0xFF00 != b & 0xFF00 {
            self.extra_cycles += penalty;
        }
    }

    fn set_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }

    /// Replace the status byte from a stack image; B is discarded and the
    /// unused bit forced high.
    fn set_status(&mut self, flags: u8) {
        self.status = (flags & !FLAG_BREAK) | FLAG_UNUSED;
    }

    fn set_zn(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }
}
