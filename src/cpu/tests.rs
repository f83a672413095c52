use crate::bus::Bus;
use crate::cpu::cpu::Cpu;
use crate::cpu::flags::{FLAG_CARRY, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW, FLAG_ZERO};

/// Flat 64 KiB memory with manually raised interrupt lines.
struct TestBus {
    mem: [u8; 65536],
    nmi: bool,
    irq: bool,
}

impl TestBus {
    fn new() -> Self {
        Self {
            mem: [0; 65536],
            nmi: false,
            irq: false,
        }
    }
}

impl Bus for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.mem[addr as usize] = data;
    }

    fn tick(&mut self, _cycles: usize) {}

    fn poll_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi)
    }

    fn poll_irq(&mut self) -> bool {
        std::mem::take(&mut self.irq)
    }
}

/// CPU with the program loaded at $8000 and the reset vector pointing at it.
fn cpu_with_program(program: &[u8]) -> Cpu<TestBus> {
    let mut bus = TestBus::new();
    bus.mem[0x8000..0x8000 + program.len()].copy_from_slice(program);
    bus.mem[0xFFFC] = 0x00;
    bus.mem[0xFFFD] = 0x80;
    let mut cpu = Cpu::new(bus);
    cpu.reset();
    cpu
}

#[test]
fn reset_primes_pc_from_vector() {
    let cpu = cpu_with_program(&[]);
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.sp, 0xFD);
    assert!(cpu.status & FLAG_INTERRUPT_DISABLE != 0);
}

#[test]
fn lda_immediate_loads_value() {
    let mut cpu = cpu_with_program(&[0xA9, 0x42]); // LDA #$42
    cpu.step();
    assert_eq!(cpu.a, 0x42);
}

#[test]
fn lda_sets_zero_and_negative_flags() {
    let mut cpu = cpu_with_program(&[0xA9, 0x00, 0xA9, 0x80]);
    cpu.step();
    assert!(cpu.status & FLAG_ZERO != 0);
    cpu.step();
    assert!(cpu.status & FLAG_NEGATIVE != 0);
    assert!(cpu.status & FLAG_ZERO == 0);
}

#[test]
fn tax_transfers_a_to_x() {
    let mut cpu = cpu_with_program(&[0xA9, 0x10, 0xAA]); // LDA #$10; TAX
    cpu.step();
    cpu.step();
    assert_eq!(cpu.x, 0x10);
}

#[test]
fn sta_writes_to_memory() {
    let mut cpu = cpu_with_program(&[0xA9, 0x33, 0x8D, 0x00, 0x02]); // LDA; STA $0200
    cpu.step();
    cpu.step();
    assert_eq!(cpu.bus.mem[0x0200], 0x33);
}

#[test]
fn jmp_changes_program_counter() {
    let mut cpu = cpu_with_program(&[0x4C, 0x00, 0x90]); // JMP $9000
    cpu.bus.mem[0x9000] = 0xA9; // LDA #$55
    cpu.bus.mem[0x9001] = 0x55;
    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0x55);
}

#[test]
fn jmp_indirect_wraps_within_page() {
    // Vector at $02FF: low byte from $02FF, high byte from $0200 (not $0300)
    let mut cpu = cpu_with_program(&[0x6C, 0xFF, 0x02]);
    cpu.bus.mem[0x02FF] = 0x34;
    cpu.bus.mem[0x0200] = 0x12;
    cpu.bus.mem[0x0300] = 0x77; // must be ignored
    cpu.step();
    assert_eq!(cpu.pc, 0x1234);
}

#[test]
fn bne_loops_until_zero() {
    // LDX #3; DEX; BNE -3
    let mut cpu = cpu_with_program(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD]);
    for _ in 0..7 {
        cpu.step();
    }
    assert_eq!(cpu.x, 0x00);
}

#[test]
fn jsr_and_rts_round_trip() {
    let mut cpu = cpu_with_program(&[0x20, 0x00, 0x90, 0xA9, 0x11]); // JSR $9000; LDA #$11
    cpu.bus.mem[0x9000] = 0xA9; // LDA #$22
    cpu.bus.mem[0x9001] = 0x22;
    cpu.bus.mem[0x9002] = 0x60; // RTS
    cpu.step(); // JSR
    cpu.step(); // LDA #$22
    assert_eq!(cpu.a, 0x22);
    cpu.step(); // RTS
    cpu.step(); // LDA #$11
    assert_eq!(cpu.a, 0x11);
}

#[test]
fn brk_vectors_through_irq_and_sets_interrupt_disable() {
    let mut cpu = cpu_with_program(&[0x00]);
    cpu.bus.mem[0xFFFE] = 0x00;
    cpu.bus.mem[0xFFFF] = 0x90;
    cpu.step();
    assert_eq!(cpu.pc, 0x9000);
    assert!(cpu.status & FLAG_INTERRUPT_DISABLE != 0);
}

#[test]
fn adc_sets_carry_and_overflow() {
    // LDA #$7F; ADC #$01 -> $80, overflow, no carry
    let mut cpu = cpu_with_program(&[0xA9, 0x7F, 0x69, 0x01]);
    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0x80);
    assert!(cpu.status & FLAG_OVERFLOW != 0);
    assert!(cpu.status & FLAG_CARRY == 0);

    // LDA #$FF; ADC #$02 -> $01 with carry out
    let mut cpu = cpu_with_program(&[0xA9, 0xFF, 0x69, 0x02]);
    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0x01);
    assert!(cpu.status & FLAG_CARRY != 0);
    assert!(cpu.status & FLAG_OVERFLOW == 0);
}

#[test]
fn sbc_handles_borrow() {
    // SEC; LDA #$10; SBC #$08 -> $08 with carry still set
    let mut cpu = cpu_with_program(&[0x38, 0xA9, 0x10, 0xE9, 0x08]);
    cpu.step();
    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0x08);
    assert!(cpu.status & FLAG_CARRY != 0);

    // CLC; LDA #$00; SBC #$00 -> $FF (borrow consumed)
    let mut cpu = cpu_with_program(&[0x18, 0xA9, 0x00, 0xE9, 0x00]);
    cpu.step();
    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0xFF);
    assert!(cpu.status & FLAG_CARRY == 0);
}

#[test]
fn ror_accumulator_rotates_through_carry() {
    // SEC; LDA #$02; ROR A -> $81, carry clear
    let mut cpu = cpu_with_program(&[0x38, 0xA9, 0x02, 0x6A]);
    cpu.step();
    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0x81);
    assert!(cpu.status & FLAG_CARRY == 0);
}

#[test]
fn inc_memory_and_flags() {
    let mut cpu = cpu_with_program(&[0xEE, 0x00, 0x02]); // INC $0200
    cpu.bus.mem[0x0200] = 0xFF;
    cpu.step();
    assert_eq!(cpu.bus.mem[0x0200], 0x00);
    assert!(cpu.status & FLAG_ZERO != 0);
}

#[test]
fn base_cycle_counts() {
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0x8D, 0x00, 0x02]);
    assert_eq!(cpu.step(), 2); // LDA immediate
    assert_eq!(cpu.step(), 4); // STA absolute
}

#[test]
fn page_cross_adds_a_cycle_on_indexed_reads() {
    // LDX #$01; LDA $80FF,X crosses into $8100
    let mut cpu = cpu_with_program(&[0xA2, 0x01, 0xBD, 0xFF, 0x80]);
    cpu.step();
    assert_eq!(cpu.step(), 5);

    // Same read without a crossing costs the base 4
    let mut cpu = cpu_with_program(&[0xA2, 0x01, 0xBD, 0x00, 0x81]);
    cpu.step();
    assert_eq!(cpu.step(), 4);
}

#[test]
fn stores_never_pay_the_page_cross_penalty() {
    let mut cpu = cpu_with_program(&[0xA2, 0x01, 0x9D, 0xFF, 0x80]); // STA $80FF,X
    cpu.step();
    assert_eq!(cpu.step(), 5);
}

#[test]
fn branch_timing_not_taken_taken_and_page_cross() {
    // BNE with Z set: not taken, base 2
    let mut cpu = cpu_with_program(&[0xA9, 0x00, 0xD0, 0x10]);
    cpu.step();
    assert_eq!(cpu.step(), 2);

    // Taken branch within the page: 3
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0xD0, 0x10]);
    cpu.step();
    assert_eq!(cpu.step(), 3);

    // Taken branch crossing a page (backwards past $8000): 4
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0xD0, 0x80]);
    cpu.step();
    assert_eq!(cpu.step(), 4);
}

#[test]
fn unassigned_opcode_is_a_two_cycle_no_op() {
    let mut cpu = cpu_with_program(&[0x02, 0xA9, 0x42]);
    assert_eq!(cpu.step(), 2);
    cpu.step();
    assert_eq!(cpu.a, 0x42);
}

#[test]
fn nmi_is_serviced_at_the_next_instruction_boundary() {
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0xA9, 0x02]);
    cpu.bus.mem[0xFFFA] = 0x00;
    cpu.bus.mem[0xFFFB] = 0x95;
    cpu.step();
    cpu.bus.nmi = true;
    let cycles = cpu.step(); // services the NMI instead of LDA #$02
    assert_eq!(cycles, 7);
    assert_eq!(cpu.pc, 0x9500);
    assert_eq!(cpu.a, 0x01);
    assert!(cpu.status & FLAG_INTERRUPT_DISABLE != 0);
}

#[test]
fn irq_respects_and_outlives_the_interrupt_disable_flag() {
    // CLI; LDA #$01; LDA #$02 ...
    let mut cpu = cpu_with_program(&[0x58, 0xA9, 0x01, 0xA9, 0x02]);
    cpu.bus.mem[0xFFFE] = 0x00;
    cpu.bus.mem[0xFFFF] = 0x96;

    // Raised while I is still set: stays latched
    cpu.bus.irq = true;
    cpu.step(); // CLI
    assert_ne!(cpu.pc, 0x9600);

    // Next boundary has I clear: latched request fires
    cpu.step();
    assert_eq!(cpu.pc, 0x9600);
}

#[test]
fn rti_returns_to_the_interrupted_instruction() {
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0xA9, 0x02]);
    cpu.bus.mem[0xFFFA] = 0x00;
    cpu.bus.mem[0xFFFB] = 0x95;
    cpu.bus.mem[0x9500] = 0x40; // RTI
    cpu.step();
    cpu.bus.nmi = true;
    cpu.step(); // NMI
    cpu.step(); // RTI
    cpu.step(); // LDA #$02 resumes
    assert_eq!(cpu.a, 0x02);
}

#[test]
fn php_plp_round_trips_flags() {
    // SEC; PHP; CLC; PLP -> carry restored
    let mut cpu = cpu_with_program(&[0x38, 0x08, 0x18, 0x28]);
    for _ in 0..4 {
        cpu.step();
    }
    assert!(cpu.status & FLAG_CARRY != 0);
}

#[test]
fn indexed_indirect_and_indirect_indexed_addressing() {
    // LDX #$04; LDA ($20,X) -> pointer at $24
    let mut cpu = cpu_with_program(&[0xA2, 0x04, 0xA1, 0x20]);
    cpu.bus.mem[0x0024] = 0x00;
    cpu.bus.mem[0x0025] = 0x03;
    cpu.bus.mem[0x0300] = 0x5A;
    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0x5A);

    // LDY #$01; LDA ($30),Y
    let mut cpu = cpu_with_program(&[0xA0, 0x01, 0xB1, 0x30]);
    cpu.bus.mem[0x0030] = 0xFF;
    cpu.bus.mem[0x0031] = 0x03;
    cpu.bus.mem[0x0400] = 0xC3;
    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0xC3);
}
