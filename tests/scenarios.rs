use nestalgic_mos6502::mos6502::{Bus, Memory, Status, StatusFlag, MOS6502};

/// A short program that sums the bytes at $00-$02 into A, storing the running total back
/// to $03 after each addition, then halts on a trailing BRK.
fn load_sum_program(memory: &mut Memory) {
    memory
        .load(
            &[
                0xA9, 0x00, // LDA #$00
                0x18, // CLC
                0x65, 0x00, // ADC $00
                0x65, 0x01, // ADC $01
                0x65, 0x02, // ADC $02
                0x85, 0x03, // STA $03
                0x00, // BRK
            ],
            0x8000,
        )
        .unwrap();
}

#[test]
fn end_to_end_sum_program_accumulates_and_writes_result() {
    let mut memory = Memory::new();
    load_sum_program(&mut memory);
    memory.load(&[0x05, 0x10, 0x20], 0x0000).unwrap();
    memory.write_u16(0xFFFC, 0x8000);
    memory.write_u16(0xFFFE, 0x9000); // IRQ/BRK vector, taken when the trailing BRK fires

    let mut cpu = MOS6502::new();
    cpu.reset(&memory);

    for _ in 0..7 {
        cpu.step(&mut memory).unwrap();
    }

    assert_eq!(memory.read_u8(0x0003), 0x35);
    assert_eq!(cpu.pc, 0x9000, "the trailing BRK should vector through the IRQ/BRK vector");
}

#[test]
fn with_reset_status_overrides_default_post_reset_flags() {
    let mut memory = Memory::new();
    memory.write_u16(0xFFFC, 0x1234);

    let mut cpu = MOS6502::new().with_reset_status(Status(0x20));
    cpu.reset(&memory);

    assert_eq!(cpu.pc, 0x1234);
    assert!(!cpu.p.get(StatusFlag::InterruptDisable));
    assert!(cpu.p.get(StatusFlag::Unused));
}

#[test]
fn load_past_address_space_fails_without_mutating_memory() {
    let mut memory = Memory::new();
    memory.write_u8(0xFFFE, 0xAB);

    let result = memory.load(&[1, 2, 3, 4], 0xFFFE);

    assert!(result.is_err());
    assert_eq!(memory.read_u8(0xFFFE), 0xAB, "a failed load must not partially write");
}

#[test]
fn dump_hex_round_trips_loaded_bytes() {
    let mut memory = Memory::new();
    memory.load(&[0xDE, 0xAD, 0xBE, 0xEF], 0x0000).unwrap();

    let dump = memory.dump_hex();
    assert!(dump.starts_with("de ad be ef "));
}

#[test]
fn nmi_takes_priority_over_pending_work_and_is_not_masked_by_interrupt_disable() {
    let mut memory = Memory::new();
    memory.write_u16(0xFFFA, 0x9000);
    memory.load(&[0x78], 0x8000).unwrap(); // SEI

    let mut cpu = MOS6502::new();
    cpu.pc = 0x8000;
    cpu.sp = 0xFF;

    cpu.step(&mut memory).unwrap(); // SEI sets I
    assert!(cpu.p.get(StatusFlag::InterruptDisable));

    cpu.nmi(&mut memory);

    assert_eq!(cpu.pc, 0x9000, "NMI must fire even while I is set");
}

#[test]
fn irq_is_a_no_op_while_interrupt_disable_is_set() {
    let mut memory = Memory::new();
    memory.write_u16(0xFFFE, 0x9000);

    let mut cpu = MOS6502::new();
    cpu.pc = 0x8000;
    cpu.sp = 0xFF;
    cpu.p.set(StatusFlag::InterruptDisable, true);

    cpu.irq(&mut memory);

    assert_eq!(cpu.pc, 0x8000, "a masked IRQ must not touch pc or the stack");
    assert_eq!(cpu.sp, 0xFF);
}

#[test]
fn clc_sec_round_trip_leaves_carry_in_expected_state() {
    let mut memory = Memory::new();
    memory.load(&[0x18, 0x38, 0x38, 0x18], 0x8000).unwrap();

    let mut cpu = MOS6502::new();
    cpu.pc = 0x8000;

    cpu.step(&mut memory).unwrap(); // CLC
    assert!(!cpu.p.get(StatusFlag::Carry));

    cpu.step(&mut memory).unwrap(); // SEC
    assert!(cpu.p.get(StatusFlag::Carry));

    cpu.step(&mut memory).unwrap(); // SEC
    assert!(cpu.p.get(StatusFlag::Carry));

    cpu.step(&mut memory).unwrap(); // CLC
    assert!(!cpu.p.get(StatusFlag::Carry));
}
