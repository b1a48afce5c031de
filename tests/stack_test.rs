//! Tests for stack instructions: PHA, PLA, PHP, PLP, JSR, RTS, TSX, TXS.
//!
//! The stack lives in page 1 and grows downward; SP wraps within the page.

use kit6502::{Cpu, FlatMemory};

/// Helper function to create a CPU with PC at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut cpu = Cpu::new(FlatMemory::new());
    cpu.set_pc(0x8000);
    cpu
}

// ========== PHA / PLA ==========

#[test]
fn test_pha_pushes_accumulator() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x48);
    cpu.set_a(0x42);

    let result = cpu.step();

    assert_eq!(cpu.read_byte(0x01FF), 0x42);
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(result.cycles, 3);
}

#[test]
fn test_pla_pulls_and_sets_flags() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x68);
    cpu.write_byte(0x01FF, 0x80);
    cpu.set_sp(0xFE);

    let result = cpu.step();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(result.cycles, 4);
}

#[test]
fn test_pha_pla_round_trip() {
    let mut cpu = setup_cpu();
    // PHA; LDA #$00; PLA
    cpu.load(&[0x48, 0xA9, 0x00, 0x68], 0x8000).unwrap();
    cpu.set_a(0x37);

    cpu.step();
    cpu.step();
    assert!(cpu.flag_z());
    cpu.step();

    assert_eq!(cpu.a(), 0x37);
    assert!(!cpu.flag_z());
}

// ========== PHP / PLP ==========

#[test]
fn test_php_sets_break_and_unused_in_pushed_copy() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x08);
    cpu.set_status(0x01);

    let result = cpu.step();

    assert_eq!(cpu.read_byte(0x01FF), 0x31);
    // Live register unchanged
    assert_eq!(cpu.status(), 0x01);
    assert_eq!(result.cycles, 3);
}

#[test]
fn test_plp_restores_flags_and_forces_unused() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x28);
    cpu.write_byte(0x01FF, 0xC3);
    cpu.set_sp(0xFE);

    let result = cpu.step();

    assert_eq!(cpu.status(), 0xE3);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(result.cycles, 4);
}

// ========== JSR / RTS ==========

#[test]
fn test_jsr_pushes_return_minus_one() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x20);
    cpu.write_word(0x8001, 0x9000);

    let result = cpu.step();

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.read_byte(0x01FF), 0x80);
    assert_eq!(cpu.read_byte(0x01FE), 0x02);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(result.cycles, 6);
}

#[test]
fn test_jsr_rts_round_trip() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x20);
    cpu.write_word(0x8001, 0x9000);
    cpu.write_byte(0x9000, 0x60);

    cpu.step();
    let result = cpu.step();

    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(result.cycles, 6);
}

// ========== TSX / TXS ==========

#[test]
fn test_tsx_sets_flags() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0xBA);
    cpu.set_sp(0x80);

    cpu.step();

    assert_eq!(cpu.x(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_txs_does_not_touch_flags() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x9A);
    cpu.set_x(0x00);
    cpu.set_flag_z(false);

    cpu.step();

    assert_eq!(cpu.sp(), 0x00);
    assert!(!cpu.flag_z());
}

// ========== Wrapping ==========

#[test]
fn test_push_wraps_below_page_one() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x48);
    cpu.set_sp(0x00);
    cpu.set_a(0x99);

    cpu.step();

    assert_eq!(cpu.read_byte(0x0100), 0x99);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_pull_wraps_above_page_one() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0x68);
    cpu.write_byte(0x0100, 0x55);
    cpu.set_sp(0xFF);

    cpu.step();

    assert_eq!(cpu.a(), 0x55);
    assert_eq!(cpu.sp(), 0x00);
}
