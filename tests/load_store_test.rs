//! Tests for loads and stores across addressing modes.
//!
//! Loads on indexed modes pay one extra cycle when indexing crosses a page;
//! stores always take their fixed cost.

use kit6502::{Cpu, FlatMemory};

/// Helper function to create a CPU with PC at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut cpu = Cpu::new(FlatMemory::new());
    cpu.set_pc(0x8000);
    cpu
}

// ========== Loads ==========

#[test]
fn test_lda_immediate_flags() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xA9, 0x00, 0xA9, 0x80], 0x8000).unwrap();

    cpu.step();
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());

    cpu.step();
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_lda_zero_page_x_wraps() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xB5, 0xF0], 0x8000).unwrap();
    cpu.write_byte(0x0010, 0x77);
    cpu.set_x(0x20);

    let result = cpu.step();

    assert_eq!(cpu.a(), 0x77);
    assert_eq!(result.cycles, 4);
}

#[test]
fn test_ldx_zero_page_y() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xB6, 0x10], 0x8000).unwrap();
    cpu.write_byte(0x0015, 0x12);
    cpu.set_y(0x05);

    cpu.step();

    assert_eq!(cpu.x(), 0x12);
}

#[test]
fn test_lda_absolute_y_penalty() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xB9, 0x80, 0x12, 0xB9, 0x10, 0x12], 0x8000).unwrap();
    cpu.write_byte(0x1300, 0xAA);
    cpu.write_byte(0x1290, 0xBB);
    cpu.set_y(0x80);

    assert_eq!(cpu.step().cycles, 5);
    assert_eq!(cpu.a(), 0xAA);

    assert_eq!(cpu.step().cycles, 4);
    assert_eq!(cpu.a(), 0xBB);
}

#[test]
fn test_ldy_absolute_x_penalty() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xBC, 0xFF, 0x20], 0x8000).unwrap();
    cpu.write_byte(0x2100, 0x09);
    cpu.set_x(0x01);

    assert_eq!(cpu.step().cycles, 5);
    assert_eq!(cpu.y(), 0x09);
}

#[test]
fn test_lda_indexed_indirect() {
    let mut cpu = setup_cpu();
    // LDA ($00,X) with X=1 reads the pointer at $01
    cpu.load(&[0xA1, 0x00], 0x8000).unwrap();
    cpu.write_word(0x0001, 0x0705);
    cpu.write_byte(0x0705, 0x0A);
    cpu.set_x(0x01);

    let result = cpu.step();

    assert_eq!(cpu.a(), 0x0A);
    assert_eq!(result.cycles, 6);
}

#[test]
fn test_lda_indirect_indexed() {
    let mut cpu = setup_cpu();
    // LDA ($01),Y with Y=1 reads $0703 + 1
    cpu.load(&[0xB1, 0x01], 0x8000).unwrap();
    cpu.write_word(0x0001, 0x0703);
    cpu.write_byte(0x0704, 0x0A);
    cpu.set_y(0x01);

    let result = cpu.step();

    assert_eq!(cpu.a(), 0x0A);
    assert_eq!(result.cycles, 5);
}

#[test]
fn test_indirect_pointer_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xB1, 0xFF], 0x8000).unwrap();
    cpu.write_byte(0x00FF, 0x00);
    cpu.write_byte(0x0000, 0x30);
    cpu.write_byte(0x3000, 0x66);

    cpu.step();

    assert_eq!(cpu.a(), 0x66);
}

// ========== Stores ==========

#[test]
fn test_sta_absolute_x_has_no_penalty() {
    let mut cpu = setup_cpu();
    cpu.load(&[0x9D, 0xFF, 0x12], 0x8000).unwrap();
    cpu.set_a(0x42);
    cpu.set_x(0x01);

    let result = cpu.step();

    assert_eq!(cpu.read_byte(0x1300), 0x42);
    assert_eq!(result.cycles, 5);
}

#[test]
fn test_sta_indirect_indexed_has_no_penalty() {
    let mut cpu = setup_cpu();
    cpu.load(&[0x91, 0x10], 0x8000).unwrap();
    cpu.write_word(0x0010, 0x12FF);
    cpu.set_a(0x42);
    cpu.set_y(0x01);

    let result = cpu.step();

    assert_eq!(cpu.read_byte(0x1300), 0x42);
    assert_eq!(result.cycles, 6);
}

#[test]
fn test_stx_sty_do_not_touch_flags() {
    let mut cpu = setup_cpu();
    cpu.load(&[0x86, 0x10, 0x8C, 0x00, 0x02], 0x8000).unwrap();
    cpu.set_x(0x00);
    cpu.set_y(0x80);
    cpu.set_flag_z(false);
    cpu.set_flag_n(false);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.read_byte(0x0200), 0x80);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 3 + 4);
}
