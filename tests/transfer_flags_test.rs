//! Tests for register transfers, flag instructions and NOP.

use kit6502::{Cpu, FlatMemory};

/// Helper function to create a CPU with PC at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut cpu = Cpu::new(FlatMemory::new());
    cpu.set_pc(0x8000);
    cpu
}

// ========== Transfers ==========

#[test]
fn test_tax_tay() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xAA, 0xA8], 0x8000).unwrap();
    cpu.set_a(0x80);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.x(), 0x80);
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_txa_tya() {
    let mut cpu = setup_cpu();
    cpu.load(&[0x8A, 0x98], 0x8000).unwrap();
    cpu.set_x(0x00);
    cpu.set_y(0x05);

    cpu.step();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());

    cpu.step();
    assert_eq!(cpu.a(), 0x05);
    assert!(!cpu.flag_z());
}

// ========== Flags ==========

#[test]
fn test_set_and_clear_flags() {
    let mut cpu = setup_cpu();
    // SEC; SED; SEI; CLC; CLD; CLI
    cpu.load(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58], 0x8000).unwrap();

    cpu.step();
    cpu.step();
    cpu.step();
    assert!(cpu.flag_c());
    assert!(cpu.flag_d());
    assert!(cpu.flag_i());

    cpu.step();
    cpu.step();
    cpu.step();
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_d());
    assert!(!cpu.flag_i());
    assert_eq!(cpu.cycles(), 12);
}

#[test]
fn test_clv() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0xB8);
    cpu.set_flag_v(true);

    cpu.step();

    assert!(!cpu.flag_v());
}

// ========== NOP / Undefined ==========

#[test]
fn test_nop() {
    let mut cpu = setup_cpu();
    cpu.write_byte(0x8000, 0xEA);
    let before = cpu.registers();

    let result = cpu.step();

    assert_eq!(result.cycles, 2);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.a(), before.a);
    assert_eq!(cpu.status(), before.status.bits());
}

#[test]
fn test_undefined_opcode_is_single_byte_noop() {
    let mut cpu = setup_cpu();
    cpu.load(&[0x02, 0xFF], 0x8000).unwrap();
    cpu.set_a(0x12);

    let result = cpu.step();

    assert_eq!(result.cycles, 2);
    assert!(!result.is_break);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.a(), 0x12);
}
