//! Tests for the conditional branch instructions.
//!
//! Branches cost 2 cycles when not taken, 3 when taken, and 4 when the
//! target lies on a different page than the next instruction.

use kit6502::{Cpu, FlatMemory};

/// Helper function to create a CPU with PC at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut cpu = Cpu::new(FlatMemory::new());
    cpu.set_pc(0x8000);
    cpu
}

/// Opcode, flag setter, and the flag value that makes the branch taken.
type BranchCase = (u8, fn(&mut Cpu<FlatMemory>, bool), bool);

const BRANCHES: [BranchCase; 8] = [
    (0x10, Cpu::<FlatMemory>::set_flag_n, false), // BPL
    (0x30, Cpu::<FlatMemory>::set_flag_n, true),  // BMI
    (0x50, Cpu::<FlatMemory>::set_flag_v, false), // BVC
    (0x70, Cpu::<FlatMemory>::set_flag_v, true),  // BVS
    (0x90, Cpu::<FlatMemory>::set_flag_c, false), // BCC
    (0xB0, Cpu::<FlatMemory>::set_flag_c, true),  // BCS
    (0xD0, Cpu::<FlatMemory>::set_flag_z, false), // BNE
    (0xF0, Cpu::<FlatMemory>::set_flag_z, true),  // BEQ
];

// ========== Taken / Not Taken ==========

#[test]
fn test_every_branch_not_taken() {
    for (opcode, set_flag, taken_when) in BRANCHES {
        let mut cpu = setup_cpu();
        cpu.write_byte(0x8000, opcode);
        cpu.write_byte(0x8001, 0x10);
        set_flag(&mut cpu, !taken_when);

        let result = cpu.step();

        assert_eq!(cpu.pc(), 0x8002, "opcode {:02X}", opcode);
        assert_eq!(result.cycles, 2, "opcode {:02X}", opcode);
    }
}

#[test]
fn test_every_branch_taken() {
    for (opcode, set_flag, taken_when) in BRANCHES {
        let mut cpu = setup_cpu();
        cpu.write_byte(0x8000, opcode);
        cpu.write_byte(0x8001, 0x10);
        set_flag(&mut cpu, taken_when);

        let result = cpu.step();

        assert_eq!(cpu.pc(), 0x8012, "opcode {:02X}", opcode);
        assert_eq!(result.cycles, 3, "opcode {:02X}", opcode);
    }
}

// ========== Offsets ==========

#[test]
fn test_backward_branch() {
    let mut cpu = setup_cpu();
    cpu.set_pc(0x8010);
    // BNE -4
    cpu.write_byte(0x8010, 0xD0);
    cpu.write_byte(0x8011, 0xFC);
    cpu.set_flag_z(false);

    let result = cpu.step();

    assert_eq!(cpu.pc(), 0x800E);
    assert_eq!(result.cycles, 3);
}

#[test]
fn test_forward_page_cross() {
    let mut cpu = setup_cpu();
    cpu.set_pc(0x80F0);
    // BEQ +$10 from $80F2 lands on $8102
    cpu.write_byte(0x80F0, 0xF0);
    cpu.write_byte(0x80F1, 0x10);
    cpu.set_flag_z(true);

    let result = cpu.step();

    assert_eq!(cpu.pc(), 0x8102);
    assert_eq!(result.cycles, 4);
}

#[test]
fn test_backward_page_cross() {
    let mut cpu = setup_cpu();
    // BCS -128 from $8002 lands on $7F82
    cpu.write_byte(0x8000, 0xB0);
    cpu.write_byte(0x8001, 0x80);
    cpu.set_flag_c(true);

    let result = cpu.step();

    assert_eq!(cpu.pc(), 0x7F82);
    assert_eq!(result.cycles, 4);
}

#[test]
fn test_page_compare_uses_next_instruction_address() {
    let mut cpu = setup_cpu();
    // Opcode at $80FE, next instruction at $8100, target $8100
    cpu.set_pc(0x80FE);
    cpu.write_byte(0x80FE, 0xD0);
    cpu.write_byte(0x80FF, 0x00);
    cpu.set_flag_z(false);

    let result = cpu.step();

    assert_eq!(cpu.pc(), 0x8100);
    assert_eq!(result.cycles, 3);
}

#[test]
fn test_branch_wraps_address_space() {
    let mut cpu = setup_cpu();
    cpu.set_pc(0xFFF0);
    cpu.write_byte(0xFFF0, 0x90);
    cpu.write_byte(0xFFF1, 0x20);
    cpu.set_flag_c(false);

    cpu.step();

    assert_eq!(cpu.pc(), 0x0012);
}
