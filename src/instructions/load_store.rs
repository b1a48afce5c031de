//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register
//!
//! Loads update Z and N. Stores affect no flags and never pay the
//! page-crossing cycle; their indexed forms already include it in the base
//! cost.

use crate::addressing::AddressingMode;
use crate::cpu::Cpu;
use crate::memory::MemoryBus;

pub(crate) fn lda<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.regs.a = value;
    cpu.set_zn(value);
}

pub(crate) fn ldx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.regs.x = value;
    cpu.set_zn(value);
}

pub(crate) fn ldy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.regs.y = value;
    cpu.set_zn(value);
}

pub(crate) fn sta<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.regs.a);
}

pub(crate) fn stx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.regs.x);
}

pub(crate) fn sty<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.regs.y);
}
