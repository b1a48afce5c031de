//! # Increment and Decrement Instructions
//!
//! INC/DEC read-modify-write memory; INX, INY, DEX and DEY work on the index
//! registers. All wrap modulo 256 and update Z and N.

use crate::addressing::AddressingMode;
use crate::cpu::Cpu;
use crate::memory::MemoryBus;

pub(crate) fn inc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    modify(cpu, mode, |value| value.wrapping_add(1));
}

pub(crate) fn dec<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    modify(cpu, mode, |value| value.wrapping_sub(1));
}

fn modify<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, op: impl Fn(u8) -> u8) {
    let addr = cpu.operand_address(mode);
    let result = op(cpu.memory.read(addr));
    cpu.memory.write(addr, result);
    cpu.set_zn(result);
}

pub(crate) fn inx<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.set_zn(cpu.regs.x);
}

pub(crate) fn iny<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.set_zn(cpu.regs.y);
}

pub(crate) fn dex<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.set_zn(cpu.regs.x);
}

pub(crate) fn dey<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.set_zn(cpu.regs.y);
}
