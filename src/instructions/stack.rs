//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA / PLA: Push and pull the accumulator
//! - PHP / PLP: Push and pull the status register
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP, and SP wraps
//! within the page on overflow and underflow.

use crate::cpu::{Cpu, Status};
use crate::memory::MemoryBus;

pub(crate) fn pha<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.push(cpu.regs.a);
}

/// PHP always pushes B and the unused bit set.
pub(crate) fn php<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let status = cpu.regs.status | Status::BREAK | Status::UNUSED;
    cpu.push(status.bits());
}

pub(crate) fn pla<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let value = cpu.pull();
    cpu.regs.a = value;
    cpu.set_zn(value);
}

pub(crate) fn plp<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let status = cpu.pull();
    cpu.regs.status = Status::from_bits_retain(status) | Status::UNUSED;
}
