//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR operate on the accumulator or read-modify-write a
//! memory location. The bit shifted out lands in carry; Z and N follow the
//! result.

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, Status};
use crate::memory::MemoryBus;

pub(crate) fn asl<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    shift(cpu, mode, |value, _| (value << 1, value & 0x80 != 0));
}

pub(crate) fn lsr<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    shift(cpu, mode, |value, _| (value >> 1, value & 0x01 != 0));
}

pub(crate) fn rol<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    shift(cpu, mode, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

pub(crate) fn ror<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    shift(cpu, mode, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}

/// Applies `op(value, carry_in) -> (result, carry_out)` to A or memory.
fn shift<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    mode: AddressingMode,
    op: impl Fn(u8, bool) -> (u8, bool),
) {
    let carry_in = cpu.flag(Status::CARRY);

    let result = if mode == AddressingMode::Accumulator {
        let (result, carry_out) = op(cpu.regs.a, carry_in);
        cpu.regs.a = result;
        cpu.regs.status.set(Status::CARRY, carry_out);
        result
    } else {
        let addr = cpu.operand_address(mode);
        let (result, carry_out) = op(cpu.memory.read(addr), carry_in);
        cpu.memory.write(addr, result);
        cpu.regs.status.set(Status::CARRY, carry_out);
        result
    };

    cpu.set_zn(result);
}
