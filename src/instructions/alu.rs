//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC / SBC: Add and subtract with carry, binary or BCD
//! - AND / ORA / EOR: Bitwise logic on the accumulator
//! - CMP / CPX / CPY: Register comparison
//! - BIT: Bit test
//!
//! With the D flag set, ADC and SBC correct each nibble to a decimal digit and
//! propagate the carry between them. Z and N then follow the BCD result.

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, Status};
use crate::memory::MemoryBus;

/// ADC: adds the operand plus carry to the accumulator.
///
/// Sets C on unsigned overflow and V when two operands of the same sign
/// produce a result of the other sign.
pub(crate) fn adc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);

    if cpu.flag(Status::DECIMAL) {
        adc_decimal(cpu, value);
    } else {
        add_binary(cpu, value);
    }
}

/// SBC: subtracts the operand and the borrow (inverted carry) from A.
///
/// C ends up set when no borrow was needed.
pub(crate) fn sbc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);

    if cpu.flag(Status::DECIMAL) {
        sbc_decimal(cpu, value);
    } else {
        // A - M - (1 - C) == A + !M + C
        add_binary(cpu, !value);
    }
}

fn add_binary<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.regs.a;
    let sum = a as u16 + value as u16 + cpu.flag(Status::CARRY) as u16;
    let result = sum as u8;

    // Overflow: both inputs share a sign the result does not have
    let overflow = (a ^ result) & (value ^ result) & 0x80 != 0;

    cpu.regs.status.set(Status::CARRY, sum > 0xFF);
    cpu.regs.status.set(Status::OVERFLOW, overflow);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

fn adc_decimal<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.regs.a as u16;
    let m = value as u16;

    let mut lo = (a & 0x0F) + (m & 0x0F) + cpu.flag(Status::CARRY) as u16;
    let mut half_carry = 0;
    if lo > 9 {
        lo = (lo + 6) & 0x0F;
        half_carry = 1;
    }

    let mut hi = (a >> 4) + (m >> 4) + half_carry;

    // V is taken from the sum before the high digit is corrected
    let unadjusted = ((hi << 4) | lo) & 0xFF;
    let overflow = !(a ^ m) & (a ^ unadjusted) & 0x80 != 0;

    let carry = hi > 9;
    if carry {
        hi = (hi + 6) & 0x0F;
    }

    let result = ((hi << 4) | lo) as u8;
    cpu.regs.status.set(Status::CARRY, carry);
    cpu.regs.status.set(Status::OVERFLOW, overflow);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

fn sbc_decimal<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.regs.a;
    let borrow = !cpu.flag(Status::CARRY) as i16;

    // Carry and overflow match the binary subtraction
    let difference = a as i16 - value as i16 - borrow;
    let binary = difference as u8;
    let overflow = (a ^ value) & (a ^ binary) & 0x80 != 0;

    let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
    let mut hi = (a >> 4) as i16 - (value >> 4) as i16;
    if lo < 0 {
        lo += 10;
        hi -= 1;
    }
    if hi < 0 {
        hi += 10;
    }

    let result = (((hi & 0x0F) << 4) | (lo & 0x0F)) as u8;
    cpu.regs.status.set(Status::CARRY, difference >= 0);
    cpu.regs.status.set(Status::OVERFLOW, overflow);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

pub(crate) fn and<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let result = cpu.regs.a & cpu.read_operand(mode);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

pub(crate) fn ora<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let result = cpu.regs.a | cpu.read_operand(mode);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

pub(crate) fn eor<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let result = cpu.regs.a ^ cpu.read_operand(mode);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

pub(crate) fn cmp<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let register = cpu.regs.a;
    compare(cpu, mode, register);
}

pub(crate) fn cpx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let register = cpu.regs.x;
    compare(cpu, mode, register);
}

pub(crate) fn cpy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let register = cpu.regs.y;
    compare(cpu, mode, register);
}

/// Sets flags as for `register - operand` without storing the difference.
fn compare<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, register: u8) {
    let value = cpu.read_operand(mode);
    cpu.regs.status.set(Status::CARRY, register >= value);
    cpu.set_zn(register.wrapping_sub(value));
}

/// BIT: Z from `A & M`, N and V copied from bits 7 and 6 of the operand.
pub(crate) fn bit<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.regs.status.set(Status::ZERO, cpu.regs.a & value == 0);
    cpu.regs.status.set(Status::NEGATIVE, value & 0x80 != 0);
    cpu.regs.status.set(Status::OVERFLOW, value & 0x40 != 0);
}
