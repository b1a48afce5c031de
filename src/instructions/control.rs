//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump to address
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//!
//! BRK is a software interrupt that:
//! 1. Pushes the address of the byte after its padding byte (high byte first)
//! 2. Pushes processor status with B set
//! 3. Sets the I (interrupt disable) flag
//! 4. Loads PC from the IRQ vector at $FFFE/F
//!
//! The B flag stays set in the status register afterwards.

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, Status, IRQ_VECTOR};
use crate::memory::MemoryBus;

pub(crate) fn brk<M: MemoryBus>(cpu: &mut Cpu<M>) {
    // Skip the padding byte that follows the opcode
    let return_addr = cpu.regs.pc.wrapping_add(1);

    cpu.regs.status.insert(Status::BREAK);
    cpu.push_word(return_addr);
    let status = (cpu.regs.status | Status::UNUSED).bits();
    cpu.push(status);
    cpu.regs.status.insert(Status::INTERRUPT_DISABLE);

    cpu.regs.pc = cpu.memory.read_word(IRQ_VECTOR);
    cpu.break_taken = true;
}

/// JMP absolute or indirect. The indirect pointer never crosses a page.
pub(crate) fn jmp<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) {
    cpu.regs.pc = cpu.operand_address(mode);
}

/// JSR pushes the address of its own last byte, which RTS increments.
pub(crate) fn jsr<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let target = cpu.fetch_word();
    let return_addr = cpu.regs.pc.wrapping_sub(1);
    cpu.push_word(return_addr);
    cpu.regs.pc = target;
}

pub(crate) fn rts<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.pc = cpu.pull_word().wrapping_add(1);
}

/// RTI restores the status (unused bit forced on) then the program counter.
pub(crate) fn rti<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let status = cpu.pull();
    cpu.regs.status = Status::from_bits_retain(status) | Status::UNUSED;
    cpu.regs.pc = cpu.pull_word();
}
