//! # Branch Instructions
//!
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC and BVS all test one status flag.
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! from the address of the next instruction. Timing:
//! - 2 cycles if not taken
//! - 3 cycles if taken to the same page
//! - 4 cycles if taken to a different page

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, Status};
use crate::memory::MemoryBus;

/// Branches when `flag` is `expected`. No flags are affected.
pub(crate) fn branch_if<M: MemoryBus>(cpu: &mut Cpu<M>, flag: Status, expected: bool) {
    let target = cpu.operand_address(AddressingMode::Relative);

    if cpu.flag(flag) != expected {
        return;
    }

    // PC now holds the address after the instruction
    cpu.extra_cycles += 1;
    if (cpu.regs.pc & 0xFF00) != (target & 0xFF00) {
        cpu.extra_cycles += 1;
    }
    cpu.regs.pc = target;
}
