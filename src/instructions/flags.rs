//! # Status Flag Manipulation Instructions
//!
//! CLC, SEC, CLI, SEI, CLV, CLD and SED each touch exactly one flag.
//!
//! These instructions use implied addressing mode and execute in 2 cycles.

use crate::cpu::{Cpu, Status};
use crate::memory::MemoryBus;

pub(crate) fn set<M: MemoryBus>(cpu: &mut Cpu<M>, flag: Status) {
    cpu.regs.status.insert(flag);
}

pub(crate) fn clear<M: MemoryBus>(cpu: &mut Cpu<M>, flag: Status) {
    cpu.regs.status.remove(flag);
}
