//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy one register into another and update Z
//! and N. TXS writes the stack pointer and leaves the flags alone.

use crate::cpu::Cpu;
use crate::memory::MemoryBus;

pub(crate) fn tax<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.x = cpu.regs.a;
    cpu.set_zn(cpu.regs.x);
}

pub(crate) fn tay<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.y = cpu.regs.a;
    cpu.set_zn(cpu.regs.y);
}

pub(crate) fn txa<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.a = cpu.regs.x;
    cpu.set_zn(cpu.regs.a);
}

pub(crate) fn tya<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.a = cpu.regs.y;
    cpu.set_zn(cpu.regs.a);
}

pub(crate) fn tsx<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.x = cpu.regs.sp;
    cpu.set_zn(cpu.regs.x);
}

pub(crate) fn txs<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.regs.sp = cpu.regs.x;
}
