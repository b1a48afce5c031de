//! # 6502 Instruction Implementations
//!
//! Instruction handlers, organized by category. Each handler is a standalone
//! function taking the CPU explicitly plus the addressing mode from the
//! opcode table. [`execute`] maps the table's [`Operation`] tag to its handler.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

mod alu;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod shifts;
mod stack;
mod transfer;

use crate::cpu::{Cpu, Status};
use crate::memory::MemoryBus;
use crate::opcodes::{OpcodeMetadata, Operation};

/// Runs the handler for `metadata`. The opcode byte has already been consumed.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut Cpu<M>, metadata: &OpcodeMetadata) {
    let mode = metadata.addressing_mode;

    match metadata.operation {
        Operation::Adc => alu::adc(cpu, mode),
        Operation::And => alu::and(cpu, mode),
        Operation::Asl => shifts::asl(cpu, mode),
        Operation::Bcc => branches::branch_if(cpu, Status::CARRY, false),
        Operation::Bcs => branches::branch_if(cpu, Status::CARRY, true),
        Operation::Beq => branches::branch_if(cpu, Status::ZERO, true),
        Operation::Bit => alu::bit(cpu, mode),
        Operation::Bmi => branches::branch_if(cpu, Status::NEGATIVE, true),
        Operation::Bne => branches::branch_if(cpu, Status::ZERO, false),
        Operation::Bpl => branches::branch_if(cpu, Status::NEGATIVE, false),
        Operation::Brk => control::brk(cpu),
        Operation::Bvc => branches::branch_if(cpu, Status::OVERFLOW, false),
        Operation::Bvs => branches::branch_if(cpu, Status::OVERFLOW, true),
        Operation::Clc => flags::clear(cpu, Status::CARRY),
        Operation::Cld => flags::clear(cpu, Status::DECIMAL),
        Operation::Cli => flags::clear(cpu, Status::INTERRUPT_DISABLE),
        Operation::Clv => flags::clear(cpu, Status::OVERFLOW),
        Operation::Cmp => alu::cmp(cpu, mode),
        Operation::Cpx => alu::cpx(cpu, mode),
        Operation::Cpy => alu::cpy(cpu, mode),
        Operation::Dec => inc_dec::dec(cpu, mode),
        Operation::Dex => inc_dec::dex(cpu),
        Operation::Dey => inc_dec::dey(cpu),
        Operation::Eor => alu::eor(cpu, mode),
        Operation::Inc => inc_dec::inc(cpu, mode),
        Operation::Inx => inc_dec::inx(cpu),
        Operation::Iny => inc_dec::iny(cpu),
        Operation::Jmp => control::jmp(cpu, mode),
        Operation::Jsr => control::jsr(cpu),
        Operation::Lda => load_store::lda(cpu, mode),
        Operation::Ldx => load_store::ldx(cpu, mode),
        Operation::Ldy => load_store::ldy(cpu, mode),
        Operation::Lsr => shifts::lsr(cpu, mode),
        Operation::Nop => {}
        Operation::Ora => alu::ora(cpu, mode),
        Operation::Pha => stack::pha(cpu),
        Operation::Php => stack::php(cpu),
        Operation::Pla => stack::pla(cpu),
        Operation::Plp => stack::plp(cpu),
        Operation::Rol => shifts::rol(cpu, mode),
        Operation::Ror => shifts::ror(cpu, mode),
        Operation::Rti => control::rti(cpu),
        Operation::Rts => control::rts(cpu),
        Operation::Sbc => alu::sbc(cpu, mode),
        Operation::Sec => flags::set(cpu, Status::CARRY),
        Operation::Sed => flags::set(cpu, Status::DECIMAL),
        Operation::Sei => flags::set(cpu, Status::INTERRUPT_DISABLE),
        Operation::Sta => load_store::sta(cpu, mode),
        Operation::Stx => load_store::stx(cpu, mode),
        Operation::Sty => load_store::sty(cpu, mode),
        Operation::Tax => transfer::tax(cpu),
        Operation::Tay => transfer::tay(cpu),
        Operation::Tsx => transfer::tsx(cpu),
        Operation::Txa => transfer::txa(cpu),
        Operation::Txs => transfer::txs(cpu),
        Operation::Tya => transfer::tya(cpu),
        Operation::Illegal => {}
    }
}
