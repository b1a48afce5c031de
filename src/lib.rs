//! # kit6502
//!
//! A toolchain for the NMOS 6502: a two-pass assembler, a total disassembler
//! and a cycle-accurate execution engine with a real-time batching scheduler.
//!
//! ## Quick Start
//!
//! ```rust
//! use kit6502::{assemble, disassemble, Cpu, FlatMemory};
//!
//! let program = assemble("*=$0600\nLDA #$03\nJMP there\nBRK\nthere: STA $0200").unwrap();
//! assert_eq!(disassemble(&program)[0].text, "LDA #$03");
//!
//! let mut cpu = Cpu::new(FlatMemory::new());
//! cpu.load(&program, 0x0600).unwrap();
//! cpu.set_pc(0x0600);
//!
//! cpu.step(); // LDA #$03
//! cpu.step(); // JMP $0606
//! cpu.step(); // STA $0200
//! assert_eq!(cpu.read_byte(0x0200), 0x03);
//! assert_eq!(cpu.cycles(), 2 + 3 + 4);
//! ```
//!
//! ## Architecture
//!
//! - **Table-Driven Design**: one 256-entry opcode table feeds the assembler,
//!   the disassembler and the CPU dispatch
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **Cycle Accuracy**: page-crossing and branch penalties follow the NMOS timings
//!
//! ## Modules
//!
//! - `assembler` - Source text to machine code
//! - `disassembler` - Machine code to source text
//! - `cpu` - CPU state and execution logic
//! - `emulator` - Batched, paced execution with hooks
//! - `memory` - MemoryBus trait and the flat 64KB memory
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration
//! - `error` - Assembler and emulator errors

pub mod addressing;
pub mod assembler;
pub mod cpu;
pub mod disassembler;
pub mod emulator;
pub mod error;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{assemble, Assembler};
pub use cpu::{Cpu, ExecutionResult, Registers, Status};
pub use disassembler::{
    decode_instruction, disassemble, disassemble_range, format_listing, DisassembledInstruction,
    DisassemblyOptions,
};
pub use emulator::{BatchOutcome, Emulator, HaltHandle, HookResult, SchedulerConfig, StopReason};
pub use error::{AssemblerError, AssemblerErrorKind, EmulatorError};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};
