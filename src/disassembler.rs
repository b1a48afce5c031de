//! 6502 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly mnemonics.
//!
//! Disassembly is total: every byte value decodes. Undefined opcodes become a
//! one-byte `???`, operand bytes missing at the end of the buffer read as
//! zero, and out-of-range start/stop addresses are clamped to the buffer.

pub mod decoder;
pub mod formatter;

use std::fmt;

use crate::addressing::AddressingMode;

pub use decoder::decode_instruction;
pub use formatter::format_listing;

/// A single disassembled instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// Opcode followed by its operand bytes (1-3 bytes)
    pub bytes: Vec<u8>,

    /// Formatted assembly text, e.g. `LDA ($00,X)`
    pub text: String,

    /// Instruction mnemonic (e.g., "LDA", "???" for undefined opcodes)
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,
}

impl fmt::Display for DisassembledInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();
        write!(f, "{:04X} {:<9}{}", self.address, hex.join(" "), self.text)
    }
}

/// Options controlling which part of a buffer is disassembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisassemblyOptions {
    /// Address of the first byte of the buffer
    pub base_address: u16,

    /// First address to decode; defaults to `base_address`
    pub start_address: Option<u16>,

    /// Address to stop before; defaults to the end of the buffer
    pub stop_address: Option<u16>,
}

impl DisassemblyOptions {
    /// Options for a buffer loaded at `base_address`.
    pub fn at(base_address: u16) -> Self {
        Self {
            base_address,
            ..Self::default()
        }
    }
}

/// Disassembles a whole buffer located at address 0.
///
/// ```
/// use kit6502::disassemble;
///
/// let listing = disassemble(&[0xA9, 0x01, 0x8D, 0x00, 0x02]);
/// assert_eq!(listing[0].text, "LDA #$01");
/// assert_eq!(listing[1].text, "STA $0200");
/// ```
pub fn disassemble(bytes: &[u8]) -> Vec<DisassembledInstruction> {
    disassemble_range(bytes, DisassemblyOptions::default())
}

/// Disassembles the `[start, stop)` window of a buffer located at
/// `options.base_address`.
///
/// A start before the buffer is raised to the base address; a stop at or
/// before the start, or past the end of the buffer, becomes the end of the
/// buffer. The last instruction may run past the stop address.
pub fn disassemble_range(bytes: &[u8], options: DisassemblyOptions) -> Vec<DisassembledInstruction> {
    let base = options.base_address as usize;
    let end = base + bytes.len();

    let start = options
        .start_address
        .map_or(base, |start| (start as usize).clamp(base, end));
    let stop = match options.stop_address.map(|stop| stop as usize) {
        Some(stop) if stop > start && stop <= end => stop,
        _ => end,
    };

    let mut instructions = Vec::new();
    let mut pc = start;

    while pc < stop {
        let instr = decode_instruction(bytes, pc - base, pc as u16);
        pc += instr.bytes.len();
        instructions.push(instr);
    }

    instructions
}
