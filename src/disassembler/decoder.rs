//! Instruction decoder for the 6502 disassembler

use crate::disassembler::{formatter, DisassembledInstruction};
use crate::opcodes::OPCODE_TABLE;

/// Decode the instruction at `offset` in `bytes`, located at `address`.
///
/// Never fails. Bytes past the end of the buffer read as 0x00, so the result
/// always holds as many bytes as the opcode's addressing mode requires.
pub fn decode_instruction(bytes: &[u8], offset: usize, address: u16) -> DisassembledInstruction {
    let byte_at = |i: usize| bytes.get(offset + i).copied().unwrap_or(0);

    let opcode = byte_at(0);
    let metadata = &OPCODE_TABLE[opcode as usize];
    let raw: Vec<u8> = (0..metadata.size_bytes as usize).map(byte_at).collect();

    let text = formatter::format_instruction(
        metadata.mnemonic,
        metadata.addressing_mode,
        &raw[1..],
        address,
    );

    DisassembledInstruction {
        address,
        bytes: raw,
        text,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
    }
}
