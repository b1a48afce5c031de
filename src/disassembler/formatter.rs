//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::DisassembledInstruction;

/// Format an instruction as assembly text
///
/// `operands` holds the bytes after the opcode; `address` is where the
/// opcode sits, used to turn relative offsets into targets.
pub fn format_instruction(
    mnemonic: &str,
    mode: AddressingMode,
    operands: &[u8],
    address: u16,
) -> String {
    let operand = format_operand(mode, operands, address);

    if operand.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{} {}", mnemonic, operand)
    }
}

/// Format the operand based on addressing mode
fn format_operand(mode: AddressingMode, operands: &[u8], address: u16) -> String {
    use AddressingMode::*;

    let byte = operands.first().copied().unwrap_or(0);
    let word = u16::from_le_bytes([byte, operands.get(1).copied().unwrap_or(0)]);

    match mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", byte),
        ZeroPage => format!("${:02X}", byte),
        ZeroPageX => format!("${:02X},X", byte),
        ZeroPageY => format!("${:02X},Y", byte),
        Relative => {
            let target = address.wrapping_add(2).wrapping_add_signed(byte as i8 as i16);
            format!("${:04X}", target)
        }
        Absolute => format!("${:04X}", word),
        AbsoluteX => format!("${:04X},X", word),
        AbsoluteY => format!("${:04X},Y", word),
        Indirect => format!("(${:04X})", word),
        IndirectX => format!("(${:02X},X)", byte),
        IndirectY => format!("(${:02X}),Y", byte),
    }
}

/// Renders one `AAAA BB BB BB  TEXT` line per instruction.
pub fn format_listing(instructions: &[DisassembledInstruction]) -> String {
    instructions
        .iter()
        .map(|instr| instr.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
