//! Pass 2: resolves label references and emits machine code.

use super::parser::{branch_offset, check_branch_offset, LabelRef, MetaInstruction, MetaKind, RefKind};
use super::symbol_table::SymbolTable;
use crate::error::{AssemblerError, AssemblerErrorKind};

/// Emits the bytes of every record in order.
///
/// Origin gaps are not filled: the output is the plain concatenation of each
/// record's bytes.
pub(crate) fn encode(
    instructions: &[MetaInstruction],
    symbols: &SymbolTable,
) -> Result<Vec<u8>, AssemblerError> {
    let mut bytes = Vec::new();

    for instr in instructions {
        match &instr.kind {
            MetaKind::Instruction {
                opcode,
                value,
                label,
            } => {
                let operand = match label {
                    Some(reference) => resolve(instr, reference, symbols)
                        .map_err(|kind| AssemblerError::new(instr.line, kind))?,
                    None => value.unwrap_or(0),
                };

                bytes.push(*opcode);
                match instr.len {
                    2 => bytes.push(operand as u8),
                    3 => bytes.extend_from_slice(&operand.to_le_bytes()),
                    _ => {}
                }
            }
            MetaKind::Bytes(data) => bytes.extend_from_slice(data),
            MetaKind::Origin | MetaKind::Label(_) | MetaKind::Define { .. } => {}
        }
    }

    Ok(bytes)
}

/// Operand value of a label reference.
fn resolve(
    instr: &MetaInstruction,
    reference: &LabelRef,
    symbols: &SymbolTable,
) -> Result<u16, AssemblerErrorKind> {
    let target = symbols
        .lookup_symbol(&reference.name)
        .ok_or_else(|| AssemblerErrorKind::UndefinedLabel(reference.name.clone()))?
        .address;

    Ok(match reference.kind {
        RefKind::Branch => {
            check_branch_offset(branch_offset(instr.end_address(), target))? as u16
        }
        RefKind::Absolute => target,
        RefKind::Byte(selector) => selector.select(target) as u16,
    })
}
