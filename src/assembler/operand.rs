//! Operand classification.
//!
//! Each `check_*` function recognizes one operand shape in normalized operand
//! text (trimmed, uppercased, no inner whitespace). [`classify`] tries them in
//! precedence order and the first match wins: no operand, immediate, zero
//! page, absolute, indirect, then branch.
//!
//! Every check validates its own numeric range and reports "no match" on a
//! mismatch, so `$0100` falls through zero page to absolute. Immediate is the
//! exception: once `#` is seen the operand is either a valid immediate or an
//! error.

use thiserror::Error;

use super::parser::{is_label_name, parse_number};

/// Index register suffix of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRegister {
    X,
    Y,
}

/// `<` / `>` selector on an immediate label operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteSelector {
    Low,
    High,
}

impl ByteSelector {
    pub fn select(self, word: u16) -> u8 {
        let [lo, hi] = word.to_le_bytes();
        match self {
            ByteSelector::Low => lo,
            ByteSelector::High => hi,
        }
    }
}

/// Operand shapes the resolver distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandShape {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    Absolute,
    Indirect,
    Branch,
}

/// A literal number or a label still to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandValue {
    Number(u16),
    Label(String),
}

/// Result of classifying one operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressingInfo {
    pub shape: OperandShape,
    pub value: OperandValue,
    pub register: Option<IndexRegister>,
    pub selector: Option<ByteSelector>,
}

impl AddressingInfo {
    fn number(shape: OperandShape, value: u16, register: Option<IndexRegister>) -> Self {
        Self {
            shape,
            value: OperandValue::Number(value),
            register,
            selector: None,
        }
    }

    fn label(shape: OperandShape, name: &str, register: Option<IndexRegister>) -> Self {
        Self {
            shape,
            value: OperandValue::Label(name.to_string()),
            register,
            selector: None,
        }
    }
}

/// Malformed immediate operand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    #[error("immediate value must be a byte: '{0}'")]
    ImmediateOutOfRange(String),

    #[error("invalid format for immediate value: '{0}'")]
    InvalidImmediate(String),
}

/// Empty operand (implied) or `A` (accumulator).
pub fn check_non_address(op: &str) -> Option<AddressingInfo> {
    let shape = match op {
        "" => OperandShape::Implied,
        "A" => OperandShape::Accumulator,
        _ => return None,
    };
    Some(AddressingInfo::number(shape, 0, None))
}

/// `#byte`, `#<label` or `#>label`.
///
/// A selector may also be applied to a numeric word, yielding its low or high
/// byte.
pub fn check_immediate(op: &str) -> Result<Option<AddressingInfo>, OperandError> {
    let Some(body) = op.strip_prefix('#') else {
        return Ok(None);
    };

    let (selector, body) = if let Some(rest) = body.strip_prefix('<') {
        (Some(ByteSelector::Low), rest)
    } else if let Some(rest) = body.strip_prefix('>') {
        (Some(ByteSelector::High), rest)
    } else {
        (None, body)
    };

    if let Some(value) = parse_number(body) {
        let value = match selector {
            Some(selector) => selector.select(value),
            None if value <= 0xFF => value as u8,
            None => return Err(OperandError::ImmediateOutOfRange(op.to_string())),
        };
        return Ok(Some(AddressingInfo::number(
            OperandShape::Immediate,
            value as u16,
            None,
        )));
    }

    match selector {
        Some(selector) if is_label_name(body) => Ok(Some(AddressingInfo {
            selector: Some(selector),
            ..AddressingInfo::label(OperandShape::Immediate, body, None)
        })),
        _ => Err(OperandError::InvalidImmediate(op.to_string())),
    }
}

/// `byte`, `byte,X` or `byte,Y`.
pub fn check_zero_page(op: &str) -> Option<AddressingInfo> {
    let (base, register) = split_index(op)?;
    let value = parse_number(base).filter(|v| *v <= 0xFF)?;
    Some(AddressingInfo::number(OperandShape::ZeroPage, value, register))
}

/// `label[,X|Y]` or `word[,X|Y]`.
pub fn check_absolute(op: &str) -> Option<AddressingInfo> {
    let (base, register) = split_index(op)?;
    if is_label_name(base) {
        return Some(AddressingInfo::label(OperandShape::Absolute, base, register));
    }
    let value = parse_number(base)?;
    Some(AddressingInfo::number(OperandShape::Absolute, value, register))
}

/// `(word)`, `(byte,X)` or `(byte),Y`.
///
/// X only pre-indexes inside the parentheses and Y only post-indexes outside
/// them, as on the hardware.
pub fn check_indirect(op: &str) -> Option<AddressingInfo> {
    let rest = op.strip_prefix('(')?;

    if let Some(inner) = rest.strip_suffix("),Y") {
        let value = parse_number(inner).filter(|v| *v <= 0xFF)?;
        return Some(AddressingInfo::number(
            OperandShape::Indirect,
            value,
            Some(IndexRegister::Y),
        ));
    }

    let inner = rest.strip_suffix(')')?;
    match split_index(inner)? {
        (base, None) => {
            let value = parse_number(base)?;
            Some(AddressingInfo::number(OperandShape::Indirect, value, None))
        }
        (base, Some(IndexRegister::X)) => {
            let value = parse_number(base).filter(|v| *v <= 0xFF)?;
            Some(AddressingInfo::number(
                OperandShape::Indirect,
                value,
                Some(IndexRegister::X),
            ))
        }
        (_, Some(IndexRegister::Y)) => None,
    }
}

/// A branch target: a label or a numeric address.
pub fn check_branch(op: &str) -> Option<AddressingInfo> {
    if is_label_name(op) {
        return Some(AddressingInfo::label(OperandShape::Branch, op, None));
    }
    let value = parse_number(op)?;
    Some(AddressingInfo::number(OperandShape::Branch, value, None))
}

/// Classifies an operand for a non-branch mnemonic.
///
/// ```
/// use kit6502::assembler::operand::{classify, IndexRegister, OperandShape, OperandValue};
///
/// let info = classify("$0200,Y").unwrap().unwrap();
/// assert_eq!(info.shape, OperandShape::Absolute);
/// assert_eq!(info.value, OperandValue::Number(0x0200));
/// assert_eq!(info.register, Some(IndexRegister::Y));
///
/// assert!(classify("#$100").is_err());
/// assert!(classify("($10),X").unwrap().is_none());
/// ```
pub fn classify(op: &str) -> Result<Option<AddressingInfo>, OperandError> {
    if let Some(info) = check_non_address(op) {
        return Ok(Some(info));
    }
    if let Some(info) = check_immediate(op)? {
        return Ok(Some(info));
    }
    Ok(check_zero_page(op)
        .or_else(|| check_absolute(op))
        .or_else(|| check_indirect(op))
        .or_else(|| check_branch(op)))
}

/// Classifies an operand for a branch mnemonic, where a bare label or number
/// is a branch target rather than an absolute address.
pub fn classify_for_branch(op: &str) -> Option<AddressingInfo> {
    check_non_address(op).or_else(|| check_branch(op))
}

/// Splits an optional `,X` / `,Y` suffix. Any other suffix is no match.
fn split_index(op: &str) -> Option<(&str, Option<IndexRegister>)> {
    match op.split_once(',') {
        None => Some((op, None)),
        Some((base, "X")) => Some((base, Some(IndexRegister::X))),
        Some((base, "Y")) => Some((base, Some(IndexRegister::Y))),
        Some(_) => None,
    }
}
