//! Error types for the assembler and the emulator.
//!
//! Disassembly has no error type: every byte sequence decodes.

use thiserror::Error;

use crate::assembler::operand::OperandError;

/// An assembly failure, tagged with the 1-based source line that caused it.
///
/// Assembly is fail-fast: the first error aborts and no bytes are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct AssemblerError {
    /// Source line number (1-indexed)
    pub line: usize,

    /// What went wrong
    pub kind: AssemblerErrorKind,
}

impl AssemblerError {
    pub(crate) fn new(line: usize, kind: AssemblerErrorKind) -> Self {
        Self { line, kind }
    }

    /// Returns true for failures raised while resolving labels in pass 2.
    pub fn is_label_error(&self) -> bool {
        matches!(
            self.kind,
            AssemblerErrorKind::UndefinedLabel(_) | AssemblerErrorKind::BranchOutOfRange { .. }
        )
    }
}

/// Classification of assembly errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblerErrorKind {
    /// Not a recognized instruction or directive
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    /// Operand text matches no addressing mode
    #[error("invalid operand '{operand}' for {mnemonic}")]
    InvalidOperand { mnemonic: String, operand: String },

    /// Operand is well formed but the instruction has no opcode for that mode
    #[error("{mnemonic} does not support {mode} addressing")]
    UnsupportedAddressing {
        mnemonic: String,
        mode: &'static str,
    },

    /// `#` literal outside 0-255
    #[error("immediate value must be a byte: '{0}'")]
    ImmediateOutOfRange(String),

    /// `#` followed by neither a literal nor `<label` / `>label`
    #[error("invalid format for immediate value: '{0}'")]
    InvalidImmediate(String),

    /// Token in a byte-literal directive is neither a number nor a string
    #[error("invalid byte literal '{0}'")]
    InvalidByteLiteral(String),

    /// Origin directive without a valid 16-bit address
    #[error("invalid origin address '{0}'")]
    InvalidOrigin(String),

    /// Constant definition without a name and a value
    #[error("invalid constant definition '{0}'")]
    InvalidDefine(String),

    /// Label declared more than once
    #[error("duplicate label '{name}' (first defined on line {first_line})")]
    DuplicateLabel { name: String, first_line: usize },

    /// Reference to a label that was never declared
    #[error("undefined label '{0}'")]
    UndefinedLabel(String),

    /// Branch target further than a signed byte from the next instruction
    #[error("branch target {offset:+} bytes away, must be within -128..=127")]
    BranchOutOfRange { offset: i32 },
}

impl From<OperandError> for AssemblerErrorKind {
    fn from(err: OperandError) -> Self {
        match err {
            OperandError::ImmediateOutOfRange(op) => AssemblerErrorKind::ImmediateOutOfRange(op),
            OperandError::InvalidImmediate(op) => AssemblerErrorKind::InvalidImmediate(op),
        }
    }
}

/// Invalid configuration or usage of the emulator.
///
/// Instruction execution itself never fails; undefined opcodes are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmulatorError {
    /// Loading would write past the end of the 64KB address space
    #[error("{len} bytes at ${address:04X} do not fit in 64KB of memory")]
    LoadOutOfRange { address: u16, len: usize },

    /// `reset` was called while a batched run is in progress
    #[error("emulator must be stopped before calling reset")]
    ResetWhileRunning,

    /// `run_batch` was called without `start`
    #[error("emulator is not running")]
    NotRunning,
}
