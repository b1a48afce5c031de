//! 6502 Assembler Module
//!
//! Converts assembly language source code into binary machine code in two
//! passes:
//!
//! 1. [`parser`] turns each source line into a [`MetaInstruction`], assigns
//!    addresses and builds the label table.
//! 2. the encoder resolves label references against the frozen table and emits
//!    the bytes.
//!
//! ## Source Format
//!
//! - One instruction or directive per line; `;` starts a comment
//! - Mnemonics, registers and labels are case-insensitive
//! - Numbers: `$FF` hex, `%1010` binary, `255` decimal
//! - `name:` declares a label, optionally followed by an instruction
//! - `*=addr`, `ORG addr` or `.ORG addr` moves the address cursor
//! - `DCB`, `.BYTE` or `DB` emits comma-separated numbers and quoted strings
//! - `DEFINE name value` (or `DEF`) declares a textual constant
//! - `#<label` / `#>label` take the low / high byte of a label's address
//!
//! # Examples
//!
//! ```
//! use kit6502::assemble;
//!
//! let bytes = assemble("LDA #$01\nSTA $0200").unwrap();
//! assert_eq!(bytes, vec![0xA9, 0x01, 0x8D, 0x00, 0x02]);
//! ```

mod encoder;
pub mod opcode_table;
pub mod operand;
pub mod parser;
pub mod symbol_table;

use log::debug;

use crate::error::AssemblerError;
pub use parser::{LabelRef, MetaInstruction, MetaKind, RefKind};
pub use symbol_table::{Symbol, SymbolTable};

/// Assembles `source` starting at address 0.
pub fn assemble(source: &str) -> Result<Vec<u8>, AssemblerError> {
    Assembler::new().assemble(source)
}

/// Output of pass 1.
#[derive(Debug, Clone)]
pub struct ParsedProgram {
    /// Records in source order
    pub instructions: Vec<MetaInstruction>,

    /// Every declared label
    pub symbols: SymbolTable,
}

/// Two-pass assembler with a configurable starting address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    base_address: u16,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the address cursor at `base_address` instead of 0.
    pub fn with_base_address(base_address: u16) -> Self {
        Self { base_address }
    }

    pub fn base_address(&self) -> u16 {
        self.base_address
    }

    /// Runs pass 1 only.
    pub fn parse(&self, source: &str) -> Result<ParsedProgram, AssemblerError> {
        let (instructions, symbols) = parser::Parser::new(self.base_address).parse(source)?;
        Ok(ParsedProgram {
            instructions,
            symbols,
        })
    }

    /// Assembles `source` into machine code.
    ///
    /// Fails on the first error; no partial output is returned.
    pub fn assemble(&self, source: &str) -> Result<Vec<u8>, AssemblerError> {
        let program = self.parse(source)?;
        let bytes = encoder::encode(&program.instructions, &program.symbols)?;
        debug!("pass 2: emitted {} bytes", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssemblerErrorKind;

    #[test]
    fn test_empty_source() {
        assert_eq!(assemble("").unwrap(), Vec::<u8>::new());
        assert_eq!(assemble("; nothing\n\n   ").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_base_address_applies_to_labels() {
        let bytes = Assembler::with_base_address(0x0600)
            .assemble("JMP start\nstart: NOP")
            .unwrap();
        assert_eq!(bytes, vec![0x4C, 0x03, 0x06, 0xEA]);
    }

    #[test]
    fn test_parse_exposes_symbols() {
        let program = Assembler::new().parse("*=$C000\nreset: NOP").unwrap();
        let reset = program.symbols.lookup_symbol("RESET").unwrap();
        assert_eq!(reset.address, 0xC000);
        assert_eq!(reset.defined_at, 2);
    }

    #[test]
    fn test_undefined_label() {
        let err = assemble("NOP\nJMP nowhere").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.kind,
            AssemblerErrorKind::UndefinedLabel("NOWHERE".to_string())
        );
        assert!(err.is_label_error());
    }

    #[test]
    fn test_branch_out_of_range() {
        let source = format!("BNE far\nDCB {}\nfar: NOP", vec!["0"; 128].join(","));
        let err = assemble(&source).unwrap_err();
        assert_eq!(err.kind, AssemblerErrorKind::BranchOutOfRange { offset: 128 });

        let source = format!("BNE far\nDCB {}\nfar: NOP", vec!["0"; 127].join(","));
        assert_eq!(assemble(&source).unwrap()[..2], [0xD0, 0x7F]);
    }

    #[test]
    fn test_label_byte_selectors() {
        let bytes = assemble("*=$1234\ndata: LDA #<data\nLDX #>data").unwrap();
        assert_eq!(bytes, vec![0xA9, 0x34, 0xA2, 0x12]);
    }
}
