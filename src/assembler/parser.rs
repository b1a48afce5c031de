//! Pass 1: source lines to [`MetaInstruction`] records.
//!
//! Each line is stripped of its comment, split at a leading `label:`,
//! uppercased and classified as an origin directive, a byte-literal directive,
//! a constant definition or an instruction. The address cursor advances by the
//! size of every record; labels are bound to the cursor as they are declared.

use log::debug;

use super::opcode_table::{opcode_group, OpcodeGroup, Slot};
use super::operand::{
    classify, classify_for_branch, AddressingInfo, ByteSelector, IndexRegister, OperandShape,
    OperandValue,
};
use super::symbol_table::SymbolTable;
use crate::error::{AssemblerError, AssemblerErrorKind};

/// How a pending label reference is encoded in pass 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// Signed offset from the end of the instruction
    Branch,
    /// Full little-endian address
    Absolute,
    /// Low or high byte of the address
    Byte(ByteSelector),
}

/// A label operand awaiting pass 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRef {
    pub name: String,
    pub kind: RefKind,
}

/// What a record contributes to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaKind {
    /// `*=`, `ORG` or `.ORG`
    Origin,
    /// `NAME:`
    Label(String),
    /// `DEFINE NAME VALUE`
    Define { name: String, value: String },
    /// `DCB`, `.BYTE` or `DB` data
    Bytes(Vec<u8>),
    Instruction {
        opcode: u8,
        value: Option<u16>,
        label: Option<LabelRef>,
    },
}

/// One record of the assembler's intermediate form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaInstruction {
    /// Mnemonic or directive, uppercased
    pub operation: String,

    /// Operand text after constant substitution
    pub operand: String,

    /// Source line number (1-indexed)
    pub line: usize,

    /// Address of the first emitted byte
    pub address: u16,

    /// Number of bytes emitted
    pub len: u16,

    pub kind: MetaKind,
}

impl MetaInstruction {
    /// Address following this record.
    pub fn end_address(&self) -> u16 {
        self.address.wrapping_add(self.len)
    }
}

/// Parse a number (hex `$XX`, binary `%XXXXXXXX` or decimal).
///
/// Returns `None` for anything else, including values above 0xFFFF.
pub fn parse_number(s: &str) -> Option<u16> {
    let (digits, radix) = match s.as_bytes().first()? {
        b'$' => (&s[1..], 16),
        b'%' => (&s[1..], 2),
        _ => (s, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    u16::from_str_radix(digits, radix).ok()
}

/// Labels and constant names: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Signed distance from `from` to `to`, in a 64KB address space that wraps.
pub(crate) fn branch_offset(from: u16, to: u16) -> i32 {
    to.wrapping_sub(from) as i16 as i32
}

pub(crate) fn check_branch_offset(offset: i32) -> Result<u8, AssemblerErrorKind> {
    i8::try_from(offset)
        .map(|offset| offset as u8)
        .map_err(|_| AssemblerErrorKind::BranchOutOfRange { offset })
}

/// Pass 1 state.
pub(crate) struct Parser {
    cursor: u16,
    defines: Vec<(String, String)>,
    instructions: Vec<MetaInstruction>,
    symbols: SymbolTable,
}

impl Parser {
    pub(crate) fn new(base_address: u16) -> Self {
        Self {
            cursor: base_address,
            defines: Vec::new(),
            instructions: Vec::new(),
            symbols: SymbolTable::new(),
        }
    }

    /// Runs pass 1 over `source`, returning the records and the label table.
    pub(crate) fn parse(
        mut self,
        source: &str,
    ) -> Result<(Vec<MetaInstruction>, SymbolTable), AssemblerError> {
        for (index, text) in source.lines().enumerate() {
            let line = index + 1;
            self.parse_line(text, line)
                .map_err(|kind| AssemblerError::new(line, kind))?;
        }

        debug!(
            "pass 1: {} records, {} labels, {} constants",
            self.instructions.len(),
            self.symbols.len(),
            self.defines.len()
        );

        Ok((self.instructions, self.symbols))
    }

    fn parse_line(&mut self, text: &str, line: usize) -> Result<(), AssemblerErrorKind> {
        let mut text = strip_comment(text);

        if let Some((head, rest)) = text.split_once(':') {
            let name = head.trim().to_ascii_uppercase();
            if is_label_name(&name) {
                self.declare_label(name, line)?;
                text = rest;
            }
        }

        let text = text.trim().to_uppercase();
        if text.is_empty() {
            return Ok(());
        }

        if let Some(operand) = text.strip_prefix("*=") {
            return self.set_origin("*=", operand.trim(), line);
        }

        let (operation, operand) = match text.split_once(char::is_whitespace) {
            Some((operation, operand)) => (operation, operand.trim()),
            None => (text.as_str(), ""),
        };

        match operation {
            "ORG" | ".ORG" => self.set_origin(operation, operand, line),
            "DCB" | ".BYTE" | "DB" => self.declare_bytes(operation, operand, line),
            "DEFINE" | "DEF" => self.define(operation, operand, line),
            _ => self.instruction(operation, operand, line),
        }
    }

    fn push(&mut self, operation: &str, operand: &str, line: usize, len: u16, kind: MetaKind) {
        let address = self.cursor;
        self.cursor = address.wrapping_add(len);
        self.instructions.push(MetaInstruction {
            operation: operation.to_string(),
            operand: operand.to_string(),
            line,
            address,
            len,
            kind,
        });
    }

    fn declare_label(&mut self, name: String, line: usize) -> Result<(), AssemblerErrorKind> {
        self.symbols
            .add_symbol(name.clone(), self.cursor, line)
            .map_err(|existing| AssemblerErrorKind::DuplicateLabel {
                name: existing.name,
                first_line: existing.defined_at,
            })?;
        self.push("LABEL", "", line, 0, MetaKind::Label(name));
        Ok(())
    }

    fn set_origin(
        &mut self,
        operation: &str,
        operand: &str,
        line: usize,
    ) -> Result<(), AssemblerErrorKind> {
        let address = parse_number(operand)
            .ok_or_else(|| AssemblerErrorKind::InvalidOrigin(operand.to_string()))?;
        self.cursor = address;
        self.push(operation, operand, line, 0, MetaKind::Origin);
        Ok(())
    }

    fn declare_bytes(
        &mut self,
        operation: &str,
        operand: &str,
        line: usize,
    ) -> Result<(), AssemblerErrorKind> {
        let bytes = parse_byte_list(operand)?;
        let len = bytes.len() as u16;
        self.push(operation, operand, line, len, MetaKind::Bytes(bytes));
        Ok(())
    }

    fn define(
        &mut self,
        operation: &str,
        operand: &str,
        line: usize,
    ) -> Result<(), AssemblerErrorKind> {
        let (name, value) = operand
            .split_once(char::is_whitespace)
            .map(|(name, value)| (name, value.trim()))
            .filter(|(name, value)| is_label_name(name) && !value.is_empty())
            .ok_or_else(|| AssemblerErrorKind::InvalidDefine(operand.to_string()))?;

        // Redefinition keeps the first lookup position
        match self.defines.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.defines.push((name.to_string(), value.to_string())),
        }

        let kind = MetaKind::Define {
            name: name.to_string(),
            value: value.to_string(),
        };
        self.push(operation, operand, line, 0, kind);
        Ok(())
    }

    fn instruction(
        &mut self,
        mnemonic: &str,
        operand: &str,
        line: usize,
    ) -> Result<(), AssemblerErrorKind> {
        let group = opcode_group(mnemonic)
            .ok_or_else(|| AssemblerErrorKind::UnknownMnemonic(mnemonic.to_string()))?;

        let operand: String = substitute_define(operand, &self.defines)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let info = if group.is_branch() {
            classify_for_branch(&operand)
        } else {
            classify(&operand).map_err(AssemblerErrorKind::from)?
        };
        let info = info.ok_or_else(|| AssemblerErrorKind::InvalidOperand {
            mnemonic: mnemonic.to_string(),
            operand: operand.clone(),
        })?;

        let (slot, len, value, label) = self.select(&group, info)?;
        let opcode = group
            .get(slot)
            .ok_or_else(|| AssemblerErrorKind::UnsupportedAddressing {
                mnemonic: mnemonic.to_string(),
                mode: slot.name(),
            })?;

        let kind = MetaKind::Instruction {
            opcode,
            value,
            label,
        };
        self.push(mnemonic, &operand, line, len, kind);
        Ok(())
    }

    /// Picks the opcode slot and size for a classified operand.
    fn select(
        &self,
        group: &OpcodeGroup,
        info: AddressingInfo,
    ) -> Result<(Slot, u16, Option<u16>, Option<LabelRef>), AssemblerErrorKind> {
        let (number, name) = match info.value {
            OperandValue::Number(n) => (Some(n), None),
            OperandValue::Label(name) => (None, Some(name)),
        };
        let reference = |kind| name.clone().map(|name| LabelRef { name, kind });

        let selected = match info.shape {
            OperandShape::Implied | OperandShape::Accumulator => (Slot::Sngl, 1, None, None),
            OperandShape::Branch => {
                let value = match number {
                    Some(target) => {
                        let end = self.cursor.wrapping_add(2);
                        Some(check_branch_offset(branch_offset(end, target))? as u16)
                    }
                    None => None,
                };
                (Slot::Bra, 2, value, reference(RefKind::Branch))
            }
            OperandShape::Immediate => {
                let kind = RefKind::Byte(info.selector.unwrap_or(ByteSelector::Low));
                (Slot::Imm, 2, number, reference(kind))
            }
            OperandShape::ZeroPage => {
                let slot = indexed(Slot::Zp, Slot::Zpx, Slot::Zpy, info.register);
                match slot.widened() {
                    Some(wide) if !group.supports(slot) && group.supports(wide) => {
                        (wide, 3, number, None)
                    }
                    _ => (slot, 2, number, None),
                }
            }
            OperandShape::Absolute => {
                let slot = indexed(Slot::Abs, Slot::Absx, Slot::Absy, info.register);
                (slot, 3, number, reference(RefKind::Absolute))
            }
            OperandShape::Indirect => match info.register {
                None => (Slot::Ind, 3, number, None),
                Some(IndexRegister::X) => (Slot::Indx, 2, number, None),
                Some(IndexRegister::Y) => (Slot::Indy, 2, number, None),
            },
        };

        Ok(selected)
    }
}

fn indexed(plain: Slot, x: Slot, y: Slot, register: Option<IndexRegister>) -> Slot {
    match register {
        None => plain,
        Some(IndexRegister::X) => x,
        Some(IndexRegister::Y) => y,
    }
}

/// Replaces the first occurrence of the first constant whose name appears
/// anywhere in `operand`. At most one substitution is made.
///
/// Matching is plain substring search, so a constant `X` also rewrites the
/// `X` inside `MAX`.
pub fn substitute_define(operand: &str, defines: &[(String, String)]) -> String {
    defines
        .iter()
        .find(|(name, _)| operand.contains(name.as_str()))
        .map(|(name, value)| operand.replacen(name.as_str(), value, 1))
        .unwrap_or_else(|| operand.to_string())
}

/// Removes a `;` comment, ignoring semicolons inside quotes.
fn strip_comment(text: &str) -> &str {
    let mut quote = None;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (None, ';') => return &text[..i],
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            _ => {}
        }
    }
    text
}

/// Splits on commas that are not inside quotes.
fn split_byte_list(operand: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut quote = None;
    let mut start = 0;

    for (i, c) in operand.char_indices() {
        match (quote, c) {
            (None, ',') => {
                tokens.push(operand[start..i].trim());
                start = i + 1;
            }
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            _ => {}
        }
    }
    tokens.push(operand[start..].trim());
    tokens
}

/// Parses a byte-literal operand: numbers (masked to 8 bits) and quoted
/// strings (one byte per character, code point mod 256).
pub fn parse_byte_list(operand: &str) -> Result<Vec<u8>, AssemblerErrorKind> {
    let mut bytes = Vec::new();

    for token in split_byte_list(operand) {
        let quoted = token
            .chars()
            .next()
            .filter(|q| matches!(q, '\'' | '"'))
            .and_then(|q| token.strip_prefix(q)?.strip_suffix(q));

        if let Some(text) = quoted {
            bytes.extend(text.chars().map(|c| c as u32 as u8));
        } else if let Some(value) = parse_number(token) {
            bytes.push(value as u8);
        } else {
            return Err(AssemblerErrorKind::InvalidByteLiteral(token.to_string()));
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<MetaInstruction> {
        Parser::new(0).parse(source).unwrap().0
    }

    #[test]
    fn test_parse_number_hex() {
        assert_eq!(parse_number("$FF"), Some(255));
        assert_eq!(parse_number("$42"), Some(66));
        assert_eq!(parse_number("$1234"), Some(0x1234));
    }

    #[test]
    fn test_parse_number_decimal() {
        assert_eq!(parse_number("255"), Some(255));
        assert_eq!(parse_number("1234"), Some(1234));
    }

    #[test]
    fn test_parse_number_binary() {
        assert_eq!(parse_number("%11111111"), Some(255));
        assert_eq!(parse_number("%01000010"), Some(66));
    }

    #[test]
    fn test_parse_number_invalid() {
        assert_eq!(parse_number("$XY"), None);
        assert_eq!(parse_number("%202"), None);
        assert_eq!(parse_number("ABC"), None);
        assert_eq!(parse_number("$"), None);
        assert_eq!(parse_number("+5"), None);
        assert_eq!(parse_number("$10000"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_label_names() {
        assert!(is_label_name("START"));
        assert!(is_label_name("loop_1"));
        assert!(is_label_name("_private"));
        assert!(!is_label_name(""));
        assert!(!is_label_name("1START"));
        assert!(!is_label_name("MY-LABEL"));
    }

    #[test]
    fn test_label_split_and_addresses() {
        let records = parse("start: LDA #$01\n  STA $0200\nend:");

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].kind, MetaKind::Label("START".to_string()));
        assert_eq!(records[1].operation, "LDA");
        assert_eq!(records[1].line, 1);
        assert_eq!(records[2].address, 2);
        assert_eq!(records[2].len, 3);
        assert_eq!(records[3].address, 5);
        assert_eq!(records[3].line, 3);
    }

    #[test]
    fn test_colon_in_string_is_not_a_label() {
        let records = parse("DCB \"A:B\"");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, MetaKind::Bytes(vec![b'A', b':', b'B']));
    }

    #[test]
    fn test_comment_stripping() {
        assert_eq!(strip_comment("LDA #$01 ; load"), "LDA #$01 ");
        assert_eq!(strip_comment("; whole line"), "");
        assert_eq!(strip_comment("DCB \";\" ; note"), "DCB \";\" ");
    }

    #[test]
    fn test_origin_forms() {
        for source in ["*=$0600\nNOP", "ORG $0600\nNOP", ".org $0600\nNOP"] {
            let records = parse(source);
            assert_eq!(records[0].kind, MetaKind::Origin);
            assert_eq!(records[1].address, 0x0600, "{}", source);
        }
    }

    #[test]
    fn test_byte_list() {
        assert_eq!(
            parse_byte_list("$0A, 26, %101010").unwrap(),
            vec![0x0A, 26, 42]
        );
        assert_eq!(parse_byte_list("'A,B'").unwrap(), vec![b'A', b',', b'B']);
        assert_eq!(parse_byte_list("$1234").unwrap(), vec![0x34]);
        assert!(matches!(
            parse_byte_list("$0A, , $0B"),
            Err(AssemblerErrorKind::InvalidByteLiteral(_))
        ));
        assert!(parse_byte_list("\"open").is_err());
    }

    #[test]
    fn test_substitution_is_first_match_substring() {
        let defines = vec![
            ("X".to_string(), "$10".to_string()),
            ("MAX".to_string(), "$FF".to_string()),
        ];
        // `X` is defined first and matches inside `MAX`
        assert_eq!(substitute_define("#MAX", &defines), "#MA$10");
        assert_eq!(substitute_define("#MIN", &defines), "#MIN");

        let defines = vec![("ONE".to_string(), "1".to_string())];
        assert_eq!(substitute_define("ONE,ONE", &defines), "1,ONE");
    }

    #[test]
    fn test_zero_page_promoted_to_absolute() {
        // LDA has no zero page,Y form
        let records = parse("LDA $10,Y");
        assert_eq!(records[0].len, 3);
        assert_eq!(
            records[0].kind,
            MetaKind::Instruction {
                opcode: 0xB9,
                value: Some(0x10),
                label: None
            }
        );
    }

    #[test]
    fn test_numeric_branch_target_resolved_in_pass_one() {
        let records = parse("*=$0600\nBNE $0600");
        assert_eq!(
            records[1].kind,
            MetaKind::Instruction {
                opcode: 0xD0,
                value: Some(0xFE),
                label: None
            }
        );
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = Parser::new(0).parse("NOP\nFOO #1").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, AssemblerErrorKind::UnknownMnemonic("FOO".to_string()));

        let err = Parser::new(0).parse("a:\nNOP\na:").unwrap_err();
        assert_eq!(
            err.kind,
            AssemblerErrorKind::DuplicateLabel {
                name: "A".to_string(),
                first_line: 1
            }
        );
    }
}
