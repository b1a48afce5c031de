//! # Opcode Metadata Table
//!
//! The 256-entry opcode table is the single source of truth shared by the
//! disassembler and the execution engine. Each entry tags the operation the
//! opcode performs together with its addressing mode, base cycle cost, size
//! and whether indexed reads pay a page-crossing penalty.
//!
//! The table covers the 151 documented NMOS opcodes. The remaining 105 byte
//! values decode as the `???` placeholder: a one-byte, two-cycle no-op.

use crate::addressing::AddressingMode;

/// The operation selected by an opcode, independent of addressing mode.
///
/// The execution engine dispatches on this tag, so every documented opcode of
/// one family shares a single handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Add with carry
    Adc,
    /// Logical AND
    And,
    /// Arithmetic shift left
    Asl,
    /// Branch if carry clear
    Bcc,
    /// Branch if carry set
    Bcs,
    /// Branch if equal
    Beq,
    /// Bit test
    Bit,
    /// Branch if minus
    Bmi,
    /// Branch if not equal
    Bne,
    /// Branch if plus
    Bpl,
    /// Force interrupt
    Brk,
    /// Branch if overflow clear
    Bvc,
    /// Branch if overflow set
    Bvs,
    /// Clear carry
    Clc,
    /// Clear decimal mode
    Cld,
    /// Clear interrupt disable
    Cli,
    /// Clear overflow
    Clv,
    /// Compare accumulator
    Cmp,
    /// Compare X
    Cpx,
    /// Compare Y
    Cpy,
    /// Decrement memory
    Dec,
    /// Decrement X
    Dex,
    /// Decrement Y
    Dey,
    /// Exclusive OR
    Eor,
    /// Increment memory
    Inc,
    /// Increment X
    Inx,
    /// Increment Y
    Iny,
    /// Jump
    Jmp,
    /// Jump to subroutine
    Jsr,
    /// Load accumulator
    Lda,
    /// Load X
    Ldx,
    /// Load Y
    Ldy,
    /// Logical shift right
    Lsr,
    /// No operation
    Nop,
    /// Logical inclusive OR
    Ora,
    /// Push accumulator
    Pha,
    /// Push processor status
    Php,
    /// Pull accumulator
    Pla,
    /// Pull processor status
    Plp,
    /// Rotate left
    Rol,
    /// Rotate right
    Ror,
    /// Return from interrupt
    Rti,
    /// Return from subroutine
    Rts,
    /// Subtract with carry
    Sbc,
    /// Set carry
    Sec,
    /// Set decimal mode
    Sed,
    /// Set interrupt disable
    Sei,
    /// Store accumulator
    Sta,
    /// Store X
    Stx,
    /// Store Y
    Sty,
    /// Transfer A to X
    Tax,
    /// Transfer A to Y
    Tay,
    /// Transfer SP to X
    Tsx,
    /// Transfer X to A
    Txa,
    /// Transfer X to SP
    Txs,
    /// Transfer Y to A
    Tya,
    /// Undefined opcode
    Illegal,
}

impl Operation {
    /// Three-letter mnemonic, or `???` for undefined opcodes.
    pub const fn mnemonic(self) -> &'static str {
        use Operation::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Illegal => "???",
        }
    }

    /// Operation named by `mnemonic`, ignoring case. `???` names nothing.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Operation> {
        use Operation::*;
        let op = match mnemonic.to_ascii_uppercase().as_str() {
            "ADC" => Adc,
            "AND" => And,
            "ASL" => Asl,
            "BCC" => Bcc,
            "BCS" => Bcs,
            "BEQ" => Beq,
            "BIT" => Bit,
            "BMI" => Bmi,
            "BNE" => Bne,
            "BPL" => Bpl,
            "BRK" => Brk,
            "BVC" => Bvc,
            "BVS" => Bvs,
            "CLC" => Clc,
            "CLD" => Cld,
            "CLI" => Cli,
            "CLV" => Clv,
            "CMP" => Cmp,
            "CPX" => Cpx,
            "CPY" => Cpy,
            "DEC" => Dec,
            "DEX" => Dex,
            "DEY" => Dey,
            "EOR" => Eor,
            "INC" => Inc,
            "INX" => Inx,
            "INY" => Iny,
            "JMP" => Jmp,
            "JSR" => Jsr,
            "LDA" => Lda,
            "LDX" => Ldx,
            "LDY" => Ldy,
            "LSR" => Lsr,
            "NOP" => Nop,
            "ORA" => Ora,
            "PHA" => Pha,
            "PHP" => Php,
            "PLA" => Pla,
            "PLP" => Plp,
            "ROL" => Rol,
            "ROR" => Ror,
            "RTI" => Rti,
            "RTS" => Rts,
            "SBC" => Sbc,
            "SEC" => Sec,
            "SED" => Sed,
            "SEI" => Sei,
            "STA" => Sta,
            "STX" => Stx,
            "STY" => Sty,
            "TAX" => Tax,
            "TAY" => Tay,
            "TSX" => Tsx,
            "TXA" => Txa,
            "TXS" => Txs,
            "TYA" => Tya,
            _ => return None,
        };
        Some(op)
    }
}

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use kit6502::{AddressingMode, OPCODE_TABLE};
///
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "STA", "???" for undefined opcodes).
    pub mnemonic: &'static str,

    /// Operation tag used for dispatch.
    pub operation: Operation,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost, before page-crossing and branch penalties.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Charge one extra cycle when the indexed effective address crosses a
    /// page. Only set for read instructions using abs,X / abs,Y / (zp),Y.
    pub page_penalty: bool,
}

impl OpcodeMetadata {
    /// Returns true for byte values with no documented instruction.
    pub const fn is_illegal(&self) -> bool {
        matches!(self.operation, Operation::Illegal)
    }
}

const fn op(
    operation: Operation,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    page_penalty: bool,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: operation.mnemonic(),
        operation,
        addressing_mode,
        base_cycles,
        size_bytes: addressing_mode.instruction_len(),
        page_penalty,
    }
}

const ILLEGAL: OpcodeMetadata = op(Operation::Illegal, AddressingMode::Implicit, 2, false);

use AddressingMode::*;
use Operation::*;

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// Cycle counts follow the canonical NMOS 6502 timing table.
///
/// ```
/// use kit6502::OPCODE_TABLE;
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!(brk.mnemonic, "BRK");
/// assert_eq!(brk.base_cycles, 7);
///
/// assert_eq!(OPCODE_TABLE[0x02].mnemonic, "???");
/// assert_eq!(OPCODE_TABLE[0x02].size_bytes, 1);
/// ```
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    op(Brk, Implicit, 7, false), // 0x00
    op(Ora, IndirectX, 6, false), // 0x01
    ILLEGAL, // 0x02
    ILLEGAL, // 0x03
    ILLEGAL, // 0x04
    op(Ora, ZeroPage, 3, false), // 0x05
    op(Asl, ZeroPage, 5, false), // 0x06
    ILLEGAL, // 0x07
    op(Php, Implicit, 3, false), // 0x08
    op(Ora, Immediate, 2, false), // 0x09
    op(Asl, Accumulator, 2, false), // 0x0A
    ILLEGAL, // 0x0B
    ILLEGAL, // 0x0C
    op(Ora, Absolute, 4, false), // 0x0D
    op(Asl, Absolute, 6, false), // 0x0E
    ILLEGAL, // 0x0F
    op(Bpl, Relative, 2, false), // 0x10
    op(Ora, IndirectY, 5, true), // 0x11
    ILLEGAL, // 0x12
    ILLEGAL, // 0x13
    ILLEGAL, // 0x14
    op(Ora, ZeroPageX, 4, false), // 0x15
    op(Asl, ZeroPageX, 6, false), // 0x16
    ILLEGAL, // 0x17
    op(Clc, Implicit, 2, false), // 0x18
    op(Ora, AbsoluteY, 4, true), // 0x19
    ILLEGAL, // 0x1A
    ILLEGAL, // 0x1B
    ILLEGAL, // 0x1C
    op(Ora, AbsoluteX, 4, true), // 0x1D
    op(Asl, AbsoluteX, 7, false), // 0x1E
    ILLEGAL, // 0x1F
    op(Jsr, Absolute, 6, false), // 0x20
    op(And, IndirectX, 6, false), // 0x21
    ILLEGAL, // 0x22
    ILLEGAL, // 0x23
    op(Bit, ZeroPage, 3, false), // 0x24
    op(And, ZeroPage, 3, false), // 0x25
    op(Rol, ZeroPage, 5, false), // 0x26
    ILLEGAL, // 0x27
    op(Plp, Implicit, 4, false), // 0x28
    op(And, Immediate, 2, false), // 0x29
    op(Rol, Accumulator, 2, false), // 0x2A
    ILLEGAL, // 0x2B
    op(Bit, Absolute, 4, false), // 0x2C
    op(And, Absolute, 4, false), // 0x2D
    op(Rol, Absolute, 6, false), // 0x2E
    ILLEGAL, // 0x2F
    op(Bmi, Relative, 2, false), // 0x30
    op(And, IndirectY, 5, true), // 0x31
    ILLEGAL, // 0x32
    ILLEGAL, // 0x33
    ILLEGAL, // 0x34
    op(And, ZeroPageX, 4, false), // 0x35
    op(Rol, ZeroPageX, 6, false), // 0x36
    ILLEGAL, // 0x37
    op(Sec, Implicit, 2, false), // 0x38
    op(And, AbsoluteY, 4, true), // 0x39
    ILLEGAL, // 0x3A
    ILLEGAL, // 0x3B
    ILLEGAL, // 0x3C
    op(And, AbsoluteX, 4, true), // 0x3D
    op(Rol, AbsoluteX, 7, false), // 0x3E
    ILLEGAL, // 0x3F
    op(Rti, Implicit, 6, false), // 0x40
    op(Eor, IndirectX, 6, false), // 0x41
    ILLEGAL, // 0x42
    ILLEGAL, // 0x43
    ILLEGAL, // 0x44
    op(Eor, ZeroPage, 3, false), // 0x45
    op(Lsr, ZeroPage, 5, false), // 0x46
    ILLEGAL, // 0x47
    op(Pha, Implicit, 3, false), // 0x48
    op(Eor, Immediate, 2, false), // 0x49
    op(Lsr, Accumulator, 2, false), // 0x4A
    ILLEGAL, // 0x4B
    op(Jmp, Absolute, 3, false), // 0x4C
    op(Eor, Absolute, 4, false), // 0x4D
    op(Lsr, Absolute, 6, false), // 0x4E
    ILLEGAL, // 0x4F
    op(Bvc, Relative, 2, false), // 0x50
    op(Eor, IndirectY, 5, true), // 0x51
    ILLEGAL, // 0x52
    ILLEGAL, // 0x53
    ILLEGAL, // 0x54
    op(Eor, ZeroPageX, 4, false), // 0x55
    op(Lsr, ZeroPageX, 6, false), // 0x56
    ILLEGAL, // 0x57
    op(Cli, Implicit, 2, false), // 0x58
    op(Eor, AbsoluteY, 4, true), // 0x59
    ILLEGAL, // 0x5A
    ILLEGAL, // 0x5B
    ILLEGAL, // 0x5C
    op(Eor, AbsoluteX, 4, true), // 0x5D
    op(Lsr, AbsoluteX, 7, false), // 0x5E
    ILLEGAL, // 0x5F
    op(Rts, Implicit, 6, false), // 0x60
    op(Adc, IndirectX, 6, false), // 0x61
    ILLEGAL, // 0x62
    ILLEGAL, // 0x63
    ILLEGAL, // 0x64
    op(Adc, ZeroPage, 3, false), // 0x65
    op(Ror, ZeroPage, 5, false), // 0x66
    ILLEGAL, // 0x67
    op(Pla, Implicit, 4, false), // 0x68
    op(Adc, Immediate, 2, false), // 0x69
    op(Ror, Accumulator, 2, false), // 0x6A
    ILLEGAL, // 0x6B
    op(Jmp, Indirect, 5, false), // 0x6C
    op(Adc, Absolute, 4, false), // 0x6D
    op(Ror, Absolute, 6, false), // 0x6E
    ILLEGAL, // 0x6F
    op(Bvs, Relative, 2, false), // 0x70
    op(Adc, IndirectY, 5, true), // 0x71
    ILLEGAL, // 0x72
    ILLEGAL, // 0x73
    ILLEGAL, // 0x74
    op(Adc, ZeroPageX, 4, false), // 0x75
    op(Ror, ZeroPageX, 6, false), // 0x76
    ILLEGAL, // 0x77
    op(Sei, Implicit, 2, false), // 0x78
    op(Adc, AbsoluteY, 4, true), // 0x79
    ILLEGAL, // 0x7A
    ILLEGAL, // 0x7B
    ILLEGAL, // 0x7C
    op(Adc, AbsoluteX, 4, true), // 0x7D
    op(Ror, AbsoluteX, 7, false), // 0x7E
    ILLEGAL, // 0x7F
    ILLEGAL, // 0x80
    op(Sta, IndirectX, 6, false), // 0x81
    ILLEGAL, // 0x82
    ILLEGAL, // 0x83
    op(Sty, ZeroPage, 3, false), // 0x84
    op(Sta, ZeroPage, 3, false), // 0x85
    op(Stx, ZeroPage, 3, false), // 0x86
    ILLEGAL, // 0x87
    op(Dey, Implicit, 2, false), // 0x88
    ILLEGAL, // 0x89
    op(Txa, Implicit, 2, false), // 0x8A
    ILLEGAL, // 0x8B
    op(Sty, Absolute, 4, false), // 0x8C
    op(Sta, Absolute, 4, false), // 0x8D
    op(Stx, Absolute, 4, false), // 0x8E
    ILLEGAL, // 0x8F
    op(Bcc, Relative, 2, false), // 0x90
    op(Sta, IndirectY, 6, false), // 0x91
    ILLEGAL, // 0x92
    ILLEGAL, // 0x93
    op(Sty, ZeroPageX, 4, false), // 0x94
    op(Sta, ZeroPageX, 4, false), // 0x95
    op(Stx, ZeroPageY, 4, false), // 0x96
    ILLEGAL, // 0x97
    op(Tya, Implicit, 2, false), // 0x98
    op(Sta, AbsoluteY, 5, false), // 0x99
    op(Txs, Implicit, 2, false), // 0x9A
    ILLEGAL, // 0x9B
    ILLEGAL, // 0x9C
    op(Sta, AbsoluteX, 5, false), // 0x9D
    ILLEGAL, // 0x9E
    ILLEGAL, // 0x9F
    op(Ldy, Immediate, 2, false), // 0xA0
    op(Lda, IndirectX, 6, false), // 0xA1
    op(Ldx, Immediate, 2, false), // 0xA2
    ILLEGAL, // 0xA3
    op(Ldy, ZeroPage, 3, false), // 0xA4
    op(Lda, ZeroPage, 3, false), // 0xA5
    op(Ldx, ZeroPage, 3, false), // 0xA6
    ILLEGAL, // 0xA7
    op(Tay, Implicit, 2, false), // 0xA8
    op(Lda, Immediate, 2, false), // 0xA9
    op(Tax, Implicit, 2, false), // 0xAA
    ILLEGAL, // 0xAB
    op(Ldy, Absolute, 4, false), // 0xAC
    op(Lda, Absolute, 4, false), // 0xAD
    op(Ldx, Absolute, 4, false), // 0xAE
    ILLEGAL, // 0xAF
    op(Bcs, Relative, 2, false), // 0xB0
    op(Lda, IndirectY, 5, true), // 0xB1
    ILLEGAL, // 0xB2
    ILLEGAL, // 0xB3
    op(Ldy, ZeroPageX, 4, false), // 0xB4
    op(Lda, ZeroPageX, 4, false), // 0xB5
    op(Ldx, ZeroPageY, 4, false), // 0xB6
    ILLEGAL, // 0xB7
    op(Clv, Implicit, 2, false), // 0xB8
    op(Lda, AbsoluteY, 4, true), // 0xB9
    op(Tsx, Implicit, 2, false), // 0xBA
    ILLEGAL, // 0xBB
    op(Ldy, AbsoluteX, 4, true), // 0xBC
    op(Lda, AbsoluteX, 4, true), // 0xBD
    op(Ldx, AbsoluteY, 4, true), // 0xBE
    ILLEGAL, // 0xBF
    op(Cpy, Immediate, 2, false), // 0xC0
    op(Cmp, IndirectX, 6, false), // 0xC1
    ILLEGAL, // 0xC2
    ILLEGAL, // 0xC3
    op(Cpy, ZeroPage, 3, false), // 0xC4
    op(Cmp, ZeroPage, 3, false), // 0xC5
    op(Dec, ZeroPage, 5, false), // 0xC6
    ILLEGAL, // 0xC7
    op(Iny, Implicit, 2, false), // 0xC8
    op(Cmp, Immediate, 2, false), // 0xC9
    op(Dex, Implicit, 2, false), // 0xCA
    ILLEGAL, // 0xCB
    op(Cpy, Absolute, 4, false), // 0xCC
    op(Cmp, Absolute, 4, false), // 0xCD
    op(Dec, Absolute, 6, false), // 0xCE
    ILLEGAL, // 0xCF
    op(Bne, Relative, 2, false), // 0xD0
    op(Cmp, IndirectY, 5, true), // 0xD1
    ILLEGAL, // 0xD2
    ILLEGAL, // 0xD3
    ILLEGAL, // 0xD4
    op(Cmp, ZeroPageX, 4, false), // 0xD5
    op(Dec, ZeroPageX, 6, false), // 0xD6
    ILLEGAL, // 0xD7
    op(Cld, Implicit, 2, false), // 0xD8
    op(Cmp, AbsoluteY, 4, true), // 0xD9
    ILLEGAL, // 0xDA
    ILLEGAL, // 0xDB
    ILLEGAL, // 0xDC
    op(Cmp, AbsoluteX, 4, true), // 0xDD
    op(Dec, AbsoluteX, 7, false), // 0xDE
    ILLEGAL, // 0xDF
    op(Cpx, Immediate, 2, false), // 0xE0
    op(Sbc, IndirectX, 6, false), // 0xE1
    ILLEGAL, // 0xE2
    ILLEGAL, // 0xE3
    op(Cpx, ZeroPage, 3, false), // 0xE4
    op(Sbc, ZeroPage, 3, false), // 0xE5
    op(Inc, ZeroPage, 5, false), // 0xE6
    ILLEGAL, // 0xE7
    op(Inx, Implicit, 2, false), // 0xE8
    op(Sbc, Immediate, 2, false), // 0xE9
    op(Nop, Implicit, 2, false), // 0xEA
    ILLEGAL, // 0xEB
    op(Cpx, Absolute, 4, false), // 0xEC
    op(Sbc, Absolute, 4, false), // 0xED
    op(Inc, Absolute, 6, false), // 0xEE
    ILLEGAL, // 0xEF
    op(Beq, Relative, 2, false), // 0xF0
    op(Sbc, IndirectY, 5, true), // 0xF1
    ILLEGAL, // 0xF2
    ILLEGAL, // 0xF3
    ILLEGAL, // 0xF4
    op(Sbc, ZeroPageX, 4, false), // 0xF5
    op(Inc, ZeroPageX, 6, false), // 0xF6
    ILLEGAL, // 0xF7
    op(Sed, Implicit, 2, false), // 0xF8
    op(Sbc, AbsoluteY, 4, true), // 0xF9
    ILLEGAL, // 0xFA
    ILLEGAL, // 0xFB
    ILLEGAL, // 0xFC
    op(Sbc, AbsoluteX, 4, true), // 0xFD
    op(Inc, AbsoluteX, 7, false), // 0xFE
    ILLEGAL, // 0xFF
];
