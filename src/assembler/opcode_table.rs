//! Mnemonic to opcode-group lookup.
//!
//! An [`OpcodeGroup`] lists, for one mnemonic, the opcode byte of each of the
//! twelve operand forms the assembler distinguishes. Groups are derived from
//! [`OPCODE_TABLE`] at compile time so the assembler, disassembler and CPU
//! share one table.

use crate::addressing::AddressingMode;
use crate::opcodes::{Operation, OPCODE_TABLE};

/// Operand form slots, in the fixed group order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Imm,
    Zp,
    Zpx,
    Zpy,
    Abs,
    Absx,
    Absy,
    Ind,
    Indx,
    Indy,
    /// Implied or accumulator
    Sngl,
    /// Relative branch
    Bra,
}

impl Slot {
    /// The slot an addressing mode is assembled into.
    pub const fn for_mode(mode: AddressingMode) -> Slot {
        match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => Slot::Sngl,
            AddressingMode::Immediate => Slot::Imm,
            AddressingMode::ZeroPage => Slot::Zp,
            AddressingMode::ZeroPageX => Slot::Zpx,
            AddressingMode::ZeroPageY => Slot::Zpy,
            AddressingMode::Relative => Slot::Bra,
            AddressingMode::Absolute => Slot::Abs,
            AddressingMode::AbsoluteX => Slot::Absx,
            AddressingMode::AbsoluteY => Slot::Absy,
            AddressingMode::Indirect => Slot::Ind,
            AddressingMode::IndirectX => Slot::Indx,
            AddressingMode::IndirectY => Slot::Indy,
        }
    }

    /// Human-readable name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Slot::Imm => "immediate",
            Slot::Zp => "zero page",
            Slot::Zpx => "zero page,X",
            Slot::Zpy => "zero page,Y",
            Slot::Abs => "absolute",
            Slot::Absx => "absolute,X",
            Slot::Absy => "absolute,Y",
            Slot::Ind => "indirect",
            Slot::Indx => "(indirect,X)",
            Slot::Indy => "(indirect),Y",
            Slot::Sngl => "implied",
            Slot::Bra => "relative",
        }
    }

    /// Absolute counterpart of a zero-page slot.
    pub const fn widened(self) -> Option<Slot> {
        match self {
            Slot::Zp => Some(Slot::Abs),
            Slot::Zpx => Some(Slot::Absx),
            Slot::Zpy => Some(Slot::Absy),
            _ => None,
        }
    }
}

/// Opcode bytes of one mnemonic, indexed by [`Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeGroup {
    slots: [Option<u8>; 12],
}

impl OpcodeGroup {
    /// Opcode for `slot`, or `None` if the mnemonic lacks that form.
    pub fn get(&self, slot: Slot) -> Option<u8> {
        self.slots[slot as usize]
    }

    pub fn supports(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    /// True for the conditional branch family.
    pub fn is_branch(&self) -> bool {
        self.supports(Slot::Bra)
    }
}

/// Looks up the group for `mnemonic`, ignoring case.
///
/// ```
/// use kit6502::assembler::opcode_table::{opcode_group, Slot};
///
/// let lda = opcode_group("lda").unwrap();
/// assert_eq!(lda.get(Slot::Imm), Some(0xA9));
/// assert_eq!(lda.get(Slot::Ind), None);
/// assert!(opcode_group("XYZ").is_none());
/// ```
pub fn opcode_group(mnemonic: &str) -> Option<OpcodeGroup> {
    Operation::from_mnemonic(mnemonic).map(|op| GROUPS[op as usize])
}

const OPERATION_COUNT: usize = Operation::Illegal as usize + 1;

/// Groups indexed by [`Operation`]; the `Illegal` entry stays empty.
const GROUPS: [OpcodeGroup; OPERATION_COUNT] = build_groups();

const fn build_groups() -> [OpcodeGroup; OPERATION_COUNT] {
    let mut groups = [OpcodeGroup { slots: [None; 12] }; OPERATION_COUNT];
    let mut opcode = 0;
    while opcode < OPCODE_TABLE.len() {
        let meta = &OPCODE_TABLE[opcode];
        if !meta.is_illegal() {
            let slot = Slot::for_mode(meta.addressing_mode) as usize;
            groups[meta.operation as usize].slots[slot] = Some(opcode as u8);
        }
        opcode += 1;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lda_group() {
        let group = opcode_group("LDA").unwrap();
        let expected = [
            (Slot::Imm, 0xA9),
            (Slot::Zp, 0xA5),
            (Slot::Zpx, 0xB5),
            (Slot::Abs, 0xAD),
            (Slot::Absx, 0xBD),
            (Slot::Absy, 0xB9),
            (Slot::Indx, 0xA1),
            (Slot::Indy, 0xB1),
        ];
        for (slot, opcode) in expected {
            assert_eq!(group.get(slot), Some(opcode), "{:?}", slot);
        }
        assert!(!group.supports(Slot::Zpy));
        assert!(!group.supports(Slot::Sngl));
        assert!(!group.is_branch());
    }

    #[test]
    fn test_single_byte_forms() {
        assert_eq!(opcode_group("ASL").unwrap().get(Slot::Sngl), Some(0x0A));
        assert_eq!(opcode_group("BRK").unwrap().get(Slot::Sngl), Some(0x00));
        assert_eq!(opcode_group("nop").unwrap().get(Slot::Sngl), Some(0xEA));
    }

    #[test]
    fn test_branch_and_jump_groups() {
        let bne = opcode_group("BNE").unwrap();
        assert!(bne.is_branch());
        assert_eq!(bne.get(Slot::Bra), Some(0xD0));

        let jmp = opcode_group("JMP").unwrap();
        assert_eq!(jmp.get(Slot::Abs), Some(0x4C));
        assert_eq!(jmp.get(Slot::Ind), Some(0x6C));
    }

    #[test]
    fn test_unknown_mnemonic() {
        assert!(opcode_group("???").is_none());
        assert!(opcode_group("").is_none());
        assert!(opcode_group("LDZ").is_none());
    }

    #[test]
    fn test_every_operation_has_a_group() {
        for meta in OPCODE_TABLE.iter().filter(|m| !m.is_illegal()) {
            let group = opcode_group(meta.mnemonic).unwrap();
            assert!(group.slots.iter().any(Option::is_some), "{}", meta.mnemonic);
        }
        assert!(GROUPS[Operation::Illegal as usize]
            .slots
            .iter()
            .all(Option::is_none));
    }

    #[test]
    fn test_widened_slots() {
        assert_eq!(Slot::Zpy.widened(), Some(Slot::Absy));
        assert_eq!(Slot::Abs.widened(), None);
    }
}
