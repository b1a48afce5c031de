//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct representing the 6502 processor state
//! and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: packed [`Status`] byte (NV-BDIZC)
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! `step()` fetches the opcode at PC, increments PC, then dispatches through
//! the dense [`OPCODE_TABLE`]. Handlers receive the CPU explicitly and compute
//! their effective address through the addressing routines defined here. The
//! cycles of a step are the table's base cost plus any extras the handler
//! charged (page crossings, taken branches).

use bitflags::bitflags;
use log::trace;

use crate::addressing::AddressingMode;
use crate::instructions;
use crate::memory::{FlatMemory, MemoryBus};
use crate::opcodes::OPCODE_TABLE;
use crate::error::EmulatorError;

/// Address of the vector BRK loads the program counter from.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

bitflags! {
    /// Processor status register (P), bit layout NV-BDIZC.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry
        const CARRY = 0b0000_0001;
        /// Zero
        const ZERO = 0b0000_0010;
        /// Interrupt disable
        const INTERRUPT_DISABLE = 0b0000_0100;
        /// Decimal mode
        const DECIMAL = 0b0000_1000;
        /// Break
        const BREAK = 0b0001_0000;
        /// Unused, reads as 1
        const UNUSED = 0b0010_0000;
        /// Overflow
        const OVERFLOW = 0b0100_0000;
        /// Negative
        const NEGATIVE = 0b1000_0000;
    }
}

/// The programmer-visible register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Status flags
    pub status: Status,
    /// Stack pointer (0x0100 + sp gives full stack address)
    pub sp: u8,
    /// Program counter
    pub pc: u16,
}

impl Registers {
    /// Documented power-up values: SP 0xFF, flags 0x20, everything else 0.
    pub const fn power_up() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            status: Status::UNUSED,
            sp: 0xFF,
            pc: 0,
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::power_up()
    }
}

/// Outcome of executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Cycles consumed: base cost plus page-crossing and branch extras
    pub cycles: u32,

    /// True if the instruction was BRK
    pub is_break: bool,
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait; the
/// default is the 64KB [`FlatMemory`].
///
/// # Examples
///
/// ```
/// use kit6502::{Cpu, FlatMemory};
///
/// let mut cpu = Cpu::new(FlatMemory::new());
/// cpu.load(&[0xA9, 0x03], 0x0600).unwrap(); // LDA #$03
/// cpu.set_pc(0x0600);
///
/// let result = cpu.step();
/// assert_eq!(result.cycles, 2);
/// assert_eq!(cpu.a(), 0x03);
/// assert_eq!(cpu.pc(), 0x0602);
/// ```
pub struct Cpu<M: MemoryBus = FlatMemory> {
    pub(crate) regs: Registers,

    /// Total CPU cycles executed since the last reset
    pub(crate) cycles: u64,

    pub(crate) memory: M,

    /// Extra cycles charged by the instruction currently executing
    pub(crate) extra_cycles: u32,

    /// Whether the current opcode pays for page crossings
    pub(crate) page_penalty: bool,

    /// Set by BRK for the current step
    pub(crate) break_taken: bool,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU in the power-up state around the given memory.
    pub fn new(memory: M) -> Self {
        Self {
            regs: Registers::power_up(),
            cycles: 0,
            memory,
            extra_cycles: 0,
            page_penalty: false,
            break_taken: false,
        }
    }

    /// Reinitializes registers to their power-up values and zeroes the cycle
    /// counter. Memory is left untouched.
    pub fn reset(&mut self) {
        self.regs = Registers::power_up();
        self.cycles = 0;
        self.extra_cycles = 0;
        self.page_penalty = false;
        self.break_taken = false;
    }

    /// Executes one instruction and returns the cycles it consumed.
    ///
    /// Undefined opcodes are one-byte no-ops; execution never fails.
    pub fn step(&mut self) -> ExecutionResult {
        let pc = self.regs.pc;
        let opcode = self.memory.read(pc);
        self.regs.pc = pc.wrapping_add(1);

        let metadata = OPCODE_TABLE[opcode as usize];
        self.extra_cycles = 0;
        self.page_penalty = metadata.page_penalty;
        self.break_taken = false;

        instructions::execute(self, &metadata);

        let cycles = metadata.base_cycles as u32 + self.extra_cycles;
        self.cycles += cycles as u64;

        trace!(
            "{:04X}  {:02X}  {:<3}  +{} cycles  A={:02X} X={:02X} Y={:02X} P={:02X} SP={:02X}",
            pc,
            opcode,
            metadata.mnemonic,
            cycles,
            self.regs.a,
            self.regs.x,
            self.regs.y,
            self.regs.status.bits(),
            self.regs.sp
        );

        ExecutionResult {
            cycles,
            is_break: self.break_taken,
        }
    }

    /// Runs until at least `cycle_budget` cycles have elapsed.
    ///
    /// Returns the cycles actually consumed, which may overshoot the budget
    /// by up to one instruction.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> u64 {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step();
        }

        self.cycles - start_cycles
    }

    // ========== Addressing ==========

    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word(&mut self) -> u16 {
        let value = self.memory.read_word(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(2);
        value
    }

    /// Reads a pointer from zero page; the high byte wraps within page zero.
    fn read_zero_page_word(&self, zp: u8) -> u16 {
        u16::from_le_bytes([
            self.memory.read(zp as u16),
            self.memory.read(zp.wrapping_add(1) as u16),
        ])
    }

    /// Adds an index to a base address, charging the page-crossing cycle when
    /// the current opcode is subject to it.
    fn indexed(&mut self, base: u16, index: u8) -> u16 {
        let addr = base.wrapping_add(index as u16);
        if self.page_penalty && (base & 0xFF00) != (addr & 0xFF00) {
            self.extra_cycles += 1;
        }
        addr
    }

    /// Computes the effective address for `mode`, consuming operand bytes.
    ///
    /// For `Relative` the result is the branch target. `Implicit` and
    /// `Accumulator` have no operand and return the current PC.
    pub(crate) fn operand_address(&mut self, mode: AddressingMode) -> u16 {
        match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => self.regs.pc,
            AddressingMode::Immediate => {
                let addr = self.regs.pc;
                self.regs.pc = addr.wrapping_add(1);
                addr
            }
            AddressingMode::ZeroPage => self.fetch_byte() as u16,
            AddressingMode::ZeroPageX => self.fetch_byte().wrapping_add(self.regs.x) as u16,
            AddressingMode::ZeroPageY => self.fetch_byte().wrapping_add(self.regs.y) as u16,
            AddressingMode::IndirectX => {
                let zp = self.fetch_byte().wrapping_add(self.regs.x);
                self.read_zero_page_word(zp)
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte();
                let base = self.read_zero_page_word(zp);
                self.indexed(base, self.regs.y)
            }
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                self.indexed(base, self.regs.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                self.indexed(base, self.regs.y)
            }
            AddressingMode::Indirect => {
                // NMOS quirk: the pointer's high byte never carries into the next page
                let ptr = self.fetch_word();
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                u16::from_le_bytes([self.memory.read(ptr), self.memory.read(hi_addr)])
            }
            AddressingMode::Relative => {
                let offset = self.fetch_byte() as i8;
                self.regs.pc.wrapping_add_signed(offset as i16)
            }
        }
    }

    /// Reads the operand value for a read instruction.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> u8 {
        let addr = self.operand_address(mode);
        self.memory.read(addr)
    }

    // ========== Flags & Stack ==========

    pub(crate) fn set_zn(&mut self, value: u8) {
        self.regs.status.set(Status::ZERO, value == 0);
        self.regs.status.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    pub(crate) fn flag(&self, flag: Status) -> bool {
        self.regs.status.contains(flag)
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.regs.sp as u16)
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        u16::from_le_bytes([lo, hi])
    }

    // ========== Register Access ==========

    /// Snapshot of the register file.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    /// Mutable access to the register file.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the status register as a packed byte.
    pub fn status(&self) -> u8 {
        self.regs.status.bits()
    }

    /// Returns the total number of CPU cycles executed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    /// Replaces the status register. Every bit is kept as given.
    pub fn set_status(&mut self, value: u8) {
        self.regs.status = Status::from_bits_retain(value);
    }

    // ========== Memory Access ==========

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    pub fn read_word(&self, addr: u16) -> u16 {
        self.memory.read_word(addr)
    }

    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.memory.write_word(addr, value);
    }
}

macro_rules! flag_accessors {
    ($($get:ident, $set:ident => $flag:ident;)*) => {
        impl<M: MemoryBus> Cpu<M> {
            $(
                pub fn $get(&self) -> bool {
                    self.regs.status.contains(Status::$flag)
                }

                pub fn $set(&mut self, value: bool) {
                    self.regs.status.set(Status::$flag, value);
                }
            )*
        }
    };
}

flag_accessors! {
    flag_n, set_flag_n => NEGATIVE;
    flag_v, set_flag_v => OVERFLOW;
    flag_b, set_flag_b => BREAK;
    flag_d, set_flag_d => DECIMAL;
    flag_i, set_flag_i => INTERRUPT_DISABLE;
    flag_z, set_flag_z => ZERO;
    flag_c, set_flag_c => CARRY;
}

impl Cpu<FlatMemory> {
    /// Copies `bytes` into memory at `addr`.
    ///
    /// Fails if the block would extend past the 64KB address space.
    pub fn load(&mut self, bytes: &[u8], addr: u16) -> Result<(), EmulatorError> {
        self.memory.load(bytes, addr)
    }

    /// Zeroes all of memory.
    pub fn clear_memory(&mut self) {
        self.memory.clear();
    }
}

impl Default for Cpu<FlatMemory> {
    fn default() -> Self {
        Self::new(FlatMemory::new())
    }
}
