//! # Batched Execution Scheduler
//!
//! [`Emulator`] owns a [`Cpu`] and paces it in soft real time. Execution
//! proceeds in batches of roughly `batch_duration` worth of cycles; after each
//! batch the scheduler compares the wall-clock time spent with the time the
//! cycles should have taken at `cycles_per_second` and yields for the
//! shortfall.
//!
//! A batch ends when its cycle quota is reached, when a BRK executes with
//! break-stop enabled, or when the halt flag is observed. The halt flag is
//! checked between instructions, so the instruction in flight always
//! completes.
//!
//! ```
//! use kit6502::{assemble, Emulator, StopReason};
//!
//! let program = assemble("LDX #$05\nloop: DEX\nBNE loop\nBRK").unwrap();
//!
//! let mut emulator = Emulator::new();
//! emulator.load(&program, 0x0000).unwrap();
//!
//! assert_eq!(emulator.run(true), StopReason::Break);
//! assert_eq!(emulator.registers().x, 0);
//! ```

use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error};

use crate::cpu::{Cpu, ExecutionResult, Registers};
use crate::disassembler::{decode_instruction, DisassembledInstruction};
use crate::error::EmulatorError;
use crate::memory::FlatMemory;

/// Return type of step hooks. An error stops the run with [`StopReason::Error`].
pub type HookResult = Result<(), Box<dyn Error + Send + Sync>>;

type StepHook = Box<dyn FnMut(&ExecutionResult) -> HookResult>;
type BatchHook = Box<dyn FnMut(u64)>;
type StopHook = Box<dyn FnMut(StopReason)>;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Halt was requested
    User,
    /// BRK executed with break-stop enabled
    Break,
    /// A step hook returned an error
    Error,
}

/// Result of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Keep running after waiting `wait` to stay on pace
    Continue { wait: Duration },
    /// The run is over
    Stopped(StopReason),
}

/// Pacing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Emulated clock rate
    pub cycles_per_second: u64,

    /// Wall-clock length of one batch
    pub batch_duration: Duration,
}

impl SchedulerConfig {
    /// Cycle quota of one batch, at least 1.
    pub fn cycles_per_batch(&self) -> u64 {
        let cycles = self.cycles_per_second as u128 * self.batch_duration.as_nanos() / 1_000_000_000;
        (cycles as u64).max(1)
    }

    /// Wall-clock time `cycles` should take at the configured rate.
    pub fn duration_of(&self, cycles: u64) -> Duration {
        let nanos = (cycles as u128 * 1_000_000_000)
            .checked_div(self.cycles_per_second as u128)
            .unwrap_or(0);
        Duration::from_nanos(nanos as u64)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cycles_per_second: 1_000_000,
            batch_duration: Duration::from_millis(10),
        }
    }
}

/// Cloneable handle that asks a running emulator to stop.
///
/// The request only sets a flag; the emulator honors it after the current
/// instruction and ends the batch.
#[derive(Debug, Clone, Default)]
pub struct HaltHandle(Arc<AtomicBool>);

impl HaltHandle {
    pub fn halt(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_halted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// A CPU with 64KB of RAM, a batching scheduler and event hooks.
pub struct Emulator {
    cpu: Cpu<FlatMemory>,
    config: SchedulerConfig,
    halt: HaltHandle,
    running: bool,
    stop_on_break: bool,
    step_hook: Option<StepHook>,
    batch_hook: Option<BatchHook>,
    stop_hook: Option<StopHook>,
}

impl Emulator {
    /// Creates an emulator running at 1 MHz in 10 ms batches.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            cpu: Cpu::new(FlatMemory::new()),
            config,
            halt: HaltHandle::default(),
            running: false,
            stop_on_break: true,
            step_hook: None,
            batch_hook: None,
            stop_hook: None,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // ========== Hooks ==========

    /// Called after every instruction of a batched run, including a BRK
    /// that ends the run.
    pub fn on_step<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&ExecutionResult) -> HookResult + 'static,
    {
        self.step_hook = Some(Box::new(hook));
        self
    }

    /// Called after every completed batch with the cycles it consumed.
    pub fn on_batch<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(u64) + 'static,
    {
        self.batch_hook = Some(Box::new(hook));
        self
    }

    /// Called once when a run stops.
    pub fn on_stop<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(StopReason) + 'static,
    {
        self.stop_hook = Some(Box::new(hook));
        self
    }

    // ========== Control ==========

    /// Copies `bytes` into memory at `addr`.
    pub fn load(&mut self, bytes: &[u8], addr: u16) -> Result<(), EmulatorError> {
        self.cpu.load(bytes, addr)
    }

    /// Restores power-up register values; a hard reset also zeroes memory.
    pub fn reset(&mut self, hard: bool) -> Result<(), EmulatorError> {
        if self.running {
            return Err(EmulatorError::ResetWhileRunning);
        }

        self.cpu.reset();
        if hard {
            self.cpu.clear_memory();
        }
        Ok(())
    }

    /// Executes one instruction outside of any batched run. Hooks are not
    /// called.
    pub fn step(&mut self) -> ExecutionResult {
        self.cpu.step()
    }

    /// Enters the running state. Clears any pending halt request.
    pub fn start(&mut self, stop_on_break: bool) {
        self.halt.clear();
        self.stop_on_break = stop_on_break;
        self.running = true;
        debug!(
            "run started at ${:04X}, {} cycles per batch",
            self.cpu.pc(),
            self.config.cycles_per_batch()
        );
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Requests a stop at the end of the current batch. Ignored when idle.
    pub fn halt(&self) {
        if self.running {
            self.halt.halt();
        }
    }

    /// Handle for halting from hooks or other threads.
    pub fn halt_handle(&self) -> HaltHandle {
        self.halt.clone()
    }

    /// Runs one batch of a run begun with [`start`](Self::start).
    pub fn run_batch(&mut self) -> Result<BatchOutcome, EmulatorError> {
        if !self.running {
            return Err(EmulatorError::NotRunning);
        }

        let started = Instant::now();
        let quota = self.config.cycles_per_batch();
        let mut cycles = 0u64;

        loop {
            let result = self.cpu.step();
            cycles += result.cycles as u64;

            if let Some(hook) = self.step_hook.as_mut() {
                if let Err(err) = hook(&result) {
                    error!("step hook failed at ${:04X}: {}", self.cpu.pc(), err);
                    return Ok(self.stop(StopReason::Error));
                }
            }

            if result.is_break && self.stop_on_break {
                return Ok(self.stop(StopReason::Break));
            }

            if self.halt.is_halted() || cycles >= quota {
                break;
            }
        }

        if let Some(hook) = self.batch_hook.as_mut() {
            hook(cycles);
        }

        if self.halt.is_halted() {
            return Ok(self.stop(StopReason::User));
        }

        let wait = self.config.duration_of(cycles).saturating_sub(started.elapsed());
        debug!("batch of {} cycles, waiting {:?}", cycles, wait);
        Ok(BatchOutcome::Continue { wait })
    }

    /// Runs batches until the emulator stops, sleeping between them to hold
    /// the configured clock rate.
    pub fn run(&mut self, stop_on_break: bool) -> StopReason {
        self.start(stop_on_break);

        loop {
            match self.run_batch() {
                Ok(BatchOutcome::Continue { wait }) => {
                    if wait != Duration::ZERO {
                        thread::sleep(wait);
                    }
                }
                Ok(BatchOutcome::Stopped(reason)) => return reason,
                Err(err) => {
                    error!("run aborted: {}", err);
                    return StopReason::Error;
                }
            }
        }
    }

    fn stop(&mut self, reason: StopReason) -> BatchOutcome {
        self.running = false;
        debug!(
            "stopped ({:?}) after {} cycles, next: {}",
            reason,
            self.cpu.cycles(),
            self.next_instruction()
        );

        if let Some(hook) = self.stop_hook.as_mut() {
            hook(reason);
        }
        BatchOutcome::Stopped(reason)
    }

    // ========== Inspection ==========

    /// Disassembles the instruction at PC.
    pub fn next_instruction(&self) -> DisassembledInstruction {
        let pc = self.cpu.pc();
        let bytes = self.cpu.memory().read_bytes(pc, 3);
        decode_instruction(&bytes, 0, pc)
    }

    pub fn registers(&self) -> Registers {
        self.cpu.registers()
    }

    /// Total cycles since the last reset.
    pub fn total_cycles(&self) -> u64 {
        self.cpu.cycles()
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.cpu.read_byte(addr)
    }

    pub fn read_word(&self, addr: u16) -> u16 {
        self.cpu.read_word(addr)
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.cpu.write_byte(addr, value);
    }

    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.cpu.write_word(addr, value);
    }

    pub fn cpu(&self) -> &Cpu<FlatMemory> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu<FlatMemory> {
        &mut self.cpu
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
