//! # Memory Bus Abstraction
//!
//! The `MemoryBus` trait decouples the CPU from the memory implementation. The
//! toolchain ships one implementation, `FlatMemory`: 64KB of RAM where every
//! address is a `u16`, so all accesses wrap modulo 65536.
//!
//! The stack lives in page 1 (0x0100-0x01FF).

use crate::error::EmulatorError;

/// Size of the 6502 address space in bytes.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Memory bus trait for CPU to read/write bytes.
///
/// Reads and writes never fail: the 6502 has no bus error mechanism.
///
/// # Examples
///
/// ```
/// use kit6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word. The high byte address wraps past 0xFFFF.
    fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// Writes a little-endian word. The high byte address wraps past 0xFFFF.
    fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }
}

/// Simple 64KB flat memory implementation.
///
/// All addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00.
///
/// # Examples
///
/// ```
/// use kit6502::{FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(&[0xA9, 0x01], 0x0600).unwrap();
/// assert_eq!(memory.read_word(0x0600), 0x01A9);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8; MEMORY_SIZE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Copies `bytes` into memory starting at `addr`.
    ///
    /// Fails without writing anything if the block would run past 0xFFFF.
    pub fn load(&mut self, bytes: &[u8], addr: u16) -> Result<(), EmulatorError> {
        let start = addr as usize;
        let end = start + bytes.len();
        if end > MEMORY_SIZE {
            return Err(EmulatorError::LoadOutOfRange {
                address: addr,
                len: bytes.len(),
            });
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Reads `count` contiguous bytes, wrapping past 0xFFFF.
    pub fn read_bytes(&self, addr: u16, count: usize) -> Vec<u8> {
        (0..count)
            .map(|i| self.read(addr.wrapping_add(i as u16)))
            .collect()
    }

    /// Zeroes every byte.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Raw memory image, suitable for restoring later.
    pub fn snapshot(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    /// Restores a raw memory image taken with [`snapshot`](Self::snapshot).
    ///
    /// Images shorter than 64KB leave the remaining bytes untouched.
    pub fn restore(&mut self, image: &[u8]) -> Result<(), EmulatorError> {
        self.load(image, 0)
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("size", &MEMORY_SIZE)
            .finish()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_word_access_wraps() {
        let mut mem = FlatMemory::new();
        mem.write_word(0xFFFF, 0xBEEF);

        assert_eq!(mem.read(0xFFFF), 0xEF);
        assert_eq!(mem.read(0x0000), 0xBE);
        assert_eq!(mem.read_word(0xFFFF), 0xBEEF);
    }

    #[test]
    fn test_load_fits_exactly() {
        let mut mem = FlatMemory::new();
        assert!(mem.load(&[1, 2], 0xFFFE).is_ok());
        assert_eq!(mem.read(0xFFFF), 2);
    }

    #[test]
    fn test_load_out_of_range() {
        let mut mem = FlatMemory::new();
        let err = mem.load(&[1, 2, 3], 0xFFFE).unwrap_err();
        assert_eq!(
            err,
            EmulatorError::LoadOutOfRange {
                address: 0xFFFE,
                len: 3
            }
        );
        // Nothing written on failure
        assert_eq!(mem.read(0xFFFE), 0);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut mem = FlatMemory::new();
        mem.write(0x0200, 0x55);
        let image = mem.snapshot();
        assert_eq!(image.len(), MEMORY_SIZE);

        mem.clear();
        assert_eq!(mem.read(0x0200), 0);

        mem.restore(&image).unwrap();
        assert_eq!(mem.read(0x0200), 0x55);
    }

    #[test]
    fn test_read_bytes_wraps() {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFF, 0xAA);
        mem.write(0x0000, 0xBB);
        assert_eq!(mem.read_bytes(0xFFFF, 2), vec![0xAA, 0xBB]);
    }
}
