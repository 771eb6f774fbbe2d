//! Signal memory arena.
//!
//! This module provides the byte store that holds the value of every scalar signal
//! of one simulation session. The backend evaluates the design in place inside this
//! store, and signal handles address it by offset. It provides:
//! 1. **Allocation:** Bump allocation of per-signal byte buffers for layout builders.
//! 2. **Access:** Byte, slice and little-endian integer access for backends.
//! 3. **Ownership:** The arena is owned by the session, so no handle can observe
//!    memory after teardown.

use crate::common::SignalAddr;

/// Contiguous, zero-initialized byte store for signal values.
///
/// Every signal occupies `ceil(bit_width / 8)` consecutive bytes in little-endian
/// order. Reads and writes are bounds-checked; handles are validated against the
/// arena size when they are registered, so the checks never fire for them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignalMemory {
    bytes: Vec<u8>,
}

impl SignalMemory {
    /// Creates a zeroed signal memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the size of the memory in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if no bytes have been allocated.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reserves `byte_width` zeroed bytes at the end of the memory.
    ///
    /// Used by layout builders to place signals one after another.
    ///
    /// # Returns
    ///
    /// The address of the first reserved byte.
    pub fn allocate(&mut self, byte_width: usize) -> SignalAddr {
        let addr = SignalAddr::new(self.bytes.len());
        self.bytes.resize(self.bytes.len() + byte_width, 0);
        addr
    }

    /// Returns `true` if `len` bytes starting at `addr` lie inside the memory.
    pub fn contains(&self, addr: SignalAddr, len: usize) -> bool {
        addr.checked_add(len)
            .is_some_and(|end| end.val() <= self.bytes.len())
    }

    /// Reads a single byte.
    pub fn read_u8(&self, addr: SignalAddr) -> u8 {
        self.bytes[addr.val()]
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, addr: SignalAddr, val: u8) {
        self.bytes[addr.val()] = val;
    }

    /// Returns the `len` bytes starting at `addr`.
    pub fn read_slice(&self, addr: SignalAddr, len: usize) -> &[u8] {
        assert!(self.contains(addr, len), "signal memory read out of bounds");
        &self.bytes[addr.val()..addr.val() + len]
    }

    /// Copies `data` into memory starting at `addr`.
    pub fn write_slice(&mut self, addr: SignalAddr, data: &[u8]) {
        assert!(
            self.contains(addr, data.len()),
            "signal memory write out of bounds"
        );
        self.bytes[addr.val()..addr.val() + data.len()].copy_from_slice(data);
    }

    /// Reads a little-endian unsigned integer of `byte_width` bytes (at most 8).
    pub fn read_uint(&self, addr: SignalAddr, byte_width: usize) -> u64 {
        self.read_slice(addr, byte_width)
            .iter()
            .rev()
            .fold(0, |acc, &b| (acc << 8) | u64::from(b))
    }

    /// Writes the low `byte_width` bytes (at most 8) of `val` in little-endian order.
    pub fn write_uint(&mut self, addr: SignalAddr, byte_width: usize, val: u64) {
        let le = val.to_le_bytes();
        self.write_slice(addr, &le[..byte_width]);
    }

    /// Returns the whole memory as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the whole memory as a mutable byte slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}
