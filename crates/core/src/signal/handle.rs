//! Signal handle.
//!
//! A `SignalHandle` binds one scalar signal of the backend to the metadata needed
//! to interpret it. It provides:
//! 1. **Value access:** Integer reads and range/capability-checked writes.
//! 2. **Change detection:** A cached copy of the previous bytes and a byte compare.
//! 3. **Callbacks:** The ordered list of driver callbacks waiting on the next change.
//!
//! Handles hold an offset into the session's `SignalMemory`, not a pointer, and
//! every access takes the memory explicitly. The session owns both, so a handle can
//! never be used after the memory it describes is gone.

use tracing::warn;

use crate::common::constants::MAX_BIT_WIDTH;
use crate::common::{ConstructionError, Result, SignalAddr, SimError, WriteDenied};
use crate::events::CallbackId;

use super::codec;
use super::gate::WriteGate;
use super::memory::SignalMemory;

/// Driver-side access rights of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// The driver may only read (design outputs and internal signals).
    #[default]
    ReadOnly,
    /// The driver may read and write (design inputs).
    ReadWrite,
}

impl Access {
    /// Maps a writable flag to an access mode.
    pub const fn from_writable(writable: bool) -> Self {
        if writable { Self::ReadWrite } else { Self::ReadOnly }
    }

    /// Returns `true` for [`Access::ReadWrite`].
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}

/// Proxy for one scalar signal in signal memory.
///
/// Handles are built and evaluated by their session only; outside it they expose
/// metadata and never touch memory.
#[derive(Debug)]
pub struct SignalHandle {
    name: String,
    access: Access,
    addr: SignalAddr,
    bit_width: u32,
    byte_width: usize,
    tail_mask: u8,
    signed: bool,
    cached: Vec<u8>,
    callbacks: Vec<CallbackId>,
    gate: WriteGate,
}

impl SignalHandle {
    /// Creates a handle over `bit_width` bits at `addr`.
    ///
    /// The change cache is zero-filled; call [`cache_store`](Self::cache_store)
    /// before the first [`has_changed`](Self::has_changed).
    ///
    /// # Arguments
    ///
    /// * `access` - Whether the driver may write the signal.
    /// * `addr` - Offset of the signal's storage in `memory`.
    /// * `bit_width` - Declared width, 1 to [`MAX_BIT_WIDTH`].
    /// * `signed` - Two's-complement interpretation.
    /// * `name` - Physical (full dotted) name.
    /// * `gate` - The session's shared write gate.
    /// * `memory` - The memory the handle will address, used for bounds validation.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::ZeroWidth`] for a zero width,
    /// [`ConstructionError::AddressOutOfBounds`] if the storage does not fit in
    /// `memory`, and [`SimError::Shape`] for widths above [`MAX_BIT_WIDTH`].
    pub(crate) fn new(
        access: Access,
        addr: SignalAddr,
        bit_width: u32,
        signed: bool,
        name: impl Into<String>,
        gate: WriteGate,
        memory: &SignalMemory,
    ) -> Result<Self> {
        let name = name.into();
        if bit_width == 0 {
            return Err(ConstructionError::ZeroWidth { path: name }.into());
        }
        if bit_width > MAX_BIT_WIDTH {
            return Err(SimError::Shape {
                reason: format!("{bit_width}-bit signals exceed the {MAX_BIT_WIDTH}-bit scalar limit"),
                path: name,
            });
        }

        let byte_width = codec::byte_width(bit_width);
        if !memory.contains(addr, byte_width) {
            return Err(ConstructionError::AddressOutOfBounds {
                path: name,
                addr,
                byte_width,
                memory_len: memory.len(),
            }
            .into());
        }

        Ok(Self {
            name,
            access,
            addr,
            bit_width,
            byte_width,
            tail_mask: codec::tail_mask(bit_width),
            signed,
            cached: vec![0; byte_width],
            callbacks: Vec::new(),
            gate,
        })
    }

    /// Physical name of the signal.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access rights of the driver.
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Returns `true` if the driver may write this signal (gate permitting).
    pub const fn is_writable(&self) -> bool {
        self.access.is_writable()
    }

    /// Offset of the signal's storage.
    pub const fn addr(&self) -> SignalAddr {
        self.addr
    }

    /// Declared width in bits.
    pub const fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Storage size in bytes.
    pub const fn byte_width(&self) -> usize {
        self.byte_width
    }

    /// Mask of the defined bits of the most significant byte.
    pub const fn tail_mask(&self) -> u8 {
        self.tail_mask
    }

    /// Returns `true` for two's-complement signals.
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Callbacks waiting on the next change, in registration order.
    pub fn callbacks(&self) -> &[CallbackId] {
        &self.callbacks
    }

    /// Bytes the handle compares against at the next change check.
    pub fn cached_bytes(&self) -> &[u8] {
        &self.cached
    }

    /// Returns `true` if `other` describes the same storage and interpretation.
    pub fn same_layout(&self, other: &Self) -> bool {
        self.addr == other.addr
            && self.bit_width == other.bit_width
            && self.signed == other.signed
            && self.access == other.access
    }

    /// Current bytes of the signal.
    pub(crate) fn bytes<'m>(&self, memory: &'m SignalMemory) -> &'m [u8] {
        memory.read_slice(self.addr, self.byte_width)
    }

    /// Reads the current value. Always permitted.
    pub(crate) fn read(&self, memory: &SignalMemory) -> i128 {
        codec::decode(self.bytes(memory), self.bit_width, self.signed)
    }

    /// Writes `value` into signal memory.
    ///
    /// All bytes are stored at once, with the undefined tail bits cleared. A rejected
    /// write leaves memory untouched. A write that changes the stored bytes is
    /// recorded on the gate, so the coordinator settles it before the step commits.
    ///
    /// # Errors
    ///
    /// [`SimError::Capability`] if the handle is read-only or the write gate is
    /// closed, [`SimError::Range`] if `value` does not fit the declared width.
    pub(crate) fn write(&self, memory: &mut SignalMemory, value: i128) -> Result<()> {
        self.check_writable()?;
        if !codec::fits(value, self.bit_width, self.signed) {
            warn!(signal = %self.name, value = %value, bit_width = self.bit_width, "write out of range");
            return Err(SimError::Range {
                signal: self.name.clone(),
                value,
                bit_width: self.bit_width,
                signed: self.signed,
            });
        }

        let mut buf = [0u8; 8];
        let buf = &mut buf[..self.byte_width];
        codec::encode(value, self.bit_width, buf);
        // Rewriting the stored value is not a new input.
        if self.bytes(memory) != &*buf {
            memory.write_slice(self.addr, buf);
            self.gate.mark_written();
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<()> {
        let denied = if !self.access.is_writable() {
            WriteDenied::ReadOnly
        } else if !self.gate.is_open() {
            WriteDenied::GateClosed
        } else {
            return Ok(());
        };
        warn!(signal = %self.name, %denied, "write rejected");
        Err(SimError::Capability {
            signal: self.name.clone(),
            denied,
        })
    }

    /// Copies the current bytes into the change cache.
    pub(crate) fn cache_store(&mut self, memory: &SignalMemory) {
        self.cached
            .copy_from_slice(memory.read_slice(self.addr, self.byte_width));
    }

    /// Returns `true` if the current bytes differ from the cache.
    ///
    /// Does not refresh the cache; the caller stores it once the change has been
    /// consumed, so no transition is lost while callbacks are being queued.
    pub(crate) fn has_changed(&self, memory: &SignalMemory) -> bool {
        self.cached != self.bytes(memory)
    }

    /// Appends a callback to run on the next change.
    pub(crate) fn push_callback(&mut self, callback: CallbackId) {
        self.callbacks.push(callback);
    }

    /// Empties the callback list after its contents have been queued.
    pub(crate) fn clear_callbacks(&mut self) {
        self.callbacks.clear();
    }
}
