//! Layout constants.
//!
//! The supported backend stores each scalar signal in a contiguous little-endian
//! byte buffer whose most significant byte carries a validity mask for the bits
//! beyond the declared width.

/// Widest scalar signal supported, in bits.
///
/// Matches the widest scalar storage class of the backend (a 64-bit quad word);
/// wider signals are stored as word arrays and are rejected as unsupported shapes.
pub const MAX_BIT_WIDTH: u32 = 64;

/// Number of bits in one byte of signal memory.
pub const BITS_PER_BYTE: u32 = 8;

/// Separator between segments of a hierarchical signal path.
pub const PATH_SEPARATOR: char = '.';
