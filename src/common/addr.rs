//! Address Decomposition.
//!
//! A 64-bit address is split into three fields for a cache with `s` set-index
//! bits and `b` block-offset bits:
//!
//! ```text
//! 63                     s+b        b         0
//! +------------------------+---------+---------+
//! |          tag           |   set   | offset  |
//! +------------------------+---------+---------+
//! ```
//!
//! The fields are derived on every access and never stored alongside the
//! address.

/// Width of a simulated address in bits.
pub const ADDRESS_BITS: u32 = 64;

/// Shift helper that yields zero when the shift amount reaches the word width.
#[inline]
fn shr(value: u64, amount: u32) -> u64 {
    value.checked_shr(amount).unwrap_or(0)
}

/// Bit layout used to split an address into tag, set index, and offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    set_bits: u32,
    block_bits: u32,
}

impl AddressLayout {
    /// Creates a layout for `set_bits` index bits and `block_bits` offset bits.
    ///
    /// The caller is responsible for ensuring `set_bits + block_bits` does not
    /// exceed [`ADDRESS_BITS`].
    pub fn new(set_bits: u32, block_bits: u32) -> Self {
        Self {
            set_bits,
            block_bits,
        }
    }

    /// Number of set-index bits.
    pub fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Number of block-offset bits.
    pub fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of tag bits left over in a 64-bit address.
    pub fn tag_bits(&self) -> u32 {
        ADDRESS_BITS.saturating_sub(self.set_bits.saturating_add(self.block_bits))
    }

    /// Returns the tag, `address >> (s + b)`.
    #[inline]
    pub fn tag(&self, address: u64) -> u64 {
        shr(address, self.set_bits.saturating_add(self.block_bits))
    }

    /// Returns the set index, `(address >> b) mod 2^s`.
    #[inline]
    pub fn set_index(&self, address: u64) -> usize {
        let mask = if self.set_bits >= ADDRESS_BITS {
            u64::MAX
        } else {
            (1u64 << self.set_bits) - 1
        };
        (shr(address, self.block_bits) & mask) as usize
    }

    /// Returns the byte offset within the block.
    #[inline]
    pub fn offset(&self, address: u64) -> u64 {
        if self.block_bits >= ADDRESS_BITS {
            address
        } else {
            address & ((1u64 << self.block_bits) - 1)
        }
    }

    /// Splits an address into `(tag, set_index)`.
    #[inline]
    pub fn decompose(&self, address: u64) -> (u64, usize) {
        (self.tag(address), self.set_index(address))
    }
}
