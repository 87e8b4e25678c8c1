use core::fmt;

use crate::codec::{variant_of, version_of};

/// A 128-bit business identifier.
///
/// The value is opaque to callers that only store it as a primary key; the
/// bit layout is described on [`Layout`](crate::Layout). Ordering follows the
/// raw integer, so identifiers sort by their embedded Unix second and
/// millisecond first.
///
/// `Display` renders the canonical lowercase 8-4-4-4-12 hex form, e.g.
/// `6909a5c0-f9c0-8002-8000-3e9000a1b2c3`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Identifier {
    id: u128,
}

impl Identifier {
    /// The all-zero value. Never produced by a generator.
    pub const NIL: Self = Self { id: 0 };

    /// Builds an identifier from its high and low halves.
    #[must_use]
    pub const fn from_parts(msb: u64, lsb: u64) -> Self {
        Self {
            id: ((msb as u128) << 64) | lsb as u128,
        }
    }

    /// The high 64 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn msb(&self) -> u64 {
        (self.id >> 64) as u64
    }

    /// The low 64 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn lsb(&self) -> u64 {
        self.id as u64
    }

    /// Converts this type into its raw type representation
    #[must_use]
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Converts a raw type into this type
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self { id: raw }
    }

    /// Big-endian bytes, in the same order as the text form.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.id.to_be_bytes()
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self {
            id: u128::from_be_bytes(bytes),
        }
    }

    /// The version nibble. Always 8 for generated identifiers.
    #[must_use]
    pub const fn version(&self) -> u8 {
        version_of(self.msb())
    }

    /// The two variant bits. Always `0b10` for generated identifiers.
    #[must_use]
    pub const fn variant(&self) -> u8 {
        variant_of(self.lsb())
    }
}

impl From<u128> for Identifier {
    fn from(raw: u128) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Identifier> for u128 {
    fn from(id: Identifier) -> Self {
        id.to_raw()
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identifier")
            .field("id", &format_args!("{self}"))
            .field("msb", &format_args!("0x{:016x}", self.msb()))
            .field("lsb", &format_args!("0x{:016x}", self.lsb()))
            .finish()
    }
}
