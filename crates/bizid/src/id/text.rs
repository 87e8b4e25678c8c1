use core::{fmt, str::FromStr};

use crate::{Error, Identifier};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Byte offsets of the hyphens in the 8-4-4-4-12 form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Length of the hyphenated form.
pub const HYPHENATED_LEN: usize = 36;

/// Length of the bare 32-digit form.
pub const SIMPLE_LEN: usize = 32;

/// Errors from decoding identifier text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum TextError {
    /// The input is neither 36 (hyphenated) nor 32 (simple) bytes long.
    #[error("expected {HYPHENATED_LEN} or {SIMPLE_LEN} characters, found {len}")]
    InvalidLength { len: usize },

    /// A byte that is not a hex digit, or a missing/misplaced hyphen.
    #[error("unexpected byte 0x{byte:02x} at index {index}")]
    InvalidByte { byte: u8, index: usize },
}

/// Encoded text form of an [`Identifier`] that lives on the stack.
#[derive(Clone, Copy)]
pub struct Hyphenated {
    buf: [u8; HYPHENATED_LEN],
}

impl Hyphenated {
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `buf` only ever holds ASCII hex digits and hyphens.
        unsafe { core::str::from_utf8_unchecked(&self.buf) }
    }
}

impl fmt::Display for Hyphenated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl AsRef<str> for Hyphenated {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Identifier {
    /// Encodes the canonical lowercase 8-4-4-4-12 form without allocating.
    #[must_use]
    pub fn hyphenated(&self) -> Hyphenated {
        let mut buf = [b'-'; HYPHENATED_LEN];
        let mut pos = 0;
        for (i, byte) in self.to_bytes().iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                pos += 1;
            }
            buf[pos] = HEX[(byte >> 4) as usize];
            buf[pos + 1] = HEX[(byte & 0x0F) as usize];
            pos += 2;
        }
        Hyphenated { buf }
    }

    /// Decodes either the hyphenated or the simple hex form. Hex digits are
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`TextError`] on a bad length, a non-hex digit, or a hyphen
    /// out of place.
    pub fn decode(s: &str) -> Result<Self, TextError> {
        let bytes = s.as_bytes();
        let hyphenated = match bytes.len() {
            HYPHENATED_LEN => true,
            SIMPLE_LEN => false,
            len => return Err(TextError::InvalidLength { len }),
        };

        let mut raw: u128 = 0;
        for (index, &byte) in bytes.iter().enumerate() {
            if hyphenated && HYPHENS.contains(&index) {
                if byte != b'-' {
                    return Err(TextError::InvalidByte { byte, index });
                }
                continue;
            }
            let nibble = hex_value(byte).ok_or(TextError::InvalidByte { byte, index })?;
            raw = (raw << 4) | u128::from(nibble);
        }
        Ok(Self::from_raw(raw))
    }
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.hyphenated(), f)
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(s)?)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.hyphenated().as_str().to_owned()
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        Self::decode(other).is_ok_and(|id| id == *self)
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
