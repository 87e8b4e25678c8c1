use crate::id::TextError;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Coarse classification of an [`Error`].
///
/// Callers mostly care about which bucket an error falls in: a bad argument
/// they can fix, a clock they cannot trust, or an identifier that is not
/// theirs to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Out-of-range arguments to `generate`. Never retryable.
    Validation,
    /// The wall clock moved backwards further or longer than the sequencer
    /// tolerates. Issuance against this clock should stop.
    ClockBacktrack,
    /// An identifier (or its text) could not be decoded.
    Parse,
    /// A business type table failed construction-time checks.
    Registry,
}

/// All errors that `bizid` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The sub-type does not fit in 4 bits.
    #[error("sub-type must be within 0..={max}: {sub_type}", max = crate::Layout::SUB_TYPE_MAX)]
    InvalidSubType { sub_type: u8 },

    /// The tenant id does not fit in 14 bits.
    #[error("tenant id must be within 0..={max}: {tenant_id}", max = crate::Layout::TENANT_ID_MAX)]
    InvalidTenantId { tenant_id: u16 },

    /// `generate` was handed a business type its registry does not hold.
    #[error("business type {name} (0x{code:03X}) is not registered with this generator")]
    UnregisteredBusinessType { code: u16, name: &'static str },

    /// The clock went backwards and did not recover within the configured
    /// bounds.
    #[error(
        "clock moved backwards: last={last_millis}ms, current={current_millis}ms, \
         backtrack={backtrack_ms}ms, retries={retries}"
    )]
    ClockBacktrack {
        last_millis: u64,
        current_millis: u64,
        backtrack_ms: u64,
        retries: u32,
    },

    /// The version nibble is not 8, so the value was not produced by this
    /// scheme.
    #[error("identifier version mismatch: expected v{expected}, found v{found}", expected = crate::Layout::VERSION)]
    InvalidVersion { found: u8 },

    /// The identifier is in this format but carries a code no registered
    /// business type uses.
    #[error("unknown business type code: 0x{code:03X}")]
    UnknownBusinessType { code: u16 },

    /// Identifier text could not be decoded.
    #[error("malformed identifier text: {0}")]
    Text(#[from] TextError),

    /// A business type code exceeds 12 bits.
    #[error("business type {name} code must be within 0x000..=0xFFF: 0x{code:X}")]
    BusinessTypeCodeOutOfRange { code: u16, name: &'static str },

    /// A business type declares version 0.
    #[error("business type {name} version must be >= 1: {version}")]
    InvalidBusinessTypeVersion { version: u16, name: &'static str },

    /// Two business types claim the same code.
    #[error("business type code 0x{code:03X} registered twice ({first} and {second})")]
    DuplicateBusinessTypeCode {
        code: u16,
        first: &'static str,
        second: &'static str,
    },
}

impl Error {
    /// Returns the [`ErrorKind`] this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSubType { .. }
            | Self::InvalidTenantId { .. }
            | Self::UnregisteredBusinessType { .. } => ErrorKind::Validation,
            Self::ClockBacktrack { .. } => ErrorKind::ClockBacktrack,
            Self::InvalidVersion { .. } | Self::UnknownBusinessType { .. } | Self::Text(_) => {
                ErrorKind::Parse
            }
            Self::BusinessTypeCodeOutOfRange { .. }
            | Self::InvalidBusinessTypeVersion { .. }
            | Self::DuplicateBusinessTypeCode { .. } => ErrorKind::Registry,
        }
    }

    /// Returns `true` for errors that mean the process clock cannot be
    /// trusted for issuance.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::ClockBacktrack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct_for_parse_failures() {
        let version = Error::InvalidVersion { found: 4 };
        let unknown = Error::UnknownBusinessType { code: 0x1FF };
        assert_eq!(version.kind(), ErrorKind::Parse);
        assert_eq!(unknown.kind(), ErrorKind::Parse);
        assert_ne!(version, unknown);
    }

    #[test]
    fn only_backtrack_is_fatal() {
        let err = Error::ClockBacktrack {
            last_millis: 100,
            current_millis: 50,
            backtrack_ms: 50,
            retries: 0,
        };
        assert!(err.is_fatal());
        assert!(!Error::InvalidSubType { sub_type: 16 }.is_fatal());
        assert_eq!(
            Error::InvalidTenantId { tenant_id: 16384 }.kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn messages_carry_the_offending_values() {
        let msg = Error::UnknownBusinessType { code: 0xABC }.to_string();
        assert!(msg.contains("0xABC"), "{msg}");
        let msg = Error::InvalidVersion { found: 4 }.to_string();
        assert!(msg.contains("v8") && msg.contains("v4"), "{msg}");
    }
}
