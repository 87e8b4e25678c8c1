use core::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{BusinessType, IdFields, Identifier, Layout};

/// Everything an [`Identifier`] says about itself, decoded.
///
/// Derived entirely from the identifier's bits plus a registry lookup; it is
/// a read-only view and never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedInfo {
    identifier: Identifier,
    timestamp_ms: u64,
    sequence: u8,
    business_type: BusinessType,
    sub_type: u8,
    tenant_id: u16,
    sequence_counter: u16,
    random1: u8,
    random2: u32,
}

impl ParsedInfo {
    pub(crate) const fn new(
        identifier: Identifier,
        fields: &IdFields,
        business_type: BusinessType,
    ) -> Self {
        Self {
            identifier,
            timestamp_ms: fields.timestamp_ms(),
            sequence: fields.sequence,
            business_type,
            sub_type: fields.sub_type,
            tenant_id: fields.tenant_id,
            sequence_counter: fields.sequence_counter,
            random1: fields.random1,
            random2: fields.random2,
        }
    }

    #[must_use]
    pub const fn identifier(&self) -> Identifier {
        self.identifier
    }

    /// Milliseconds since the Unix epoch at which the identifier was issued.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Whole Unix seconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn timestamp_secs(&self) -> u32 {
        (self.timestamp_ms / 1000) as u32
    }

    /// Millisecond within the second.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn millis(&self) -> u16 {
        (self.timestamp_ms % 1000) as u16
    }

    /// The issue time as a [`SystemTime`], at millisecond precision.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.timestamp_ms)
    }

    /// The 6-bit intra-millisecond tie-break from the high half.
    #[must_use]
    pub const fn sequence(&self) -> u8 {
        self.sequence
    }

    #[must_use]
    pub const fn business_type(&self) -> &BusinessType {
        &self.business_type
    }

    #[must_use]
    pub const fn sub_type(&self) -> u8 {
        self.sub_type
    }

    #[must_use]
    pub const fn tenant_id(&self) -> u16 {
        self.tenant_id
    }

    /// Whether the identifier belongs to shared data rather than one tenant.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.tenant_id == Layout::PUBLIC_TENANT_ID
    }

    /// The full 12-bit per-millisecond counter.
    #[must_use]
    pub const fn sequence_counter(&self) -> u16 {
        self.sequence_counter
    }

    #[must_use]
    pub const fn random1(&self) -> u8 {
        self.random1
    }

    #[must_use]
    pub const fn random2(&self) -> u32 {
        self.random2
    }
}

impl fmt::Display for ParsedInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [type={}, sub_type={}, tenant_id={}{}, timestamp_ms={}, sequence={}, counter={}]",
            self.identifier,
            self.business_type,
            self.sub_type,
            self.tenant_id,
            if self.is_public() { " (public)" } else { "" },
            self.timestamp_ms,
            self.sequence,
            self.sequence_counter,
        )
    }
}
