use crate::{Error, Identifier, Result};

/// Bit layout constants for the 128-bit business identifier.
///
/// ```text
///  MSB (bits 127..64 of the identifier)
///  Bit Index:  63              32 31      22 21    16 15     12 11          0
///              +-----------------+----------+--------+---------+------------+
///  Field:      | timestamp (32s) | millis   | seq(6) | ver (4) | btype (12) |
///              +-----------------+----------+--------+---------+------------+
///
///  LSB (bits 63..0 of the identifier)
///  Bit Index:  63 62 61   58 57 56 55    48 47         36 35      24 23        0
///              +-----+-------+-----+--------+-------------+----------+----------+
///  Field:      | var | sub   | tHi | rand1  | tenant low  | counter  | rand2    |
///              +-----+-------+-----+--------+-------------+----------+----------+
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Layout;

impl Layout {
    pub const VERSION: u8 = 8;
    pub const VARIANT: u8 = 0b10;

    pub const TIMESTAMP_SEC_BITS: u32 = 32;
    pub const MILLIS_BITS: u32 = 10;
    pub const SEQUENCE_BITS: u32 = 6;
    pub const VERSION_BITS: u32 = 4;
    pub const BUSINESS_TYPE_BITS: u32 = 12;
    pub const VARIANT_BITS: u32 = 2;
    pub const SUB_TYPE_BITS: u32 = 4;
    pub const TENANT_ID_HIGH_BITS: u32 = 2;
    pub const RANDOM1_BITS: u32 = 8;
    pub const TENANT_ID_LOW_BITS: u32 = 12;
    pub const SEQUENCE_COUNTER_BITS: u32 = 12;
    pub const RANDOM2_BITS: u32 = 24;

    pub const TIMESTAMP_SEC_SHIFT: u32 = 32;
    pub const TIME_MID_SHIFT: u32 = 16;
    pub const MILLIS_IN_TIME_MID_SHIFT: u32 = Self::SEQUENCE_BITS;
    pub const VERSION_SHIFT: u32 = 12;
    pub const VARIANT_SHIFT: u32 = 62;
    pub const SUB_TYPE_SHIFT: u32 = 58;
    pub const TENANT_ID_HIGH_SHIFT: u32 = 56;
    pub const RANDOM1_SHIFT: u32 = 48;
    pub const TENANT_ID_LOW_SHIFT: u32 = 36;
    pub const SEQUENCE_COUNTER_SHIFT: u32 = 24;

    pub const TIMESTAMP_SEC_MASK: u64 = (1 << Self::TIMESTAMP_SEC_BITS) - 1;
    pub const MILLIS_MASK: u64 = (1 << Self::MILLIS_BITS) - 1;
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;
    pub const VERSION_MASK: u64 = (1 << Self::VERSION_BITS) - 1;
    pub const BUSINESS_TYPE_MASK: u64 = (1 << Self::BUSINESS_TYPE_BITS) - 1;
    pub const VARIANT_MASK: u64 = (1 << Self::VARIANT_BITS) - 1;
    pub const SUB_TYPE_MASK: u64 = (1 << Self::SUB_TYPE_BITS) - 1;
    pub const TENANT_ID_HIGH_MASK: u64 = (1 << Self::TENANT_ID_HIGH_BITS) - 1;
    pub const RANDOM1_MASK: u64 = (1 << Self::RANDOM1_BITS) - 1;
    pub const TENANT_ID_LOW_MASK: u64 = (1 << Self::TENANT_ID_LOW_BITS) - 1;
    pub const SEQUENCE_COUNTER_MASK: u64 = (1 << Self::SEQUENCE_COUNTER_BITS) - 1;
    pub const RANDOM2_MASK: u64 = (1 << Self::RANDOM2_BITS) - 1;

    pub const BUSINESS_TYPE_CODE_MAX: u16 = Self::BUSINESS_TYPE_MASK as u16;
    pub const SUB_TYPE_MAX: u8 = Self::SUB_TYPE_MASK as u8;
    pub const TENANT_ID_MAX: u16 = (1 << (Self::TENANT_ID_HIGH_BITS + Self::TENANT_ID_LOW_BITS)) - 1;
    pub const MILLIS_MAX: u16 = 999;
    pub const SEQUENCE_COUNTER_MAX: u16 = Self::SEQUENCE_COUNTER_MASK as u16;
    pub const RANDOM2_MAX: u32 = Self::RANDOM2_MASK as u32;

    /// Tenant id reserved for data shared by every tenant.
    pub const PUBLIC_TENANT_ID: u16 = 0;
    pub const DEFAULT_SUB_TYPE: u8 = 0;
}

const _: () = {
    // Compile-time check: each half must account for exactly 64 bits.
    assert!(
        Layout::TIMESTAMP_SEC_BITS
            + Layout::MILLIS_BITS
            + Layout::SEQUENCE_BITS
            + Layout::VERSION_BITS
            + Layout::BUSINESS_TYPE_BITS
            == u64::BITS,
        "MSB layout must cover 64 bits"
    );
    assert!(
        Layout::VARIANT_BITS
            + Layout::SUB_TYPE_BITS
            + Layout::TENANT_ID_HIGH_BITS
            + Layout::RANDOM1_BITS
            + Layout::TENANT_ID_LOW_BITS
            + Layout::SEQUENCE_COUNTER_BITS
            + Layout::RANDOM2_BITS
            == u64::BITS,
        "LSB layout must cover 64 bits"
    );
};

/// Every field carried by an identifier, unpacked.
///
/// This is the pure codec: [`IdFields::pack`] and [`IdFields::unpack`] hold
/// no state and never touch the clock or the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IdFields {
    /// Unix time in whole seconds.
    pub timestamp_sec: u32,
    /// Millisecond within `timestamp_sec` (10 bits).
    pub millis: u16,
    /// Intra-millisecond tie-break (6 bits).
    pub sequence: u8,
    /// 12-bit business type code.
    pub business_type_code: u16,
    /// 4-bit sub-type.
    pub sub_type: u8,
    /// 14-bit tenant id, stored split across the low half.
    pub tenant_id: u16,
    pub random1: u8,
    /// 12-bit per-millisecond counter handed out by the sequencer.
    pub sequence_counter: u16,
    /// 24 random bits.
    pub random2: u32,
}

impl IdFields {
    /// Packs the fields into the `(msb, lsb)` halves.
    ///
    /// Every field is widened to `u64` before it is shifted and masked to its
    /// width, so an oversized input can never bleed into a neighbouring
    /// field.
    #[must_use]
    pub const fn pack(&self) -> (u64, u64) {
        debug_assert!(self.millis as u64 <= Layout::MILLIS_MASK, "millis overflow");
        debug_assert!(self.sequence as u64 <= Layout::SEQUENCE_MASK, "sequence overflow");
        debug_assert!(
            self.business_type_code as u64 <= Layout::BUSINESS_TYPE_MASK,
            "business type overflow"
        );
        debug_assert!(self.sub_type as u64 <= Layout::SUB_TYPE_MASK, "sub-type overflow");
        debug_assert!(self.tenant_id <= Layout::TENANT_ID_MAX, "tenant overflow");
        debug_assert!(
            self.sequence_counter as u64 <= Layout::SEQUENCE_COUNTER_MASK,
            "sequence counter overflow"
        );
        debug_assert!(self.random2 as u64 <= Layout::RANDOM2_MASK, "random2 overflow");

        let timestamp = (self.timestamp_sec as u64 & Layout::TIMESTAMP_SEC_MASK)
            << Layout::TIMESTAMP_SEC_SHIFT;
        let time_mid = (((self.millis as u64 & Layout::MILLIS_MASK)
            << Layout::MILLIS_IN_TIME_MID_SHIFT)
            | (self.sequence as u64 & Layout::SEQUENCE_MASK))
            << Layout::TIME_MID_SHIFT;
        let version_and_type = ((Layout::VERSION as u64 & Layout::VERSION_MASK)
            << Layout::VERSION_SHIFT)
            | (self.business_type_code as u64 & Layout::BUSINESS_TYPE_MASK);
        let msb = timestamp | time_mid | version_and_type;

        let tenant = self.tenant_id as u64;
        let tenant_high = (tenant >> Layout::TENANT_ID_LOW_BITS) & Layout::TENANT_ID_HIGH_MASK;
        let tenant_low = tenant & Layout::TENANT_ID_LOW_MASK;

        let lsb = ((Layout::VARIANT as u64 & Layout::VARIANT_MASK) << Layout::VARIANT_SHIFT)
            | ((self.sub_type as u64 & Layout::SUB_TYPE_MASK) << Layout::SUB_TYPE_SHIFT)
            | (tenant_high << Layout::TENANT_ID_HIGH_SHIFT)
            | ((self.random1 as u64 & Layout::RANDOM1_MASK) << Layout::RANDOM1_SHIFT)
            | (tenant_low << Layout::TENANT_ID_LOW_SHIFT)
            | ((self.sequence_counter as u64 & Layout::SEQUENCE_COUNTER_MASK)
                << Layout::SEQUENCE_COUNTER_SHIFT)
            | (self.random2 as u64 & Layout::RANDOM2_MASK);

        (msb, lsb)
    }

    /// Packs the fields straight into an [`Identifier`].
    #[must_use]
    pub const fn to_identifier(&self) -> Identifier {
        let (msb, lsb) = self.pack();
        Identifier::from_parts(msb, lsb)
    }

    /// Unpacks both halves back into their fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] when the version nibble is not 8;
    /// none of the other fields are trusted in that case.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn unpack(msb: u64, lsb: u64) -> Result<Self> {
        let version = version_of(msb);
        if version != Layout::VERSION {
            return Err(Error::InvalidVersion { found: version });
        }

        let time_mid = (msb >> Layout::TIME_MID_SHIFT) & 0xFFFF;
        let tenant_high = (lsb >> Layout::TENANT_ID_HIGH_SHIFT) & Layout::TENANT_ID_HIGH_MASK;
        let tenant_low = (lsb >> Layout::TENANT_ID_LOW_SHIFT) & Layout::TENANT_ID_LOW_MASK;

        Ok(Self {
            timestamp_sec: ((msb >> Layout::TIMESTAMP_SEC_SHIFT) & Layout::TIMESTAMP_SEC_MASK)
                as u32,
            millis: ((time_mid >> Layout::MILLIS_IN_TIME_MID_SHIFT) & Layout::MILLIS_MASK) as u16,
            sequence: (time_mid & Layout::SEQUENCE_MASK) as u8,
            business_type_code: (msb & Layout::BUSINESS_TYPE_MASK) as u16,
            sub_type: ((lsb >> Layout::SUB_TYPE_SHIFT) & Layout::SUB_TYPE_MASK) as u8,
            tenant_id: ((tenant_high << Layout::TENANT_ID_LOW_BITS) | tenant_low) as u16,
            random1: ((lsb >> Layout::RANDOM1_SHIFT) & Layout::RANDOM1_MASK) as u8,
            sequence_counter: ((lsb >> Layout::SEQUENCE_COUNTER_SHIFT)
                & Layout::SEQUENCE_COUNTER_MASK) as u16,
            random2: (lsb & Layout::RANDOM2_MASK) as u32,
        })
    }

    /// Unpacks an [`Identifier`].
    ///
    /// # Errors
    ///
    /// See [`IdFields::unpack`].
    pub const fn from_identifier(id: &Identifier) -> Result<Self> {
        Self::unpack(id.msb(), id.lsb())
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        self.timestamp_sec as u64 * 1000 + self.millis as u64
    }
}

/// Version nibble of an MSB half.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn version_of(msb: u64) -> u8 {
    ((msb >> Layout::VERSION_SHIFT) & Layout::VERSION_MASK) as u8
}

/// Variant bits of an LSB half.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn variant_of(lsb: u64) -> u8 {
    ((lsb >> Layout::VARIANT_SHIFT) & Layout::VARIANT_MASK) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IdFields {
        IdFields {
            timestamp_sec: 1_762_300_800,
            millis: 999,
            sequence: 63,
            business_type_code: 0x002,
            sub_type: 5,
            tenant_id: 1001,
            random1: 0xAB,
            sequence_counter: 4095,
            random2: 0xFF_FFFF,
        }
    }

    #[test]
    fn pack_matches_reference_formula() {
        let f = sample();
        let (msb, lsb) = f.pack();

        let expected_msb = (u64::from(f.timestamp_sec) << 32)
            | (((u64::from(f.millis) << 6) | u64::from(f.sequence)) << 16)
            | ((8 << 12) | u64::from(f.business_type_code));
        let expected_lsb = (0b10 << 62)
            | (u64::from(f.sub_type) << 58)
            | ((u64::from(f.tenant_id) >> 12) << 56)
            | (u64::from(f.random1) << 48)
            | ((u64::from(f.tenant_id) & 0xFFF) << 36)
            | (u64::from(f.sequence_counter) << 24)
            | u64::from(f.random2);

        assert_eq!(msb, expected_msb);
        assert_eq!(lsb, expected_lsb);
    }

    #[test]
    fn unpack_inverts_pack() {
        let f = sample();
        let (msb, lsb) = f.pack();
        assert_eq!(IdFields::unpack(msb, lsb), Ok(f));
    }

    #[test]
    fn version_and_variant_are_constant() {
        let (msb, lsb) = IdFields::default().pack();
        assert_eq!(version_of(msb), 8);
        assert_eq!(variant_of(lsb), 0b10);

        let (msb, lsb) = sample().pack();
        assert_eq!(version_of(msb), 8);
        assert_eq!(variant_of(lsb), 0b10);
    }

    #[test]
    fn high_timestamp_bit_does_not_sign_extend() {
        // A timestamp with bit 31 set would smear into the top half if it were
        // shifted as a signed 32-bit value.
        let f = IdFields {
            timestamp_sec: u32::MAX,
            millis: 1023,
            ..IdFields::default()
        };
        let (msb, _) = f.pack();
        assert_eq!(msb >> 32, u64::from(u32::MAX));
        assert_eq!(IdFields::unpack(msb, f.pack().1).map(|u| u.millis), Ok(1023));
    }

    #[test]
    fn tenant_is_split_and_reassembled() {
        for tenant_id in [0, 1, 0xFFF, 0x1000, 0x2ABC, Layout::TENANT_ID_MAX] {
            let f = IdFields {
                tenant_id,
                ..IdFields::default()
            };
            let (_, lsb) = f.pack();
            let high = (lsb >> 56) & 0b11;
            let low = (lsb >> 36) & 0xFFF;
            assert_eq!((high << 12) | low, u64::from(tenant_id));
            assert_eq!(IdFields::unpack(f.pack().0, lsb).map(|u| u.tenant_id), Ok(tenant_id));
        }
    }

    #[test]
    fn fields_do_not_overlap() {
        let full = IdFields {
            timestamp_sec: u32::MAX,
            millis: 1023,
            sequence: 63,
            business_type_code: 0xFFF,
            sub_type: 15,
            tenant_id: Layout::TENANT_ID_MAX,
            random1: u8::MAX,
            sequence_counter: 4095,
            random2: Layout::RANDOM2_MAX,
        };
        let (msb, lsb) = full.pack();
        // Only the version nibble and the low variant bit stay clear.
        assert_eq!(msb, !(0b0111 << 12));
        assert_eq!(lsb, !(1 << 62));
    }

    #[test]
    fn unpack_rejects_other_versions() {
        let (msb, lsb) = sample().pack();
        let v4 = (msb & !(0xF << 12)) | (4 << 12);
        assert_eq!(
            IdFields::unpack(v4, lsb),
            Err(Error::InvalidVersion { found: 4 })
        );
    }

    #[test]
    fn timestamp_ms_combines_seconds_and_millis() {
        let f = IdFields {
            timestamp_sec: 1_700_000_000,
            millis: 123,
            ..IdFields::default()
        };
        assert_eq!(f.timestamp_ms(), 1_700_000_000_123);
    }
}
