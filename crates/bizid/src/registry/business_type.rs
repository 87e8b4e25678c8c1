use core::fmt;

use crate::{Error, Layout, Result};

/// Describes one kind of business entity and the 12-bit code it is stamped
/// with.
///
/// Code ranges:
/// - `0x000`: reserved, never assigned
/// - `0x001..=0x0FF`: core entities
/// - `0x100..=0x1FF`: extended entities
/// - `0x200..=0xFFF`: reserved for future growth
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BusinessType {
    code: u16,
    name: &'static str,
    description: &'static str,
    table_name: &'static str,
    version: u16,
}

impl BusinessType {
    /// Declares a business type. Range checks happen when the type is added
    /// to a [`BusinessTypeRegistry`](crate::BusinessTypeRegistry) or via
    /// [`BusinessType::validate`].
    #[must_use]
    pub const fn new(
        code: u16,
        name: &'static str,
        description: &'static str,
        table_name: &'static str,
        version: u16,
    ) -> Self {
        Self {
            code,
            name,
            description,
            table_name,
            version,
        }
    }

    /// The 12-bit code embedded in identifiers.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Stable upper-snake name, e.g. `USER`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// The storage table this entity lives in.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        self.table_name
    }

    #[must_use]
    pub const fn version(&self) -> u16 {
        self.version
    }

    /// Checks the code range and the version.
    ///
    /// # Errors
    ///
    /// - [`Error::BusinessTypeCodeOutOfRange`] if the code needs more than
    ///   12 bits
    /// - [`Error::InvalidBusinessTypeVersion`] if the version is 0
    pub const fn validate(&self) -> Result<()> {
        if self.code > Layout::BUSINESS_TYPE_CODE_MAX {
            return Err(Error::BusinessTypeCodeOutOfRange {
                code: self.code,
                name: self.name,
            });
        }
        if self.version < 1 {
            return Err(Error::InvalidBusinessTypeVersion {
                version: self.version,
                name: self.name,
            });
        }
        Ok(())
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:03X}, v{})", self.name, self.code, self.version)
    }
}
