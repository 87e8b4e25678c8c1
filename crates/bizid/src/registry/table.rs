use std::sync::{Arc, LazyLock};

use crate::{BusinessType, Error, Result};

static BUILTIN: LazyLock<Arc<BusinessTypeRegistry>> = LazyLock::new(|| {
    Arc::new(BusinessTypeRegistry {
        types: BusinessType::BUILTIN.to_vec(),
    })
});

/// A closed, immutable table of [`BusinessType`]s.
///
/// Built once at startup and never mutated; there is no update or removal.
/// Construction rejects out-of-range codes, zero versions, and two types
/// sharing a code, so a colliding table fails when the process starts rather
/// than the first time an identifier is parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusinessTypeRegistry {
    // Sorted by code, codes unique.
    types: Vec<BusinessType>,
}

impl BusinessTypeRegistry {
    /// Builds a registry from an arbitrary set of types.
    ///
    /// # Errors
    ///
    /// - [`Error::BusinessTypeCodeOutOfRange`] or
    ///   [`Error::InvalidBusinessTypeVersion`] for a type that fails
    ///   [`BusinessType::validate`]
    /// - [`Error::DuplicateBusinessTypeCode`] if two types share a code
    pub fn new(types: impl IntoIterator<Item = BusinessType>) -> Result<Self> {
        let mut types: Vec<BusinessType> = types.into_iter().collect();
        for ty in &types {
            ty.validate()?;
        }
        // Stable sort keeps declaration order among equal codes, so `first`
        // below is the one declared earlier.
        types.sort_by_key(BusinessType::code);
        if let Some(pair) = types.windows(2).find(|w| w[0].code() == w[1].code()) {
            return Err(Error::DuplicateBusinessTypeCode {
                code: pair[0].code(),
                first: pair[0].name(),
                second: pair[1].name(),
            });
        }
        Ok(Self { types })
    }

    /// The shared registry of [`BusinessType::BUILTIN`].
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Looks up a type by its 12-bit code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBusinessType`] when no type uses `code`.
    pub fn from_code(&self, code: u16) -> Result<&BusinessType> {
        self.types
            .binary_search_by_key(&code, BusinessType::code)
            .map(|idx| &self.types[idx])
            .map_err(|_| Error::UnknownBusinessType { code })
    }

    /// Looks up a type by its storage table name, ignoring ASCII case.
    #[must_use]
    pub fn from_table_name(&self, table_name: &str) -> Option<&BusinessType> {
        self.types
            .iter()
            .find(|ty| ty.table_name().eq_ignore_ascii_case(table_name))
    }

    /// Looks up a type by its name (`USER`, `audit_log`, ...), ignoring
    /// ASCII case.
    #[must_use]
    pub fn from_name(&self, name: &str) -> Option<&BusinessType> {
        self.types
            .iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn is_valid_code(&self, code: u16) -> bool {
        self.from_code(code).is_ok()
    }

    /// Returns `true` if this exact type (code and descriptor) is registered.
    #[must_use]
    pub fn contains(&self, ty: &BusinessType) -> bool {
        self.from_code(ty.code()).is_ok_and(|found| found == ty)
    }

    /// All types in ascending code order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &BusinessType> {
        self.types.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<'a> IntoIterator for &'a BusinessTypeRegistry {
    type Item = &'a BusinessType;
    type IntoIter = core::slice::Iter<'a, BusinessType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}
