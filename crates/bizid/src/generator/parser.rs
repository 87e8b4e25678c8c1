use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{BusinessTypeRegistry, IdFields, Identifier, ParsedInfo, Result};

/// Decodes identifiers against a [`BusinessTypeRegistry`].
///
/// Cheap to clone; clones share the registry.
#[derive(Clone, Debug)]
pub struct IdParser {
    registry: Arc<BusinessTypeRegistry>,
}

impl Default for IdParser {
    /// A parser over the built-in business types.
    fn default() -> Self {
        Self::new(BusinessTypeRegistry::builtin())
    }
}

impl IdParser {
    #[must_use]
    pub const fn new(registry: Arc<BusinessTypeRegistry>) -> Self {
        Self { registry }
    }

    /// Decodes an identifier.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidVersion`] if the version nibble is not 8 (not an
    ///   identifier of this scheme)
    /// - [`Error::UnknownBusinessType`] if the format matches but the code is
    ///   not registered
    ///
    /// [`Error::InvalidVersion`]: crate::Error::InvalidVersion
    /// [`Error::UnknownBusinessType`]: crate::Error::UnknownBusinessType
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn parse(&self, id: &Identifier) -> Result<ParsedInfo> {
        let fields = IdFields::from_identifier(id)?;
        let business_type = self.registry.from_code(fields.business_type_code)?;
        Ok(ParsedInfo::new(*id, &fields, *business_type))
    }

    /// Decodes identifier text in hyphenated or simple form.
    ///
    /// # Errors
    ///
    /// [`Error::Text`](crate::Error::Text) for malformed text, otherwise as
    /// [`Self::parse`].
    pub fn parse_str(&self, s: &str) -> Result<ParsedInfo> {
        self.parse(&s.parse()?)
    }

    /// Renders a one-line description for logs and debugging.
    ///
    /// Never fails: if the identifier cannot be decoded, the result carries
    /// the raw value and the reason instead.
    #[must_use]
    pub fn format(&self, id: &Identifier) -> String {
        match self.parse(id) {
            Ok(info) => info.to_string(),
            Err(e) => format!("Identifier: {id} (parse failed: {e})"),
        }
    }

    /// [`Self::format`] for identifier text.
    #[must_use]
    pub fn format_str(&self, s: &str) -> String {
        match self.parse_str(s) {
            Ok(info) => info.to_string(),
            Err(e) => format!("Identifier: {s} (parse failed: {e})"),
        }
    }

    pub fn registry(&self) -> &Arc<BusinessTypeRegistry> {
        &self.registry
    }
}
