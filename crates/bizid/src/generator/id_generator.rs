use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BusinessType, BusinessTypeRegistry, Error, IdFields, IdParser, Identifier, Layout, ParsedInfo,
    RandSource, Result, Sequencer, SequencerConfig, Sleeper, SystemClock, ThreadRandom,
    ThreadSleep, TimeSource,
};

/// Issues business identifiers.
///
/// One generator is meant to be shared by every caller in the process
/// (wrap it in an [`Arc`] or keep it in a `static`); all methods take
/// `&self`. Identifiers from a single generator are unique for as long as
/// the clock stays within the sequencer's backtrack tolerance.
///
/// Uniqueness across processes is probabilistic: two processes issuing in the
/// same millisecond with the same counter, type, sub-type and tenant differ
/// only in their 32 random bits.
///
/// # Example
/// ```
/// use bizid::{BusinessType, IdGenerator};
///
/// let generator = IdGenerator::new();
/// let id = generator.generate(&BusinessType::USER, 1001).unwrap();
///
/// let info = generator.parse(&id).unwrap();
/// assert_eq!(info.business_type(), &BusinessType::USER);
/// assert_eq!(info.tenant_id(), 1001);
/// ```
#[derive(Debug)]
pub struct IdGenerator<T = SystemClock, S = ThreadSleep, R = ThreadRandom> {
    sequencer: Sequencer<T, S>,
    rng: R,
    parser: IdParser,
}

impl IdGenerator {
    /// A generator over the wall clock and the built-in business types.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SequencerConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SequencerConfig) -> Self {
        Self::with_parts(
            Sequencer::with_config(SystemClock, ThreadSleep, config),
            ThreadRandom,
            BusinessTypeRegistry::builtin(),
        )
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S, R> IdGenerator<T, S, R>
where
    T: TimeSource,
    S: Sleeper,
    R: RandSource<u32>,
{
    /// Assembles a generator from its collaborators.
    pub fn with_parts(
        sequencer: Sequencer<T, S>,
        rng: R,
        registry: Arc<BusinessTypeRegistry>,
    ) -> Self {
        Self {
            sequencer,
            rng,
            parser: IdParser::new(registry),
        }
    }

    /// Issues an identifier with the default sub-type (0).
    ///
    /// Pass tenant 0 for shared, non-tenant data.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_with_sub_type`].
    pub fn generate(&self, business_type: &BusinessType, tenant_id: u16) -> Result<Identifier> {
        self.generate_with_sub_type(business_type, Layout::DEFAULT_SUB_TYPE, tenant_id)
    }

    /// Issues an identifier.
    ///
    /// Arguments are checked before any sequence number is consumed, so a
    /// rejected call leaves no gap.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSubType`] if `sub_type` exceeds 15
    /// - [`Error::InvalidTenantId`] if `tenant_id` exceeds 16383
    /// - [`Error::UnregisteredBusinessType`] if the type is not in this
    ///   generator's registry
    /// - [`Error::ClockBacktrack`] if the clock moved backwards beyond
    ///   recovery
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, business_type), fields(business_type = business_type.name()))
    )]
    pub fn generate_with_sub_type(
        &self,
        business_type: &BusinessType,
        sub_type: u8,
        tenant_id: u16,
    ) -> Result<Identifier> {
        self.validate(business_type, sub_type, tenant_id)?;

        let tick = self.sequencer.next_tick()?;
        let random = self.rng.rand();

        #[allow(clippy::cast_possible_truncation)]
        let fields = IdFields {
            timestamp_sec: tick.timestamp_secs(),
            millis: tick.millis_part(),
            sequence: tick.sequence(),
            business_type_code: business_type.code(),
            sub_type,
            tenant_id,
            random1: (random >> Layout::RANDOM2_BITS) as u8,
            sequence_counter: tick.counter(),
            random2: random & Layout::RANDOM2_MAX,
        };
        Ok(fields.to_identifier())
    }

    /// Issues `count` identifiers of the same type, sub-type and tenant.
    ///
    /// Stops at the first error; identifiers issued before it are dropped.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_with_sub_type`].
    pub fn generate_batch(
        &self,
        business_type: &BusinessType,
        sub_type: u8,
        tenant_id: u16,
        count: usize,
    ) -> Result<Vec<Identifier>> {
        self.validate(business_type, sub_type, tenant_id)?;
        (0..count)
            .map(|_| self.generate_with_sub_type(business_type, sub_type, tenant_id))
            .collect()
    }

    fn validate(&self, business_type: &BusinessType, sub_type: u8, tenant_id: u16) -> Result<()> {
        if sub_type > Layout::SUB_TYPE_MAX {
            return Err(Error::InvalidSubType { sub_type });
        }
        if tenant_id > Layout::TENANT_ID_MAX {
            return Err(Error::InvalidTenantId { tenant_id });
        }
        if !self.parser.registry().contains(business_type) {
            return Err(Error::UnregisteredBusinessType {
                code: business_type.code(),
                name: business_type.name(),
            });
        }
        Ok(())
    }

    /// Decodes an identifier against this generator's registry.
    ///
    /// # Errors
    ///
    /// See [`IdParser::parse`].
    pub fn parse(&self, id: &Identifier) -> Result<ParsedInfo> {
        self.parser.parse(id)
    }

    /// See [`IdParser::format`].
    pub fn format(&self, id: &Identifier) -> String {
        self.parser.format(id)
    }

    /// A parser sharing this generator's registry.
    pub fn parser(&self) -> &IdParser {
        &self.parser
    }

    pub fn registry(&self) -> &Arc<BusinessTypeRegistry> {
        self.parser.registry()
    }

    pub const fn sequencer(&self) -> &Sequencer<T, S> {
        &self.sequencer
    }
}
