use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use bizid::{
    BusinessType, BusinessTypeRegistry, IdGenerator, IdParser, MonotonicClock, Sequencer,
    Sleeper, SystemClock, ThreadRandom, ThreadSleep, TimeSource,
};
use clap::Subcommand;

use crate::config::{ClockKind, GeneratorSettings};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Issue new identifiers.
    Generate {
        /// Business type: name (`USER`), table name (`users`), or hex code
        /// (`0x002`).
        #[arg(long = "type", short = 't')]
        business_type: String,

        /// Owning tenant, 0..=16383. Use 0 for shared data.
        #[arg(long)]
        tenant: u16,

        /// Sub-type, 0..=15.
        #[arg(long, default_value_t = 0)]
        sub_type: u8,

        /// How many identifiers to issue.
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,

        /// Print a JSON array instead of one identifier per line.
        #[arg(long)]
        json: bool,
    },

    /// Decode an identifier.
    Parse {
        /// Hyphenated or 32-digit hex identifier.
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Print a one-line description of an identifier, even a malformed one.
    Format { id: String },

    /// List the registered business types.
    Types {
        #[arg(long)]
        json: bool,
    },
}

/// Runs one subcommand, writing its result to `out`.
pub fn execute(
    command: &Command,
    settings: &GeneratorSettings,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let registry = BusinessTypeRegistry::builtin();

    match command {
        Command::Generate {
            business_type,
            tenant,
            sub_type,
            count,
            json,
        } => {
            let business_type = resolve_type(&registry, business_type)?;
            let request = Request {
                business_type,
                sub_type: *sub_type,
                tenant_id: *tenant,
                count: *count,
            };
            let ids = match settings.clock {
                ClockKind::System => request.run(
                    Sequencer::with_config(SystemClock, ThreadSleep, settings.sequencer),
                    registry,
                )?,
                ClockKind::Monotonic => request.run(
                    Sequencer::with_config(MonotonicClock::new(), ThreadSleep, settings.sequencer),
                    registry,
                )?,
            };

            if *json {
                serde_json::to_writer_pretty(&mut *out, &ids)?;
                writeln!(out)?;
            } else {
                for id in &ids {
                    writeln!(out, "{id}")?;
                }
            }
        }
        Command::Parse { id, json } => {
            let info = IdParser::new(registry)
                .parse_str(id)
                .with_context(|| format!("cannot decode `{id}`"))?;

            if *json {
                serde_json::to_writer_pretty(&mut *out, &info)?;
                writeln!(out)?;
            } else {
                let ty = info.business_type();
                writeln!(out, "identifier:     {}", info.identifier())?;
                writeln!(out, "business type:  {ty}")?;
                writeln!(out, "table:          {}", ty.table_name())?;
                writeln!(out, "sub-type:       {}", info.sub_type())?;
                writeln!(
                    out,
                    "tenant:         {}{}",
                    info.tenant_id(),
                    if info.is_public() { " (public)" } else { "" }
                )?;
                writeln!(out, "timestamp ms:   {}", info.timestamp_ms())?;
                writeln!(out, "sequence:       {}", info.sequence())?;
                writeln!(out, "counter:        {}", info.sequence_counter())?;
            }
        }
        Command::Format { id } => {
            writeln!(out, "{}", IdParser::new(registry).format_str(id))?;
        }
        Command::Types { json } => {
            if *json {
                let types: Vec<&BusinessType> = registry.iter().collect();
                serde_json::to_writer_pretty(&mut *out, &types)?;
                writeln!(out)?;
            } else {
                for ty in registry.iter() {
                    writeln!(
                        out,
                        "0x{:03X}  {:<20} {:<22} v{}  {}",
                        ty.code(),
                        ty.name(),
                        ty.table_name(),
                        ty.version(),
                        ty.description()
                    )?;
                }
            }
        }
    }

    Ok(())
}

struct Request {
    business_type: BusinessType,
    sub_type: u8,
    tenant_id: u16,
    count: usize,
}

impl Request {
    fn run<T: TimeSource, S: Sleeper>(
        &self,
        sequencer: Sequencer<T, S>,
        registry: Arc<BusinessTypeRegistry>,
    ) -> anyhow::Result<Vec<bizid::Identifier>> {
        let generator = IdGenerator::with_parts(sequencer, ThreadRandom, registry);
        let ids = generator.generate_batch(
            &self.business_type,
            self.sub_type,
            self.tenant_id,
            self.count,
        )?;
        tracing::debug!(
            count = ids.len(),
            business_type = self.business_type.name(),
            "generated identifiers"
        );
        Ok(ids)
    }
}

/// Looks a type up by name, table name, or `0x`-prefixed hex code.
fn resolve_type(registry: &BusinessTypeRegistry, input: &str) -> anyhow::Result<BusinessType> {
    let code = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .map(|hex| u16::from_str_radix(hex, 16))
        .transpose()
        .with_context(|| format!("invalid business type code `{input}`"))?;

    let found = match code {
        Some(code) => registry.from_code(code).ok(),
        None => registry
            .from_name(input)
            .or_else(|| registry.from_table_name(input)),
    };

    found
        .copied()
        .ok_or_else(|| anyhow!("unknown business type `{input}` (see `bizid types`)"))
}
