mod config;
mod id_generator;
mod parser;
mod sequencer;
pub use config::*;
pub use id_generator::*;
pub use parser::*;
pub use sequencer::*;
