mod identifier;
mod info;
mod text;

pub use identifier::*;
pub use info::*;
pub use text::*;
