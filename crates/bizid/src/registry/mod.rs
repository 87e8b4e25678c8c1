mod business_type;
mod builtin;
mod table;

pub use business_type::*;
pub use table::*;
