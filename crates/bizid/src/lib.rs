#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod error;
mod generator;
mod id;
mod rand;
mod registry;
#[cfg(feature = "serde")]
pub mod serde;
mod sleep;
mod time;

pub use crate::codec::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::registry::*;
pub use crate::sleep::*;
pub use crate::time::*;
