//! Serde support for [`Identifier`](crate::Identifier).
//!
//! By default an identifier serializes as its hyphenated text. Use
//! `#[serde(with = "bizid::serde::as_u128")]` to store the raw integer
//! instead.
mod identifier;

pub use identifier::*;
