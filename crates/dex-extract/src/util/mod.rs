//! Utility modules.

pub mod ident;

pub use ident::{is_lowercase_ident, to_id};
