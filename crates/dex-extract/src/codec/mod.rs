//! Record location and field decoding over object-literal source text.
//!
//! The scanner finds balanced `key: { ... }` spans; the decoder reads typed
//! fields out of a span with a [`crate::model::FieldSpec`] table.

pub mod cursor;
pub mod decoder;
pub mod scanner;

pub use cursor::Cursor;
pub use decoder::{decode, decode_field, decode_str};
pub use scanner::{KeyFilter, entities_by_number, list_entity_keys, locate};
