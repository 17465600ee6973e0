//! # Tag Kinds
//!
//! Tag-specific types that own their syntax, following the same
//! "knowledge ownership" rule as the rest of the parser: the scan loop and
//! the recovery rules ask these types; they never hardcode `[choices:` or `->`.
//!
//! ## Types
//!
//! - **`TagKind`**: closed set of recognised tag types, with the accepted
//!   spellings of each (`choice`, `choices-multiple`, `highlight`...)
//! - **`Delimiters`**: which item separators a list payload accepts
//!   (`|`, newlines, `->`, arrow glyphs)

pub mod delimiters;
pub mod tag;

pub use delimiters::{Delimiters, split_items};
pub use tag::{Tag, TagKind};
