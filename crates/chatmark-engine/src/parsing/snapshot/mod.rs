//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts parsed blocks to a stable, serializable `Snap`
//!   (no generated ids) for `insta` snapshot testing
//! - **`invariants`**: Structural checks every parse must satisfy, whatever
//!   the input (blank input gives no blocks, lists are never empty, text is
//!   trimmed, charts carry data)
//!
//! ## Testing Strategy
//!
//! Parsing behavior is pinned by snapshot tests over
//! real assistant messages, and every prefix of those messages must pass
//! the invariant checks.

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
