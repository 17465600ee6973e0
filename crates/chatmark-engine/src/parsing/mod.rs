//! # Parsing
//!
//! Turns an assistant message (or any prefix of one, while it streams in)
//! into an ordered list of [`ContentBlock`]s: runs of prose interleaved with
//! structured directives written as inline `[type:payload]` tags.
//!
//! ## Pipeline
//!
//! 1. **Normalise**: strip `[<name>说]:` speaker wrappers ([`speaker`])
//! 2. **Scan**: walk the text with a [`cursor::Cursor`]; at every `[` ask the
//!    [`dispatch`]er for a clean tag
//! 3. **Recover**: if there is none, run the ordered [`recovery`] rules
//!    (unterminated tags, bare lists, stubs...), ending with a literal escape
//! 4. **Salvage**: pick up bracket-less `choices:`/`steps:` directives left
//!    in trailing or whole-message text ([`directive`])
//!
//! Parsing is total and stateless: every input yields blocks, and
//! re-parsing a longer prefix never depends on a previous call.
//!
//! ## Knowledge Ownership
//!
//! Tag syntax lives in [`kinds`]: the scan loop never spells out a tag name
//! or delimiter itself.

pub mod cursor;
pub mod directive;
pub mod dispatch;
pub mod identity;
pub mod json;
pub mod kinds;
pub mod parser;
pub mod query;
pub mod recovery;
pub mod resolution;
pub mod snapshot;
pub mod speaker;
pub mod types;

pub use identity::{KeyedBlock, keyed};
pub use parser::{Parser, parse_content};
pub use query::{extract_query_trigger, has_interactive_markup};
pub use recovery::{RecoveryChain, RecoveryRule};
pub use types::{Action, ChoiceOption, ContentBlock, KpiCard};
