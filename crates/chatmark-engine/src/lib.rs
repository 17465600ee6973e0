pub mod parsing;
pub mod stream;

// Re-export key types for easier usage
pub use parsing::{
    Action, ChoiceOption, ContentBlock, KeyedBlock, KpiCard, Parser, RecoveryChain, RecoveryRule,
    extract_query_trigger, has_interactive_markup, keyed, parse_content,
};
pub use stream::{Finished, MessageStream};
