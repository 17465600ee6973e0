use std::sync::OnceLock;

use regex::Regex;

/// Returns the trimmed payload of the first `[query:...]` in `text`.
///
/// Independent of [`super::parse_content`]: no normalisation, no recovery.
/// The payload stops at the first `]` and does not cross lines.
pub fn extract_query_trigger(text: &str) -> Option<String> {
    static QUERY: OnceLock<Regex> = OnceLock::new();
    let re = QUERY.get_or_init(|| Regex::new(r"\[query:(.*?)\]").expect("Invalid query regex"));
    re.captures(text).map(|caps| caps[1].trim().to_owned())
}

/// Cheap check for whether `text` holds anything the full parse would turn
/// into a structured block. Plain prose can skip [`super::parse_content`].
pub fn has_interactive_markup(text: &str) -> bool {
    const OPENERS: [&str; 13] = [
        "[choices:",
        "[choices-multiple:",
        "[choice-multiple:",
        "[actions:",
        "[rating:",
        "[switch:",
        "[query:",
        "[chart:",
        "[kpi:",
        "[highlight-select:",
        "[highlight:",
        "[steps:",
        "[thought-chain:",
    ];
    static BARE_LIST: OnceLock<Regex> = OnceLock::new();
    let bare_list = BARE_LIST
        .get_or_init(|| Regex::new(r"\[[^\]]+\|[^\]]+\]").expect("Invalid bare list regex"));

    OPENERS.iter().any(|opener| text.contains(opener)) || bare_list.is_match(text)
}
