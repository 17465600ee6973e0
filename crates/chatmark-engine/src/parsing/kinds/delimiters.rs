/// Which separators a list payload accepts besides `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiters {
    /// `|` and newlines.
    Lines,
    /// `|`, newlines, `->` and the arrow glyphs.
    Flow,
}

impl Delimiters {
    pub const PIPE: char = '|';
    pub const ARROW: &'static str = "->";
    pub const ARROW_GLYPHS: [char; 8] = ['→', '➜', '➡', '➝', '➔', '⟶', '↠', '↦'];
}

/// Splits a list payload into trimmed, non-empty items.
///
/// Stray trailing `]` are dropped first; they show up when a payload was cut
/// out of a half-closed tag.
pub fn split_items(payload: &str, delimiters: Delimiters) -> Vec<String> {
    let payload = payload.trim().trim_end_matches(']');
    let normalized = match delimiters {
        Delimiters::Flow => payload
            .replace(Delimiters::ARROW, "|")
            .replace(&Delimiters::ARROW_GLYPHS[..], "|"),
        Delimiters::Lines => payload.to_owned(),
    };
    normalized
        .split(|c: char| c == Delimiters::PIPE || c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
