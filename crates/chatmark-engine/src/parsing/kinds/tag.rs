/// The recognised tag types. Anything else is an unknown tag and is kept
/// as literal text by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Steps,
    Choices { multiple: bool },
    Actions,
    Rating,
    Query,
    Switch,
    HighlightSelect,
    Chart,
    Kpi,
    ThoughtChain,
}

impl TagKind {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const SEP: u8 = b':';

    /// Resolves a tag type name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "steps" | "step" => Self::Steps,
            "choices" | "choice" => Self::Choices { multiple: false },
            "choices-multiple" | "choice-multiple" => Self::Choices { multiple: true },
            "actions" | "action" => Self::Actions,
            "rating" => Self::Rating,
            "query" => Self::Query,
            "switch" => Self::Switch,
            "highlight-select" | "highlight" => Self::HighlightSelect,
            "chart" => Self::Chart,
            "kpi" => Self::Kpi,
            "thought-chain" => Self::ThoughtChain,
            _ => return None,
        };
        Some(kind)
    }

    /// Payload is a JSON object located by brace counting, not by the first `]`.
    pub fn carries_json(self) -> bool {
        matches!(self, Self::Chart | Self::Kpi | Self::ThoughtChain)
    }

    /// Payload is a delimited item list.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::Steps | Self::Choices { .. } | Self::Actions | Self::HighlightSelect
        )
    }
}

/// The `[name:` header of a tag, parsed from text starting at a `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Type name as written.
    pub name: &'a str,
    /// `None` for a syntactically valid header of an unknown type.
    pub kind: Option<TagKind>,
    /// Byte offset of the payload (just past the `:`).
    pub payload_start: usize,
}

impl<'a> Tag<'a> {
    /// Parses `[<word>:` at the start of `s`. Type names are ASCII word
    /// characters and `-`.
    pub fn parse_header(s: &'a str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.first() != Some(&TagKind::OPEN) {
            return None;
        }
        let name_len = bytes[1..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_' || **b == b'-')
            .count();
        if name_len == 0 || bytes.get(1 + name_len) != Some(&TagKind::SEP) {
            return None;
        }
        let name = &s[1..1 + name_len];
        Some(Self {
            name,
            kind: TagKind::from_name(name),
            payload_start: name_len + 2,
        })
    }
}
