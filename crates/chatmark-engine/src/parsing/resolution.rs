use super::types::ContentBlock;

/// What the scan loop should do with the input at a `[`.
///
/// Produced by the dispatcher (clean tags) and by the recovery rules
/// (salvage). `consumed` counts bytes from the `[`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Flush pending text, emit `blocks`, skip `consumed` bytes.
    Emit {
        consumed: usize,
        blocks: Vec<ContentBlock>,
    },
    /// Keep the `consumed` bytes as part of the surrounding text.
    Literal { consumed: usize },
    /// Emit the `consumed` bytes, brackets included, as a Text block of
    /// their own. Used for unknown tags and payloads that fail to build.
    Verbatim { consumed: usize },
    /// Skip `consumed` bytes without emitting anything.
    Drop { consumed: usize },
    /// Keep the first `keep` bytes of the pending text, turn the rest into
    /// `block`. Consumes no input; only recovery produces it.
    Rewrite { keep: usize, block: ContentBlock },
}

impl Resolution {
    pub fn emit(consumed: usize, block: ContentBlock) -> Self {
        Self::Emit {
            consumed,
            blocks: vec![block],
        }
    }

    /// Bytes of input this resolution moves past.
    pub fn consumed(&self) -> usize {
        match self {
            Self::Emit { consumed, .. }
            | Self::Literal { consumed }
            | Self::Verbatim { consumed }
            | Self::Drop { consumed } => *consumed,
            Self::Rewrite { .. } => 0,
        }
    }
}
