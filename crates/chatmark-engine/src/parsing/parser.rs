use super::{
    cursor::Cursor,
    directive,
    dispatch::dispatch,
    kinds::TagKind,
    recovery::RecoveryChain,
    resolution::Resolution,
    speaker::strip_speaker_wrappers,
    types::ContentBlock,
};

/// Stringified-object residue the upstream sometimes leaks into prose.
const OBJECT_ARTIFACT: &str = "[object Object]";

/// Parses a complete message, or any prefix of one, into content blocks.
///
/// Total over all inputs: never panics, never errors. The result is empty
/// only when `text` is empty or whitespace.
pub fn parse_content(text: &str) -> Vec<ContentBlock> {
    Parser::default().parse(text)
}

/// The scan loop, parameterised by which recovery rules it may use.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    recovery: RecoveryChain,
}

impl Parser {
    pub fn new(recovery: RecoveryChain) -> Self {
        Self { recovery }
    }

    pub fn recovery(&self) -> &RecoveryChain {
        &self.recovery
    }

    /// Parses `text` from scratch. No state is carried between calls.
    pub fn parse(&self, text: &str) -> Vec<ContentBlock> {
        let normalized = strip_speaker_wrappers(text);
        let mut cur = Cursor::new(&normalized);
        let mut out = Output::default();

        while let Some(at) = cur.find(TagKind::OPEN) {
            out.push_text(cur.advance_to(at));
            let rest = cur.rest();
            let resolution = match dispatch(rest) {
                Some(resolution) => resolution,
                None => self.recover(rest, &mut out),
            };
            let consumed = resolution.consumed().clamp(1, rest.len());
            out.apply(resolution, &rest[..consumed]);
            cur.bump_n(consumed);
        }

        out.push_tail(cur.rest());
        let mut blocks = out.finish();

        if needs_whole_message_salvage(&blocks, text)
            && let Some((before, block, after)) = directive::whole_message(text)
        {
            log::trace!("whole-message directive salvage applied");
            blocks.clear();
            push_clean_text(&mut blocks, before);
            blocks.push(block);
            push_clean_text(&mut blocks, after);
        }

        if blocks.is_empty() {
            push_clean_text(&mut blocks, text);
        }
        blocks
    }

    /// Runs the recovery chain at a `[`. Pending-text rewrites are applied
    /// as they come; the first rule that consumes input ends the chain.
    fn recover(&self, rest: &str, out: &mut Output) -> Resolution {
        for rule in self.recovery.rules() {
            let Some(resolution) = rule.apply(rest, &out.pending) else {
                continue;
            };
            log::trace!("recovery rule `{}` applied", rule.name());
            match resolution {
                Resolution::Rewrite { keep, block } => out.rewrite(keep, block),
                resolution => return resolution,
            }
        }
        Resolution::Literal { consumed: 1 }
    }
}

/// Emitted blocks plus the append-only log of text not yet emitted.
///
/// Everything that ends up as prose (plain text, escaped brackets, literal
/// tag spans) goes through `pending`, so recovery rules read one contiguous
/// string instead of re-slicing the input.
#[derive(Default)]
struct Output {
    blocks: Vec<ContentBlock>,
    pending: String,
}

impl Output {
    fn push_text(&mut self, s: &str) {
        self.pending.push_str(s);
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        push_clean_text(&mut self.blocks, &pending);
    }

    fn emit(&mut self, block: ContentBlock) {
        self.flush();
        self.blocks.push(block);
    }

    /// Keeps `pending[..keep]` as text and replaces the remainder with `block`.
    fn rewrite(&mut self, keep: usize, block: ContentBlock) {
        self.pending.truncate(keep);
        self.emit(block);
    }

    fn apply(&mut self, resolution: Resolution, span: &str) {
        match resolution {
            Resolution::Emit { blocks, .. } => {
                self.flush();
                self.blocks.extend(blocks);
            }
            Resolution::Literal { .. } => self.push_text(span),
            Resolution::Verbatim { .. } => {
                self.flush();
                push_clean_text(&mut self.blocks, span);
            }
            Resolution::Drop { .. } => {}
            Resolution::Rewrite { keep, block } => self.rewrite(keep, block),
        }
    }

    /// Bracket-free text after the last `[`: may still hold bare `choices:` lines.
    fn push_tail(&mut self, tail: &str) {
        let mut last = 0;
        for (range, block) in directive::tail_choices(tail) {
            self.push_text(&tail[last..range.start]);
            self.emit(block);
            last = range.end;
        }
        self.push_text(&tail[last..]);
    }

    fn finish(mut self) -> Vec<ContentBlock> {
        self.flush();
        self.blocks
    }
}

/// The result is empty, or is one text block from a message with no
/// brackets at all.
fn needs_whole_message_salvage(blocks: &[ContentBlock], text: &str) -> bool {
    match blocks {
        [] => true,
        [ContentBlock::Text { .. }] => !text.contains(char::from(TagKind::OPEN)),
        _ => false,
    }
}

fn push_clean_text(blocks: &mut Vec<ContentBlock>, raw: &str) {
    let cleaned = raw.replace(OBJECT_ARTIFACT, "");
    let trimmed = cleaned.trim();
    if !trimmed.is_empty() {
        blocks.push(ContentBlock::text(trimmed));
    }
}
