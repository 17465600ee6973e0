//! # Tag Dispatcher
//!
//! Recognises a well-formed `[type:payload]` at the cursor and routes the
//! payload to the builder for its kind. `None` means "no clean tag here";
//! the scan loop then hands the bracket to the recovery rules.

use super::{
    json,
    kinds::{Delimiters, Tag, TagKind, split_items},
    resolution::Resolution,
    types::{Action, ChoiceOption, ContentBlock},
};

/// Resolves a clean tag at the start of `rest` (which begins with `[`).
///
/// Payloads end at the first `]`; `steps` and `choices` payloads may not
/// contain `[` (an embedded `[` leaves them to the unterminated-list
/// salvage). JSON payloads end at the `}` balancing their opening brace.
pub fn dispatch(rest: &str) -> Option<Resolution> {
    let tag = Tag::parse_header(rest)?;

    if let Some(kind) = tag.kind
        && kind.carries_json()
    {
        let open = skip_whitespace(rest, tag.payload_start);
        if rest.as_bytes().get(open) == Some(&b'{') {
            let end = json::balanced_object_end(rest, open)?;
            let consumed = end + 2;
            return Some(match json::build(kind, &rest[open..=end]) {
                Ok(block) => Resolution::emit(consumed, block),
                Err(e) => {
                    log::debug!("[{}] payload kept as text: {e}", tag.name);
                    Resolution::Verbatim { consumed }
                }
            });
        }
    }

    let stop_at_open = matches!(tag.kind, Some(TagKind::Steps | TagKind::Choices { .. }));
    let close = closing_bracket(rest, tag.payload_start, stop_at_open)?;
    let payload = &rest[tag.payload_start..close];
    let consumed = close + 1;

    let Some(kind) = tag.kind else {
        // Unknown kinds stay visible so a new tag type never disappears silently.
        return Some(Resolution::Verbatim { consumed });
    };

    let block = match kind {
        TagKind::Steps => {
            let steps = split_items(payload, Delimiters::Flow);
            (!steps.is_empty()).then_some(ContentBlock::Steps { steps })
        }
        TagKind::Choices { multiple } => {
            let options = ChoiceOption::from_labels(split_items(payload, Delimiters::Flow));
            (!options.is_empty()).then_some(ContentBlock::Choices { options, multiple })
        }
        TagKind::Actions => {
            let actions = Action::from_labels(split_items(payload, Delimiters::Flow));
            (!actions.is_empty()).then_some(ContentBlock::Actions { actions })
        }
        TagKind::Rating => Some(ContentBlock::Rating {
            question: payload.trim().to_owned(),
        }),
        TagKind::Query => Some(ContentBlock::Query {
            query: payload.trim().to_owned(),
        }),
        TagKind::Switch => {
            if payload.contains(Delimiters::PIPE) {
                // `[switch:name|a|b]` is a mixed directive, handled in recovery
                return None;
            }
            let agent_name = agent_name(payload);
            (!agent_name.is_empty()).then_some(ContentBlock::SwitchAgent { agent_name })
        }
        TagKind::HighlightSelect => highlight_select(payload),
        // A JSON kind whose payload is not an object.
        TagKind::Chart | TagKind::Kpi | TagKind::ThoughtChain => None,
    };

    Some(match block {
        Some(block) => Resolution::emit(consumed, block),
        None => {
            log::debug!("[{}] tag has no usable payload, kept as text", tag.name);
            Resolution::Verbatim { consumed }
        }
    })
}

/// Trimmed agent name with any stray `]` removed.
pub(crate) fn agent_name(payload: &str) -> String {
    payload.replace(']', "").trim().to_owned()
}

/// First segment is the identified text; it is also offered as the first option.
fn highlight_select(payload: &str) -> Option<ContentBlock> {
    let parts = split_items(payload, Delimiters::Lines);
    if parts.len() < 2 {
        return None;
    }
    Some(ContentBlock::HighlightSelect {
        text: parts[0].clone(),
        options: ChoiceOption::from_labels(parts),
    })
}

/// Index of the first `]` at or after `from`. With `stop_at_open`, a `[`
/// met first means there is no closing bracket.
fn closing_bracket(s: &str, from: usize, stop_at_open: bool) -> Option<usize> {
    for (i, &b) in s.as_bytes().iter().enumerate().skip(from) {
        match b {
            TagKind::CLOSE => return Some(i),
            TagKind::OPEN if stop_at_open => return None,
            _ => {}
        }
    }
    None
}

fn skip_whitespace(s: &str, from: usize) -> usize {
    from + s.as_bytes()[from..]
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count()
}
