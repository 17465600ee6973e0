//! # Bare Directives
//!
//! The generator sometimes drops the brackets and writes `steps: a|b|c` or
//! `choices: x|y` straight into the prose. These helpers find such
//! directives in plain text; the scan loop and recovery decide where to look.
//!
//! A directive's content runs to the end of its line and never crosses a
//! bracket. `actions` and bracket-adjacent `choices` need at least one `|`
//! before they count; a lone `steps: x` does not.

use std::ops::Range;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{
    kinds::{Delimiters, split_items},
    types::{Action, ChoiceOption, ContentBlock},
};

fn steps_at_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)steps:\s*([^\n\[\]]+)$").expect("Invalid steps regex"))
}

fn actions_at_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)actions:\s*([^\n\[\]]+)$").expect("Invalid actions regex")
    })
}

fn choices_at_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(choices?(?:-multiple)?):\s*([^\n\[\]]+)$").expect("Invalid choices regex")
    })
}

fn choices_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(choices?(?:-multiple)?):\s*([^\n\[\]]+)(?:\n|$)")
            .expect("Invalid choices line regex")
    })
}

fn steps_anywhere() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)steps:\s*([^\n\[\]]+)").expect("Invalid steps regex"))
}

fn choices_anywhere() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(choices?(?:-multiple)?):\s*([^\n\[\]]+)").expect("Invalid choices regex")
    })
}

/// A directive ending exactly at the end of `text` (checked in the order
/// steps, actions, choices). Returns the byte offset where the directive
/// starts and its block.
pub fn trailing(text: &str) -> Option<(usize, ContentBlock)> {
    if let Some(caps) = steps_at_end().captures(text)
        && let Some(block) = steps_block(&caps[1])
    {
        return Some((match_start(&caps), block));
    }
    if let Some(caps) = actions_at_end().captures(text)
        && let Some(block) = actions_block(&caps[1])
    {
        return Some((match_start(&caps), block));
    }
    if let Some(caps) = choices_at_end().captures(text)
        && caps[2].contains(Delimiters::PIPE)
        && let Some(block) = choices_block(&caps[1], &caps[2])
    {
        return Some((match_start(&caps), block));
    }
    None
}

/// Line-terminated `choices:` directives in bracket-free trailing text, in
/// order. A single option is enough here.
pub fn tail_choices(text: &str) -> Vec<(Range<usize>, ContentBlock)> {
    choices_line()
        .captures_iter(text)
        .filter_map(|caps| {
            let block = choices_block(&caps[1], &caps[2])?;
            Some((caps.get(0)?.range(), block))
        })
        .collect()
}

/// Last-chance salvage for a whole message that parsed to plain text: the
/// first `steps:` directive, else the first `choices:` directive with a `|`.
/// Returns the text before, the block, and the text after.
pub fn whole_message(text: &str) -> Option<(&str, ContentBlock, &str)> {
    let (range, block) = steps_anywhere()
        .captures(text)
        .and_then(|caps| Some((caps.get(0)?.range(), steps_block(&caps[1])?)))
        .or_else(|| {
            let caps = choices_anywhere().captures(text)?;
            if !caps[2].contains(Delimiters::PIPE) {
                return None;
            }
            Some((caps.get(0)?.range(), choices_block(&caps[1], &caps[2])?))
        })?;
    Some((&text[..range.start], block, &text[range.end..]))
}

fn match_start(caps: &Captures<'_>) -> usize {
    caps.get(0).map_or(0, |m| m.start())
}

fn steps_block(content: &str) -> Option<ContentBlock> {
    let steps = split_items(content, Delimiters::Flow);
    (!steps.is_empty()).then_some(ContentBlock::Steps { steps })
}

fn actions_block(content: &str) -> Option<ContentBlock> {
    if !content.contains(Delimiters::PIPE) {
        return None;
    }
    let actions = Action::from_labels(split_items(content, Delimiters::Lines));
    (!actions.is_empty()).then_some(ContentBlock::Actions { actions })
}

fn choices_block(name: &str, content: &str) -> Option<ContentBlock> {
    let options = ChoiceOption::from_labels(split_items(content, Delimiters::Lines));
    let multiple = name.to_ascii_lowercase().contains("multiple");
    (!options.is_empty()).then_some(ContentBlock::Choices { options, multiple })
}
