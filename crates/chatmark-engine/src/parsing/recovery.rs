//! # Recovery Rules
//!
//! Salvage strategies for a `[` the dispatcher could not resolve as a clean
//! tag. They are tried in [`RecoveryRule::ORDER`]; the first rule that
//! consumes input wins. [`RecoveryRule::BareDirective`] is the exception: it
//! only rewrites the pending text and the chain carries on after it.
//!
//! Every rule is a pure function of the unscanned input (starting at the
//! `[`) and the pending, not-yet-emitted text before it.

use super::{
    directive,
    dispatch::agent_name,
    kinds::{Delimiters, Tag, TagKind, split_items},
    resolution::Resolution,
    types::{ChoiceOption, ContentBlock},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryRule {
    /// `[choices:a|b` or `[steps:a|b` with no `]` yet.
    UnterminatedList,
    /// `[switch:name` with no `]` yet.
    UnterminatedSwitch,
    /// `[switch:name|a|b]`: a hand-off followed by choices.
    MixedSwitch,
    /// `[a|b|c]` without a type prefix: single-select choices.
    BareList,
    /// `steps: a|b` written without brackets right before this `[`.
    BareDirective,
    /// `[choices:` with nothing after it, or a lone `[`: dropped.
    Stub,
    /// Keep the `[` as text and move on. Always applies.
    Escape,
}

impl RecoveryRule {
    pub const ORDER: [Self; 7] = [
        Self::UnterminatedList,
        Self::UnterminatedSwitch,
        Self::MixedSwitch,
        Self::BareList,
        Self::BareDirective,
        Self::Stub,
        Self::Escape,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::UnterminatedList => "unterminated-list",
            Self::UnterminatedSwitch => "unterminated-switch",
            Self::MixedSwitch => "mixed-switch",
            Self::BareList => "bare-list",
            Self::BareDirective => "bare-directive",
            Self::Stub => "stub",
            Self::Escape => "escape",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|r| r.name() == name)
    }

    /// Applies this rule to `rest` (starting at a `[`), with `pending` being
    /// the text scanned since the last emitted block.
    pub fn apply(self, rest: &str, pending: &str) -> Option<Resolution> {
        match self {
            Self::UnterminatedList => unterminated_list(rest),
            Self::UnterminatedSwitch => unterminated_switch(rest),
            Self::MixedSwitch => mixed_switch(rest),
            Self::BareList => bare_list(rest),
            Self::BareDirective => {
                let (keep, block) = directive::trailing(pending)?;
                Some(Resolution::Rewrite { keep, block })
            }
            Self::Stub => stub(rest),
            Self::Escape => Some(Resolution::Literal { consumed: 1 }),
        }
    }
}

/// The ordered set of rules a parser runs. [`RecoveryRule::Escape`] is
/// always kept: it is what guarantees the scan moves forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryChain {
    rules: Vec<RecoveryRule>,
}

impl Default for RecoveryChain {
    fn default() -> Self {
        Self {
            rules: RecoveryRule::ORDER.to_vec(),
        }
    }
}

impl RecoveryChain {
    /// Removes `rule` from the chain. Removing `Escape` is a no-op.
    #[must_use]
    pub fn without(mut self, rule: RecoveryRule) -> Self {
        if rule != RecoveryRule::Escape {
            self.rules.retain(|r| *r != rule);
        }
        self
    }

    pub fn rules(&self) -> &[RecoveryRule] {
        &self.rules
    }
}

/// Payload of an unterminated tag: up to the first newline or bracket.
/// Returns the payload and whether it stopped at a `]`.
fn open_payload(rest: &str, from: usize) -> (&str, bool) {
    let tail = &rest[from..];
    match tail.find(&['\n', '[', ']'][..]) {
        Some(end) => (&tail[..end], tail.as_bytes()[end] == TagKind::CLOSE),
        None => (tail, false),
    }
}

fn unterminated_list(rest: &str) -> Option<Resolution> {
    let tag = Tag::parse_header(rest)?;
    if !matches!(tag.kind?, TagKind::Steps | TagKind::Choices { .. }) {
        return None;
    }
    let (payload, _) = open_payload(rest, tag.payload_start);
    let items = split_items(payload, Delimiters::Flow);
    if items.is_empty() {
        return None;
    }
    let block = match tag.kind? {
        TagKind::Choices { multiple } => ContentBlock::Choices {
            options: ChoiceOption::from_labels(items),
            multiple,
        },
        _ => ContentBlock::Steps { steps: items },
    };
    Some(Resolution::emit(tag.payload_start + payload.len(), block))
}

fn unterminated_switch(rest: &str) -> Option<Resolution> {
    let tag = Tag::parse_header(rest)?;
    if tag.kind? != TagKind::Switch {
        return None;
    }
    let (payload, closed) = open_payload(rest, tag.payload_start);
    if closed {
        return None;
    }
    let blocks = switch_blocks(payload);
    if blocks.is_empty() {
        return None;
    }
    Some(Resolution::Emit {
        consumed: tag.payload_start + payload.len(),
        blocks,
    })
}

fn mixed_switch(rest: &str) -> Option<Resolution> {
    let tag = Tag::parse_header(rest)?;
    if tag.kind? != TagKind::Switch {
        return None;
    }
    let (payload, closed) = open_payload(rest, tag.payload_start);
    if !closed || !payload.contains(Delimiters::PIPE) {
        return None;
    }
    let blocks = switch_blocks(payload);
    if blocks.is_empty() {
        return None;
    }
    Some(Resolution::Emit {
        consumed: tag.payload_start + payload.len() + 1,
        blocks,
    })
}

/// `name|a|b` becomes a hand-off to `name` followed by choices `a`, `b`.
fn switch_blocks(payload: &str) -> Vec<ContentBlock> {
    let (name, trailing) = payload
        .split_once(Delimiters::PIPE)
        .unwrap_or((payload, ""));
    let mut blocks = vec![];
    let agent_name = agent_name(name);
    if !agent_name.is_empty() {
        blocks.push(ContentBlock::SwitchAgent { agent_name });
    }
    let options = ChoiceOption::from_labels(split_items(trailing, Delimiters::Lines));
    if !options.is_empty() {
        blocks.push(ContentBlock::Choices {
            options,
            multiple: false,
        });
    }
    blocks
}

fn bare_list(rest: &str) -> Option<Resolution> {
    // A typed tag the dispatcher rejected is not a bare list.
    if Tag::parse_header(rest).is_some() {
        return None;
    }
    let close = 1 + rest[1..].find(&['[', ']'][..])?;
    if rest.as_bytes()[close] != TagKind::CLOSE {
        return None;
    }
    let payload = &rest[1..close];
    if !payload.contains(Delimiters::PIPE) {
        return None;
    }
    let options = ChoiceOption::from_labels(split_items(payload, Delimiters::Lines));
    if options.is_empty() {
        return None;
    }
    Some(Resolution::emit(
        close + 1,
        ContentBlock::Choices {
            options,
            multiple: false,
        },
    ))
}

fn stub(rest: &str) -> Option<Resolution> {
    if let Some(tag) = Tag::parse_header(rest)
        && tag.kind.is_some_and(TagKind::is_list)
        && rest[tag.payload_start..].trim().is_empty()
    {
        return Some(Resolution::Drop {
            consumed: rest.len(),
        });
    }
    match rest[1..].chars().next() {
        None => Some(Resolution::Drop { consumed: 1 }),
        Some(c) if c.is_whitespace() => Some(Resolution::Drop { consumed: 1 }),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn blocks_of(res: Option<Resolution>) -> (usize, Vec<ContentBlock>) {
        match res {
            Some(Resolution::Emit { consumed, blocks }) => (consumed, blocks),
            other => panic!("expected emitted blocks, got {other:?}"),
        }
    }

    #[test]
    fn names_round_trip_in_order() {
        for rule in RecoveryRule::ORDER {
            assert_eq!(RecoveryRule::from_name(rule.name()), Some(rule));
        }
        assert_eq!(RecoveryRule::from_name("nope"), None);
        assert_eq!(RecoveryRule::ORDER.last(), Some(&RecoveryRule::Escape));
    }

    #[test]
    fn chain_never_loses_escape() {
        let chain = RecoveryChain::default()
            .without(RecoveryRule::Escape)
            .without(RecoveryRule::BareList);
        assert_eq!(chain.rules().len(), 6);
        assert!(chain.rules().contains(&RecoveryRule::Escape));
        assert!(!chain.rules().contains(&RecoveryRule::BareList));
    }

    #[test]
    fn unterminated_choices_to_eof() {
        let rest = "[choices:北京|上海|广州";
        let (consumed, blocks) = blocks_of(RecoveryRule::UnterminatedList.apply(rest, ""));
        assert_eq!(consumed, rest.len());
        assert_eq!(
            blocks,
            [ContentBlock::Choices {
                options: ChoiceOption::from_labels(["北京", "上海", "广州"]),
                multiple: false
            }]
        );
    }

    #[test]
    fn unterminated_steps_stop_at_newline_and_bracket() {
        let rest = "[steps:a->b\nmore";
        let (consumed, _) = blocks_of(RecoveryRule::UnterminatedList.apply(rest, ""));
        assert_eq!(&rest[consumed..], "\nmore");

        let rest = "[step:a|b [choices:x|y]";
        let (consumed, blocks) = blocks_of(RecoveryRule::UnterminatedList.apply(rest, ""));
        assert_eq!(&rest[consumed..], "[choices:x|y]");
        assert_eq!(
            blocks,
            [ContentBlock::Steps {
                steps: vec!["a".into(), "b".into()]
            }]
        );
    }

    #[rstest]
    #[case("[choices:")]
    #[case("[choices:   ")]
    #[case("[actions:a|b")]
    #[case("[rating:x")]
    fn unterminated_list_declines(#[case] rest: &str) {
        assert_eq!(RecoveryRule::UnterminatedList.apply(rest, ""), None);
    }

    #[test]
    fn unterminated_switch_names_agent() {
        let rest = "[switch:可视化小王";
        let (consumed, blocks) = blocks_of(RecoveryRule::UnterminatedSwitch.apply(rest, ""));
        assert_eq!(consumed, rest.len());
        assert_eq!(
            blocks,
            [ContentBlock::SwitchAgent {
                agent_name: "可视化小王".into()
            }]
        );
    }

    #[rstest]
    #[case("[switch:小王\n下一段文字")]
    #[case("[switch:小王 [choices:a|b]")]
    fn unterminated_switch_stops_at_line_or_bracket(#[case] rest: &str) {
        let (consumed, blocks) = blocks_of(RecoveryRule::UnterminatedSwitch.apply(rest, ""));
        assert_eq!(&rest[..consumed].trim_end(), &"[switch:小王");
        assert_eq!(
            blocks,
            [ContentBlock::SwitchAgent {
                agent_name: "小王".into()
            }]
        );
    }

    #[test]
    fn unterminated_switch_ignores_closed_and_empty() {
        assert_eq!(
            RecoveryRule::UnterminatedSwitch.apply("[switch:a|b]", ""),
            None
        );
        assert_eq!(RecoveryRule::UnterminatedSwitch.apply("[switch: ", ""), None);
    }

    #[test]
    fn mixed_switch_splits_agent_and_choices() {
        let rest = "[switch:可视化小王|制作交互式图表|对比长三角数据]尾";
        let (consumed, blocks) = blocks_of(RecoveryRule::MixedSwitch.apply(rest, ""));
        assert_eq!(&rest[consumed..], "尾");
        assert_eq!(
            blocks,
            [
                ContentBlock::SwitchAgent {
                    agent_name: "可视化小王".into()
                },
                ContentBlock::Choices {
                    options: ChoiceOption::from_labels(["制作交互式图表", "对比长三角数据"]),
                    multiple: false
                }
            ]
        );
    }

    #[test]
    fn bare_list_becomes_single_select() {
        let rest = "[日报|周报|月报] 选一个";
        let (consumed, blocks) = blocks_of(RecoveryRule::BareList.apply(rest, ""));
        assert_eq!(&rest[consumed..], " 选一个");
        assert!(matches!(
            &blocks[..],
            [ContentBlock::Choices { options, multiple: false }] if options.len() == 3
        ));
    }

    #[rstest]
    #[case("[no pipes here]")]
    #[case("[a|b")]
    #[case("[a [b|c]")]
    #[case("[|]")]
    #[case("[switch:|]")]
    #[case(r#"[kpi:{"label":"a|b","value":1} ]"#)]
    #[case("[unknown:a|b]")]
    fn bare_list_declines(#[case] rest: &str) {
        assert_eq!(RecoveryRule::BareList.apply(rest, ""), None);
    }

    #[test]
    fn bare_list_may_span_lines() {
        let (_, blocks) = blocks_of(RecoveryRule::BareList.apply("[甲|\n乙]", ""));
        assert!(matches!(&blocks[..], [ContentBlock::Choices { options, .. }] if options.len() == 2));
    }

    #[test]
    fn bare_directive_rewrites_pending() {
        let res = RecoveryRule::BareDirective.apply("[x", "介绍 choices: 是|否 ");
        let Some(Resolution::Rewrite { keep, block }) = res else {
            panic!("expected rewrite, got {res:?}");
        };
        assert_eq!(keep, "介绍 ".len());
        assert_eq!(block.kind(), "choices");
    }

    #[rstest]
    #[case("[choices:", "[choices:".len())]
    #[case("[steps: \n ", "[steps: \n ".len())]
    #[case("[highlight-select:", "[highlight-select:".len())]
    #[case("[", 1)]
    #[case("[ 后文", 1)]
    #[case("[\n", 1)]
    fn stubs_are_dropped(#[case] rest: &str, #[case] consumed: usize) {
        assert_eq!(
            RecoveryRule::Stub.apply(rest, ""),
            Some(Resolution::Drop { consumed })
        );
    }

    #[rstest]
    #[case("[rating:")]
    #[case("[choices:a")]
    #[case("[cho")]
    fn not_stubs(#[case] rest: &str) {
        assert_eq!(RecoveryRule::Stub.apply(rest, ""), None);
    }

    #[test]
    fn escape_always_applies() {
        assert_eq!(
            RecoveryRule::Escape.apply("[anything", "whatever"),
            Some(Resolution::Literal { consumed: 1 })
        );
    }
}
