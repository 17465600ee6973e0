use crate::parsing::types::ContentBlock;

/// Validates parser output invariants.
///
/// Asserts that:
/// - Output is empty exactly when the input is blank once `[object Object]`
///   residue is removed
/// - Text blocks are trimmed, non-empty and free of `[object Object]`
/// - List blocks (steps, choices, actions, highlight options) are non-empty
/// - KPI cards have an id and charts have a non-null `data` field
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(input: &str, blocks: &[ContentBlock]) {
    let blank = input.replace("[object Object]", "").trim().is_empty();
    assert_eq!(
        blocks.is_empty(),
        blank,
        "blank input must map to no blocks and vice versa (input: {input:?}, blocks: {blocks:?})"
    );

    for b in blocks {
        match b {
            ContentBlock::Text { content } => {
                assert!(!content.is_empty(), "empty text block (input: {input:?})");
                assert_eq!(
                    content.trim(),
                    content,
                    "text block not trimmed (input: {input:?})"
                );
                assert!(
                    !content.contains("[object Object]"),
                    "artifact left in text: {content:?}"
                );
            }
            ContentBlock::Steps { steps } => {
                assert!(!steps.is_empty(), "empty steps (input: {input:?})");
            }
            ContentBlock::Choices { options, .. } => {
                assert!(!options.is_empty(), "empty choices (input: {input:?})");
            }
            ContentBlock::Actions { actions } => {
                assert!(!actions.is_empty(), "empty actions (input: {input:?})");
            }
            ContentBlock::HighlightSelect { options, .. } => {
                assert!(
                    options.len() >= 2,
                    "highlight-select needs two options (input: {input:?})"
                );
            }
            ContentBlock::Kpi(card) => {
                assert!(!card.id.is_empty(), "kpi without id (input: {input:?})");
            }
            ContentBlock::Chart { payload } => {
                assert!(
                    payload.get("data").is_some_and(|d| !d.is_null()),
                    "chart without data (input: {input:?})"
                );
            }
            ContentBlock::Rating { .. }
            | ContentBlock::Query { .. }
            | ContentBlock::SwitchAgent { .. }
            | ContentBlock::ThoughtChain { .. } => {}
        }
    }
}
