use serde::Serialize;
use serde_json::{Map, Value};

use crate::parsing::types::ContentBlock;

#[derive(Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

/// One block reduced to what a reader checks: its kind, its headline text
/// and its items. Positional and generated ids are left out.
#[derive(Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub text: String,
    pub items: Vec<String>,
}

pub fn normalize(blocks: &[ContentBlock]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| {
            let (text, items) = match b {
                ContentBlock::Text { content } => (content.clone(), vec![]),
                ContentBlock::Steps { steps } => (String::new(), steps.clone()),
                ContentBlock::Choices { options, multiple } => (
                    if *multiple { "multiple" } else { "single" }.to_string(),
                    options.iter().map(|o| o.label.clone()).collect(),
                ),
                ContentBlock::Actions { actions } => (
                    String::new(),
                    actions.iter().map(|a| a.label.clone()).collect(),
                ),
                ContentBlock::Rating { question } => (question.clone(), vec![]),
                ContentBlock::Query { query } => (query.clone(), vec![]),
                ContentBlock::SwitchAgent { agent_name } => (agent_name.clone(), vec![]),
                ContentBlock::Chart { payload } => (
                    payload
                        .get("type")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    sorted_keys(payload),
                ),
                ContentBlock::Kpi(card) => (scalar(&card.label), vec![scalar(&card.value)]),
                ContentBlock::ThoughtChain { items } => {
                    (String::new(), items.iter().map(scalar).collect())
                }
                ContentBlock::HighlightSelect { text, options } => (
                    text.clone(),
                    options.iter().map(|o| o.label.clone()).collect(),
                ),
            };
            BlockSnap {
                kind: b.kind().to_string(),
                text,
                items,
            }
        })
        .collect();

    Snap { blocks }
}

fn sorted_keys(payload: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = payload.keys().cloned().collect();
    keys.sort();
    keys
}

fn scalar(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
