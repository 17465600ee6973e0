//! # JSON Payloads
//!
//! `chart`, `kpi` and `thought-chain` carry a JSON object instead of a list.
//! The object is located by brace counting from its `{` and must be
//! followed directly by the tag's closing `]`. Braces inside JSON strings
//! are counted like any other brace (`{"label":"A{B}"}` balances by luck,
//! `{"label":"A{"}` does not); no string awareness is attempted.

use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use super::{
    kinds::TagKind,
    types::{ContentBlock, KpiCard},
};

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed JSON payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Finds the `}` matching the `{` at `open`, provided it is followed by `]`.
///
/// Returns the index of that `}`. `None` means "not yet available": the
/// object is still streaming in, or the tag is not closed right after it.
pub fn balanced_object_end(s: &str, open: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return (bytes.get(i + 1) == Some(&TagKind::CLOSE)).then_some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Builds the block for a JSON-carrying tag kind from its object text.
pub fn build(kind: TagKind, json: &str) -> Result<ContentBlock, PayloadError> {
    let object = match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => map,
        _ => return Err(PayloadError::NotAnObject),
    };
    match kind {
        TagKind::Chart => chart(object),
        TagKind::Kpi => kpi(object),
        TagKind::ThoughtChain => thought_chain(object),
        _ => Err(PayloadError::NotAnObject),
    }
}

fn chart(payload: Map<String, Value>) -> Result<ContentBlock, PayloadError> {
    if present(&payload, "data").is_none() {
        return Err(PayloadError::MissingField("data"));
    }
    Ok(ContentBlock::Chart { payload })
}

fn kpi(mut fields: Map<String, Value>) -> Result<ContentBlock, PayloadError> {
    let label = fields
        .remove("label")
        .ok_or(PayloadError::MissingField("label"))?;
    let value = fields
        .remove("value")
        .ok_or(PayloadError::MissingField("value"))?;
    let id = match fields.remove("id") {
        Some(Value::String(id)) if !id.is_empty() => id,
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("kpi_{}", Uuid::new_v4().simple()),
    };
    Ok(ContentBlock::Kpi(KpiCard {
        id,
        label,
        value,
        extra: fields,
    }))
}

fn thought_chain(mut object: Map<String, Value>) -> Result<ContentBlock, PayloadError> {
    match object.remove("items") {
        Some(Value::Array(items)) => Ok(ContentBlock::ThoughtChain { items }),
        _ => Err(PayloadError::MissingField("items")),
    }
}

fn present<'m>(map: &'m Map<String, Value>, key: &str) -> Option<&'m Value> {
    map.get(key).filter(|v| !v.is_null())
}
