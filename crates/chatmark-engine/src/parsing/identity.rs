//! Stable keys for blocks across streaming re-parses.
//!
//! Each parse returns fresh values with positional ids, so a renderer that
//! animates or reconciles needs its own key. The key combines position,
//! kind and a fingerprint of the content; it only changes when the block at
//! that position changes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::types::ContentBlock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedBlock {
    pub key: String,
    pub block: ContentBlock,
}

/// Pairs every block with its key.
pub fn keyed(blocks: Vec<ContentBlock>) -> Vec<KeyedBlock> {
    blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| KeyedBlock {
            key: block_key(index, &block),
            block,
        })
        .collect()
}

/// `<index>:<kind>:<fingerprint>`.
pub fn block_key(index: usize, block: &ContentBlock) -> String {
    format!("{index}:{}:{:016x}", block.kind(), fingerprint(block))
}

fn fingerprint(block: &ContentBlock) -> u64 {
    let mut value = serde_json::to_value(block).unwrap_or_default();
    // Generated KPI ids differ on every parse.
    if let ContentBlock::Kpi(_) = block
        && let Some(fields) = value.as_object_mut()
    {
        fields.remove("id");
    }
    let mut hasher = DefaultHasher::new();
    value.to_string().hash(&mut hasher);
    hasher.finish()
}
