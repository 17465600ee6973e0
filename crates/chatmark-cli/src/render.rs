//! Terminal and JSON rendering of parsed blocks.
//!
//! Pretty output is one line per block, meant for eyeballing what a chat
//! client would show. JSON output is the blocks' wire shape, so it can be
//! diffed against what a front end receives.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal};

use anyhow::Result;
use chatmark_engine::{ContentBlock, KeyedBlock};
use clap::ValueEnum;
use serde_json::Value;

// ── Output format ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// One line per block.
    Pretty,
    /// Machine-readable JSON.
    Json,
    /// Block counts by kind.
    Summary,
}

impl Format {
    /// Falls back to pretty for interactive terminals, JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<Format>) -> Self {
        explicit.unwrap_or_else(|| {
            if io::stdout().is_terminal() {
                Format::Pretty
            } else {
                Format::Json
            }
        })
    }
}

// ── Blocks ──────────────────────────────────────────────────────────────

pub(crate) fn print_blocks(
    blocks: &[ContentBlock],
    query_trigger: Option<&str>,
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "blocks": blocks,
                "queryTrigger": query_trigger,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for block in blocks {
                println!("{}", describe(block));
            }
            if let Some(query) = query_trigger {
                println!("=> auto query: {query}");
            }
        }
        Format::Summary => println!("{}", summarize(blocks)),
    }
    Ok(())
}

/// One replayed chunk. Summary mode only reports the final state.
pub(crate) fn print_chunk(
    index: usize,
    chunk: &str,
    blocks: &[KeyedBlock],
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "chunk": index,
                "text": chunk,
                "blocks": blocks,
            });
            println!("{}", serde_json::to_string(&out)?);
        }
        Format::Pretty => {
            let kinds: Vec<&str> = blocks.iter().map(|k| k.block.kind()).collect();
            println!("chunk {index:>4} {chunk:?} -> [{}]", kinds.join(", "));
        }
        Format::Summary => {}
    }
    Ok(())
}

pub(crate) fn describe(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Text { content } => format!("text: {content}"),
        ContentBlock::Steps { steps } => format!("steps: {}", steps.join(" -> ")),
        ContentBlock::Choices { options, multiple } => {
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            let mode = if *multiple { " (multiple)" } else { "" };
            format!("choices{mode}: {}", labels.join(" | "))
        }
        ContentBlock::Actions { actions } => {
            let labels: Vec<&str> = actions.iter().map(|a| a.label.as_str()).collect();
            format!("actions: {}", labels.join(" | "))
        }
        ContentBlock::Rating { question } => format!("rating: {question}"),
        ContentBlock::Query { query } => format!("query: {query}"),
        ContentBlock::SwitchAgent { agent_name } => format!("switch: {agent_name}"),
        ContentBlock::Chart { payload } => {
            let chart_type = payload
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("chart");
            format!("chart: {chart_type}")
        }
        ContentBlock::Kpi(card) => format!(
            "kpi: {} = {}",
            plain(&card.label),
            plain(&card.value)
        ),
        ContentBlock::ThoughtChain { items } => format!("thought-chain: {} items", items.len()),
        ContentBlock::HighlightSelect { text, options } => {
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            format!("highlight-select: {text} [{}]", labels.join(" | "))
        }
    }
}

fn summarize(blocks: &[ContentBlock]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for block in blocks {
        *counts.entry(block.kind()).or_default() += 1;
    }
    let interactive = blocks.iter().filter(|b| b.is_interactive()).count();
    let parts: Vec<String> = counts
        .iter()
        .map(|(kind, n)| format!("{kind}={n}"))
        .collect();
    format!(
        "{} blocks ({interactive} interactive): {}",
        blocks.len(),
        parts.join(" ")
    )
}

fn plain(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
