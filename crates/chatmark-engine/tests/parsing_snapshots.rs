use std::collections::BTreeMap;

use chatmark_engine::{
    ContentBlock, extract_query_trigger,
    parsing::{parse_content, snapshot},
};
use pretty_assertions::assert_eq;

const FIXTURES: [&str; 5] = [
    "sales_report",
    "guided_choices",
    "malformed",
    "streaming_cut",
    "thought_chain",
];

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.txt",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn kinds_of(name: &str) -> Vec<&'static str> {
    let text = fixture(name);
    let blocks = parse_content(&text);
    snapshot::invariants(&text, &blocks);
    blocks.iter().map(ContentBlock::kind).collect()
}

#[test]
fn fixture_sales_report() {
    assert_eq!(
        kinds_of("sales_report"),
        ["text", "kpi", "chart", "text", "actions"]
    );
}

#[test]
fn fixture_guided_choices() {
    assert_eq!(
        kinds_of("guided_choices"),
        ["text", "choices", "text", "steps", "rating"]
    );
}

#[test]
fn fixture_malformed() {
    assert_eq!(
        kinds_of("malformed"),
        [
            "text", "switch", "choices", "text", "choices", "text", "steps", "text", "choices"
        ]
    );
}

#[test]
fn fixture_streaming_cut() {
    // The chart stays visible as text until its object closes.
    assert_eq!(kinds_of("streaming_cut"), ["text"]);
}

#[test]
fn fixture_thought_chain() {
    assert_eq!(
        kinds_of("thought_chain"),
        ["thought-chain", "text", "highlight-select", "text", "query"]
    );
    assert_eq!(
        extract_query_trigger(&fixture("thought_chain")).as_deref(),
        Some("华东区各门店销售额")
    );
}

/// Labels of the list blocks (steps, choices, actions), by kind.
fn list_items(blocks: &[ContentBlock]) -> Vec<(&'static str, Vec<&str>)> {
    blocks
        .iter()
        .filter_map(|b| {
            let labels: Vec<&str> = match b {
                ContentBlock::Steps { steps } => steps.iter().map(String::as_str).collect(),
                ContentBlock::Choices { options, .. } => {
                    options.iter().map(|o| o.label.as_str()).collect()
                }
                ContentBlock::Actions { actions } => {
                    actions.iter().map(|a| a.label.as_str()).collect()
                }
                _ => return None,
            };
            Some((b.kind(), labels))
        })
        .collect()
}

fn item_counts(blocks: &[ContentBlock]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for (kind, labels) in list_items(blocks) {
        *counts.entry(kind).or_default() += labels.len();
    }
    counts
}

/// Every prefix of every fixture parses to structurally valid blocks, and
/// never offers items that are not in the text received so far.
#[test]
fn every_prefix_satisfies_invariants() {
    for name in FIXTURES {
        let text = fixture(name);
        let full = parse_content(&text);
        snapshot::invariants(&text, &full);
        let full_counts = item_counts(&full);

        for (end, _) in text.char_indices().skip(1) {
            let prefix = &text[..end];
            let blocks = parse_content(prefix);
            snapshot::invariants(prefix, &blocks);

            for (kind, labels) in list_items(&blocks) {
                for label in labels {
                    assert!(
                        prefix.contains(label),
                        "{name}: {kind} item {label:?} not in prefix {prefix:?}"
                    );
                }
            }
            for (kind, count) in item_counts(&blocks) {
                let limit = full_counts.get(kind).copied().unwrap_or(0);
                assert!(
                    count <= limit,
                    "{name}: prefix {prefix:?} has {count} {kind} items, full message has {limit}"
                );
            }
        }
    }
}

#[test]
fn clean_tags_snapshot() {
    let blocks = parse_content("Pick a region: [choices:East|West|North]\nThen [rating:How was it?]");
    insta::assert_json_snapshot!(snapshot::normalize(&blocks), @r#"
    {
      "blocks": [
        {
          "kind": "text",
          "text": "Pick a region:",
          "items": []
        },
        {
          "kind": "choices",
          "text": "single",
          "items": [
            "East",
            "West",
            "North"
          ]
        },
        {
          "kind": "text",
          "text": "Then",
          "items": []
        },
        {
          "kind": "rating",
          "text": "How was it?",
          "items": []
        }
      ]
    }
    "#);
}

#[test]
fn unterminated_steps_snapshot() {
    let blocks = parse_content("Plan [steps:load -> clean -> model");
    insta::assert_json_snapshot!(snapshot::normalize(&blocks), @r#"
    {
      "blocks": [
        {
          "kind": "text",
          "text": "Plan",
          "items": []
        },
        {
          "kind": "steps",
          "text": "",
          "items": [
            "load",
            "clean",
            "model"
          ]
        }
      ]
    }
    "#);
}

#[test]
fn mixed_switch_snapshot() {
    let blocks = parse_content("[switch:Analyst|Sales|Costs] ok");
    insta::assert_json_snapshot!(snapshot::normalize(&blocks), @r#"
    {
      "blocks": [
        {
          "kind": "switch",
          "text": "Analyst",
          "items": []
        },
        {
          "kind": "choices",
          "text": "single",
          "items": [
            "Sales",
            "Costs"
          ]
        },
        {
          "kind": "text",
          "text": "ok",
          "items": []
        }
      ]
    }
    "#);
}

#[test]
fn json_payloads_snapshot() {
    let blocks = parse_content(
        r#"Trend [chart:{"type":"line","data":[1,2,3]}] and [kpi:{"label":"GMV","value":42,"unit":"k"}]"#,
    );
    insta::assert_json_snapshot!(snapshot::normalize(&blocks), @r#"
    {
      "blocks": [
        {
          "kind": "text",
          "text": "Trend",
          "items": []
        },
        {
          "kind": "chart",
          "text": "line",
          "items": [
            "data",
            "type"
          ]
        },
        {
          "kind": "text",
          "text": "and",
          "items": []
        },
        {
          "kind": "kpi",
          "text": "GMV",
          "items": [
            "42"
          ]
        }
      ]
    }
    "#);
}

#[test]
fn bare_list_and_literals_snapshot() {
    let blocks = parse_content("Options: [ a | b ] [unknown:x] [object Object]");
    insta::assert_json_snapshot!(snapshot::normalize(&blocks), @r#"
    {
      "blocks": [
        {
          "kind": "text",
          "text": "Options:",
          "items": []
        },
        {
          "kind": "choices",
          "text": "single",
          "items": [
            "a",
            "b"
          ]
        },
        {
          "kind": "text",
          "text": "[unknown:x]",
          "items": []
        }
      ]
    }
    "#);
}

#[test]
fn plain_prose_directive_is_salvaged() {
    let blocks = parse_content("Next steps: fetch -> chart");
    assert_eq!(
        blocks,
        [
            ContentBlock::text("Next"),
            ContentBlock::Steps {
                steps: vec!["fetch".into(), "chart".into()]
            }
        ]
    );
}

#[test]
fn blank_input_has_no_blocks() {
    for text in ["", "   ", "\n\t", "[object Object]"] {
        assert!(parse_content(text).is_empty(), "{text:?}");
    }
}

#[test]
fn serialized_wire_shape() {
    let blocks = parse_content("[switch:Analyst]");
    assert_eq!(
        serde_json::to_value(&blocks).unwrap(),
        serde_json::json!([{"type": "switch", "agentName": "Analyst"}])
    );
}
