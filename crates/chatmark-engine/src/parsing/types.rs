use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One element of the parser's output: literal text or a structured directive.
///
/// Blocks are plain values recomputed on every parse. Synthetic ids
/// (`opt_<n>`, `act_<n>`) are positional and shift between calls; use
/// [`crate::parsing::identity::keyed`] when a stable key is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentBlock {
    /// Prose between tags, trimmed and free of `[object Object]` artifacts.
    Text { content: String },
    /// `[steps:a|b|c]`
    Steps { steps: Vec<String> },
    /// `[choices:a|b]` or `[choices-multiple:a|b]`. Never empty.
    Choices {
        options: Vec<ChoiceOption>,
        multiple: bool,
    },
    /// `[actions:a|b]`
    Actions { actions: Vec<Action> },
    /// `[rating:question]`. The question may be empty.
    Rating { question: String },
    /// `[query:literal text]`
    Query { query: String },
    /// `[switch:agent name]`, a persona hand-off request.
    #[serde(rename = "switch")]
    SwitchAgent {
        #[serde(rename = "agentName")]
        agent_name: String,
    },
    /// `[chart:{...}]`. The payload always has a `data` field.
    Chart { payload: Map<String, Value> },
    /// `[kpi:{...}]`
    Kpi(KpiCard),
    /// `[thought-chain:{"items":[...]}]`
    ThoughtChain { items: Vec<Value> },
    /// `[highlight-select:identified|optA|optB]`. The identified text is
    /// also the first option.
    HighlightSelect {
        text: String,
        options: Vec<ChoiceOption>,
    },
}

/// A selectable option of a `Choices` or `HighlightSelect` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    pub value: String,
}

/// A one-click shortcut; clicking submits `query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub label: String,
    pub query: String,
}

/// KPI card payload. Fields other than `id`/`label`/`value` pass through
/// untouched (trend, unit, comparison...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub id: String,
    pub label: Value,
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChoiceOption {
    /// Builds options positionally from already-split labels.
    pub fn from_labels<I, S>(labels: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let label = label.into();
                Self {
                    id: format!("opt_{i}"),
                    value: label.clone(),
                    label,
                }
            })
            .collect()
    }
}

impl Action {
    /// Builds actions positionally; each action's query is its label.
    pub fn from_labels<I, S>(labels: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let label = label.into();
                Self {
                    id: format!("act_{i}"),
                    query: label.clone(),
                    label,
                }
            })
            .collect()
    }
}

impl ContentBlock {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Stable kebab-case name of the variant, matching the serialized `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Steps { .. } => "steps",
            Self::Choices { .. } => "choices",
            Self::Actions { .. } => "actions",
            Self::Rating { .. } => "rating",
            Self::Query { .. } => "query",
            Self::SwitchAgent { .. } => "switch",
            Self::Chart { .. } => "chart",
            Self::Kpi(_) => "kpi",
            Self::ThoughtChain { .. } => "thought-chain",
            Self::HighlightSelect { .. } => "highlight-select",
        }
    }

    /// True for blocks that eventually report a user-chosen value back.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::Choices { .. }
                | Self::Actions { .. }
                | Self::Rating { .. }
                | Self::SwitchAgent { .. }
                | Self::HighlightSelect { .. }
        )
    }
}
