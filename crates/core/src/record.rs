use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opaque bag of style attributes attached to a cell.
///
/// The sync subsystem never interprets these; they are carried verbatim
/// through optimistic writes and server refreshes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleAttributes(IndexMap<String, serde_json::Value>);

impl StyleAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

/// One cell as the client caches it.
///
/// Exactly one of `value`/`formula` is authoritative: for a formula cell
/// the `value` is the server-computed projection and is stale from the
/// moment of a local edit until the next successful refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default, skip_serializing_if = "StyleAttributes::is_empty")]
    pub style: StyleAttributes,
}

impl CellRecord {
    /// Create a literal cell.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Create a formula cell. `source` is the expression without the `=` sigil.
    #[must_use]
    pub fn formula(source: impl Into<String>) -> Self {
        Self {
            formula: source.into(),
            ..Self::default()
        }
    }

    /// Classify a typed draft into a record, carrying over existing style.
    ///
    /// A leading `=` makes it a formula edit (`formula` is the text after
    /// the sigil, `value` empty); everything else is a literal. Total:
    /// every input string classifies.
    #[must_use]
    pub fn from_draft(draft: &str, style: StyleAttributes) -> Self {
        if let Some(source) = draft.strip_prefix('=') {
            Self {
                value: String::new(),
                formula: source.to_string(),
                style,
            }
        } else {
            Self {
                value: draft.to_string(),
                formula: String::new(),
                style,
            }
        }
    }

    #[must_use]
    pub fn is_formula(&self) -> bool {
        !self.formula.is_empty()
    }

    /// Text shown in the edit box: `=`-prefixed formula source, else the value.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.is_formula() {
            format!("={}", self.formula)
        } else {
            self.value.clone()
        }
    }
}
