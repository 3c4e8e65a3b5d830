use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Distinguishes regular options from the single free-text "Other" entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    #[default]
    Option,
    Other,
}

/// One selectable option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Choice {
    pub id: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: ChoiceKind,
}

impl Choice {
    pub fn option(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            kind: ChoiceKind::Option,
        }
    }

    pub fn other(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: label.into(),
            kind: ChoiceKind::Other,
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self.kind, ChoiceKind::Other)
    }
}
