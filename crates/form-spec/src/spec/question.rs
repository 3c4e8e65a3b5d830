use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::choice::Choice;
use crate::spec::validation::{ValidationDocument, ValidationSpec};

/// Answer shape of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    #[default]
    Short,
    Long,
    MultipleChoice,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Short => "short",
            QuestionType::Long => "long",
            QuestionType::MultipleChoice => "multipleChoice",
        }
    }
}

/// Definition of a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "typeQuestion", default)]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    /// `Some("")` is a visible but empty description; `None` hides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<ValidationDocument>")]
    pub validation: Option<ValidationSpec>,
    #[serde(default)]
    pub multiple_choices: Vec<Choice>,
}

impl Question {
    /// Questions without text are left out of previews and submissions.
    pub fn is_complete(&self) -> bool {
        self.question_text
            .as_deref()
            .map(|text| !text.is_empty())
            .unwrap_or(false)
    }

    pub fn is_required(&self) -> bool {
        self.validation
            .as_ref()
            .map(|validation| validation.is_required)
            .unwrap_or(false)
    }

    pub fn has_number_rule(&self) -> bool {
        self.validation
            .as_ref()
            .map(ValidationSpec::has_number_rule)
            .unwrap_or(false)
    }

    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.multiple_choices
            .iter()
            .find(|choice| choice.id == choice_id)
    }
}
