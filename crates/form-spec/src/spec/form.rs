use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Messages;
use crate::editor::questions::blank_question;
use crate::ids::IdSource;
use crate::spec::question::Question;

/// Top-level form snapshot consumed by renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormModel {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl FormModel {
    /// A fresh form holding one empty `short` question.
    pub fn new(ids: &mut dyn IdSource, messages: &Messages) -> Self {
        Self {
            title: messages.untitled_form.clone(),
            description: messages.form_description.clone(),
            questions: vec![blank_question(ids, messages)],
        }
    }

    pub fn with_questions(&self, questions: Vec<Question>) -> Self {
        Self {
            title: self.title.clone(),
            description: self.description.clone(),
            questions,
        }
    }

    pub fn set_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn set_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Questions that carry text, in form order.
    pub fn complete_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|question| question.is_complete())
    }

    pub fn is_submittable(&self) -> bool {
        self.complete_questions().next().is_some()
    }
}
