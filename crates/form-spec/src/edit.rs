use serde::{Deserialize, Serialize};

use crate::config::FormConfig;
use crate::editor::questions::{self, QuestionField};
use crate::editor::EditError;
use crate::ids::IdSource;
use crate::spec::form::FormModel;
use crate::spec::question::QuestionType;
use crate::spec::validation::{RuleKind, ValidationSpec};

/// A mutation intent raised by the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Edit {
    SetTitle {
        title: String,
    },
    SetDescription {
        description: String,
    },
    CreateQuestion,
    DuplicateQuestion {
        id: String,
    },
    RemoveQuestion {
        id: String,
    },
    SetQuestionText {
        id: String,
        #[serde(default)]
        text: Option<String>,
    },
    SetQuestionDescription {
        id: String,
        #[serde(default)]
        description: Option<String>,
    },
    SetMask {
        id: String,
        #[serde(default)]
        mask: Option<String>,
    },
    SetType {
        id: String,
        #[serde(rename = "typeQuestion")]
        kind: QuestionType,
    },
    SetValidation {
        id: String,
        #[serde(default)]
        validation: Option<ValidationSpec>,
    },
    SetRequired {
        id: String,
        required: bool,
    },
    SetRuleKind {
        id: String,
        #[serde(rename = "type", default)]
        kind: Option<RuleKind>,
    },
    AddDescription {
        id: String,
    },
    AddMask {
        id: String,
    },
    ReorderQuestions {
        order: Vec<String>,
    },
    AddChoice {
        id: String,
        #[serde(default)]
        other: bool,
    },
    RenameChoice {
        id: String,
        choice_id: String,
        value: String,
    },
    RemoveChoice {
        id: String,
        choice_id: String,
    },
    ReorderChoices {
        id: String,
        order: Vec<String>,
    },
}

impl FormModel {
    /// Computes the snapshot that follows `edit`; `self` is left untouched.
    pub fn apply(
        &self,
        edit: &Edit,
        ids: &mut dyn IdSource,
        config: &FormConfig,
    ) -> Result<FormModel, EditError> {
        let messages = &config.messages;
        let current = &self.questions;
        let next = match edit {
            Edit::SetTitle { title } => return Ok(self.set_title(title.clone())),
            Edit::SetDescription { description } => {
                return Ok(self.set_description(description.clone()));
            }
            Edit::CreateQuestion => questions::create(current, ids, messages),
            Edit::DuplicateQuestion { id } => questions::duplicate(current, id, ids),
            Edit::RemoveQuestion { id } => questions::remove(current, id),
            Edit::SetQuestionText { id, text } => {
                questions::update(current, id, QuestionField::Text(text.clone()))
            }
            Edit::SetQuestionDescription { id, description } => questions::update(
                current,
                id,
                QuestionField::Description(description.clone()),
            ),
            Edit::SetMask { id, mask } => {
                questions::update(current, id, QuestionField::Mask(mask.clone()))
            }
            Edit::SetType { id, kind } => questions::set_type(current, id, *kind),
            Edit::SetValidation { id, validation } => {
                questions::set_validation(current, id, validation.clone())
            }
            Edit::SetRequired { id, required } => questions::set_required(current, id, *required),
            Edit::SetRuleKind { id, kind } => questions::set_rule_kind(current, id, *kind, messages),
            Edit::AddDescription { id } => questions::add_description(current, id, messages),
            Edit::AddMask { id } => questions::add_mask(current, id, messages),
            Edit::ReorderQuestions { order } => questions::reorder_by_ids(current, order),
            Edit::AddChoice { id, other } => questions::add_choice(current, id, *other, ids, config)?,
            Edit::RenameChoice {
                id,
                choice_id,
                value,
            } => questions::rename_choice(current, id, choice_id, value),
            Edit::RemoveChoice { id, choice_id } => questions::remove_choice(current, id, choice_id),
            Edit::ReorderChoices { id, order } => questions::reorder_choices(current, id, order),
        };
        Ok(self.with_questions(next))
    }

    /// Applies edits in order, stopping at the first rejected one.
    pub fn apply_all<'a, I>(
        &self,
        edits: I,
        ids: &mut dyn IdSource,
        config: &FormConfig,
    ) -> Result<FormModel, EditError>
    where
        I: IntoIterator<Item = &'a Edit>,
    {
        edits
            .into_iter()
            .try_fold(self.clone(), |model, edit| model.apply(edit, ids, config))
    }
}
