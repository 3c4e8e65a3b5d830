use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::compile::{ParsedValue, Validator, compile};
use crate::config::Messages;
use crate::spec::question::Question;

/// Raw respondent input keyed by question id.
pub type Responses = BTreeMap<String, String>;

/// Outcome of validating one response map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
    pub values: BTreeMap<String, ParsedValue>,
}

/// One answered question as handed to whoever consumes a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub question_text: String,
    pub response: ParsedValue,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("the form has no question with text to submit")]
    NothingToSubmit,
    #[error("{} field(s) failed validation", .0.errors.len())]
    Invalid(ValidationResult),
}

struct Field {
    id: String,
    text: String,
    validator: Validator,
}

/// Whole-form validator: one compiled [`Validator`] per question with text.
pub struct FormValidator {
    fields: Vec<Field>,
}

impl FormValidator {
    pub fn build(questions: &[Question], messages: &Messages) -> Self {
        let fields = questions
            .iter()
            .filter(|question| question.is_complete())
            .map(|question| Field {
                id: question.id.clone(),
                text: question.question_text.clone().unwrap_or_default(),
                validator: compile(question.validation.as_ref(), messages),
            })
            .collect();
        Self { fields }
    }

    pub fn is_submittable(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn validator(&self, question_id: &str) -> Option<&Validator> {
        self.fields
            .iter()
            .find(|field| field.id == question_id)
            .map(|field| &field.validator)
    }

    /// Validates every field independently; unknown response keys are ignored.
    pub fn validate(&self, responses: &Responses) -> ValidationResult {
        let mut errors = BTreeMap::new();
        let mut values = BTreeMap::new();

        for field in &self.fields {
            let raw = responses.get(&field.id).map(String::as_str);
            match field.validator.validate(raw) {
                Ok(value) => {
                    values.insert(field.id.clone(), value);
                }
                Err(message) => {
                    errors.insert(field.id.clone(), message);
                }
            }
        }

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            values,
        }
    }

    /// Validates and, on success, pairs each question text with its parsed
    /// response in form order.
    pub fn submit(&self, responses: &Responses) -> Result<Vec<SubmittedAnswer>, SubmitError> {
        if !self.is_submittable() {
            return Err(SubmitError::NothingToSubmit);
        }
        let mut result = self.validate(responses);
        if !result.valid {
            return Err(SubmitError::Invalid(result));
        }

        Ok(self
            .fields
            .iter()
            .map(|field| SubmittedAnswer {
                question_id: field.id.clone(),
                question_text: field.text.clone(),
                response: result
                    .values
                    .remove(&field.id)
                    .unwrap_or(ParsedValue::Missing),
            })
            .collect())
    }
}
