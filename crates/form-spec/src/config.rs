use std::{fs, io, path::Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the choice editor treats a second "Other" insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum OtherPolicy {
    /// Trust the caller; a second "Other" is appended like any other choice.
    #[default]
    Permissive,
    /// Reject a second "Other" with [`crate::EditError::OtherChoiceExists`].
    Strict,
}

/// Literal strings produced by the compiler and the editors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Messages {
    pub required: String,
    pub default_error: String,
    pub option_label: String,
    pub other_label: String,
    pub description_placeholder: String,
    pub default_mask: String,
    pub untitled_form: String,
    pub form_description: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "field required".into(),
            default_error: "An error occurred in this field".into(),
            option_label: "Option".into(),
            other_label: "Other".into(),
            description_placeholder: "Add a description".into(),
            default_mask: "999".into(),
            untitled_form: "Untitled form".into(),
            form_description: "Form description".into(),
        }
    }
}

/// Settings shared by the editors and the validation compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    pub other_policy: OtherPolicy,
    pub messages: Messages,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FormConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
