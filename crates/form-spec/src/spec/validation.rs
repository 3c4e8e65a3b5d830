use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Messages;

/// Shape constraint selector (`type` in the document form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Number,
    Text,
    Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NumberMethod {
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Equal,
    NotEqual,
    IsNumber,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TextMethod {
    Contains,
    NoContains,
    Email,
    Url,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LengthMethod {
    Max,
    Min,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberRule {
    pub method: NumberMethod,
    pub value: f64,
    #[serde(default)]
    pub error_message: String,
}

/// `message` is the configured substring for `contains`/`nocontains`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextRule {
    pub method: TextMethod,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LengthRule {
    pub method: LengthMethod,
    pub value: f64,
    #[serde(default)]
    pub error_message: String,
}

/// The shape constraint of a field, one variant per rule kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValidationRule {
    /// Required-only; no shape constraint.
    #[default]
    None,
    Number(NumberRule),
    Text(TextRule),
    Length(LengthRule),
    /// A kind was declared without its sub-rule.
    MissingSubRule(RuleKind),
}

impl ValidationRule {
    /// Sub-rule an editor installs when the author switches to `kind`.
    pub fn defaults_for(kind: RuleKind, messages: &Messages) -> Self {
        let error_message = messages.default_error.clone();
        match kind {
            RuleKind::Text => ValidationRule::Text(TextRule {
                method: TextMethod::Contains,
                message: String::new(),
                error_message,
            }),
            RuleKind::Number => ValidationRule::Number(NumberRule {
                method: NumberMethod::GreaterThan,
                value: 10.0,
                error_message,
            }),
            RuleKind::Length => ValidationRule::Length(LengthRule {
                method: LengthMethod::Max,
                value: 10.0,
                error_message,
            }),
        }
    }

    pub fn kind(&self) -> Option<RuleKind> {
        match self {
            ValidationRule::None => None,
            ValidationRule::Number(_) => Some(RuleKind::Number),
            ValidationRule::Text(_) => Some(RuleKind::Text),
            ValidationRule::Length(_) => Some(RuleKind::Length),
            ValidationRule::MissingSubRule(kind) => Some(*kind),
        }
    }
}

/// Declarative rule attached to a question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ValidationDocument", into = "ValidationDocument")]
pub struct ValidationSpec {
    pub is_required: bool,
    pub rule: ValidationRule,
}

impl ValidationSpec {
    pub fn required() -> Self {
        Self {
            is_required: true,
            rule: ValidationRule::None,
        }
    }

    pub fn new(is_required: bool, rule: ValidationRule) -> Self {
        Self { is_required, rule }
    }

    pub fn kind(&self) -> Option<RuleKind> {
        self.rule.kind()
    }

    pub fn has_number_rule(&self) -> bool {
        matches!(self.rule, ValidationRule::Number(_))
    }
}

/// Flat document form of [`ValidationSpec`]: `{isRequired, type, number|text|length}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDocument {
    #[serde(default)]
    pub is_required: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RuleKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<NumberRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<LengthRule>,
}

impl From<ValidationDocument> for ValidationSpec {
    fn from(document: ValidationDocument) -> Self {
        // Only the sub-rule named by `type` is kept.
        let rule = match document.kind {
            None => ValidationRule::None,
            Some(RuleKind::Number) => document
                .number
                .map(ValidationRule::Number)
                .unwrap_or(ValidationRule::MissingSubRule(RuleKind::Number)),
            Some(RuleKind::Text) => document
                .text
                .map(ValidationRule::Text)
                .unwrap_or(ValidationRule::MissingSubRule(RuleKind::Text)),
            Some(RuleKind::Length) => document
                .length
                .map(ValidationRule::Length)
                .unwrap_or(ValidationRule::MissingSubRule(RuleKind::Length)),
        };
        ValidationSpec {
            is_required: document.is_required,
            rule,
        }
    }
}

impl From<ValidationSpec> for ValidationDocument {
    fn from(spec: ValidationSpec) -> Self {
        let mut document = ValidationDocument {
            is_required: spec.is_required,
            kind: spec.rule.kind(),
            ..Default::default()
        };
        match spec.rule {
            ValidationRule::Number(rule) => document.number = Some(rule),
            ValidationRule::Text(rule) => document.text = Some(rule),
            ValidationRule::Length(rule) => document.length = Some(rule),
            ValidationRule::None | ValidationRule::MissingSubRule(_) => {}
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_keeps_only_the_declared_sub_rule() {
        let spec: ValidationSpec = serde_json::from_value(json!({
            "isRequired": true,
            "type": "length",
            "number": { "method": "equal", "value": 3, "errorMessage": "n" },
            "length": { "method": "min", "value": 2, "errorMessage": "short" }
        }))
        .expect("deserialize");
        assert!(spec.is_required);
        assert_eq!(
            spec.rule,
            ValidationRule::Length(LengthRule {
                method: LengthMethod::Min,
                value: 2.0,
                error_message: "short".into(),
            })
        );
        let back = serde_json::to_value(&spec).expect("serialize");
        assert!(back.get("number").is_none());
    }

    #[test]
    fn declared_kind_without_sub_rule_is_kept_as_missing() {
        let spec: ValidationSpec =
            serde_json::from_value(json!({ "type": "number" })).expect("deserialize");
        assert!(!spec.is_required);
        assert_eq!(spec.rule, ValidationRule::MissingSubRule(RuleKind::Number));
        assert_eq!(spec.kind(), Some(RuleKind::Number));
    }

    #[test]
    fn unknown_methods_deserialize_to_unrecognized() {
        let rule: NumberRule = serde_json::from_value(json!({
            "method": "is_integer",
            "value": 0,
            "errorMessage": "x"
        }))
        .expect("deserialize");
        assert_eq!(rule.method, NumberMethod::Unrecognized);
        let text: TextRule =
            serde_json::from_value(json!({ "method": "nocontains", "message": "spam" }))
                .expect("deserialize");
        assert_eq!(text.method, TextMethod::NoContains);
        assert!(text.error_message.is_empty());
    }
}
