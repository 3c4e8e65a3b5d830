#![allow(missing_docs)]

pub mod compile;
pub mod config;
pub mod edit;
pub mod editor;
pub mod ids;
pub mod mask;
pub mod render;
pub mod response;
pub mod spec;
pub mod validate;

pub use compile::{ParsedValue, Validator, compile, parse_float};
pub use config::{ConfigError, FormConfig, Messages, OtherPolicy};
pub use edit::Edit;
pub use editor::EditError;
pub use editor::questions::QuestionField;
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use render::{
    PreviewChoice, PreviewField, PreviewPayload, PreviewStatus, build_preview, masked_value,
    render_json_ui, render_text,
};
pub use response::{Selection, custom_input_active, resolve_selection, visible_rows};
pub use spec::{
    Choice, ChoiceKind, FormModel, LengthMethod, LengthRule, NumberMethod, NumberRule, Question,
    QuestionType, RuleKind, TextMethod, TextRule, ValidationDocument, ValidationRule,
    ValidationSpec,
};
pub use validate::{FormValidator, Responses, SubmitError, SubmittedAnswer, ValidationResult};
