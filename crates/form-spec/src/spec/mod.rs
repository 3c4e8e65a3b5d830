pub mod choice;
pub mod form;
pub mod question;
pub mod validation;

pub use choice::{Choice, ChoiceKind};
pub use form::FormModel;
pub use question::{Question, QuestionType};
pub use validation::{
    LengthMethod, LengthRule, NumberMethod, NumberRule, RuleKind, TextMethod, TextRule,
    ValidationDocument, ValidationRule, ValidationSpec,
};
