use std::collections::BTreeSet;

use tracing::debug;

use crate::config::{FormConfig, Messages};
use crate::editor::{EditError, choices};
use crate::ids::IdSource;
use crate::spec::choice::Choice;
use crate::spec::question::{Question, QuestionType};
use crate::spec::validation::{RuleKind, ValidationRule, ValidationSpec};

/// Single-field replacement accepted by [`update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionField {
    Text(Option<String>),
    Description(Option<String>),
    Mask(Option<String>),
}

/// An empty `short` question with one default option.
pub fn blank_question(ids: &mut dyn IdSource, messages: &Messages) -> Question {
    let id = ids.next_id();
    let choice = Choice::option(ids.next_id(), choices::option_label(messages, 1));
    Question {
        id,
        kind: QuestionType::Short,
        question_text: None,
        question_description: None,
        mask: None,
        validation: None,
        multiple_choices: vec![choice],
    }
}

fn modify<F>(questions: &[Question], id: &str, change: F) -> Vec<Question>
where
    F: FnOnce(&mut Question),
{
    let mut next = questions.to_vec();
    match next.iter_mut().find(|question| question.id == id) {
        Some(question) => change(question),
        None => debug!(question_id = id, "edit of unknown question ignored"),
    }
    next
}

pub fn create(questions: &[Question], ids: &mut dyn IdSource, messages: &Messages) -> Vec<Question> {
    let mut next = questions.to_vec();
    next.push(blank_question(ids, messages));
    next
}

/// Appends a copy of the question under a fresh id.
///
/// Text, type, validation, choices and description are copied; the mask is
/// not.
pub fn duplicate(questions: &[Question], id: &str, ids: &mut dyn IdSource) -> Vec<Question> {
    let Some(source) = questions.iter().find(|question| question.id == id) else {
        debug!(question_id = id, "duplicate of unknown question ignored");
        return questions.to_vec();
    };

    let copy = Question {
        id: ids.next_id(),
        kind: source.kind,
        question_text: source.question_text.clone(),
        question_description: source.question_description.clone(),
        mask: None,
        validation: source.validation.clone(),
        multiple_choices: source.multiple_choices.clone(),
    };

    let mut next = questions.to_vec();
    next.push(copy);
    next
}

pub fn remove(questions: &[Question], id: &str) -> Vec<Question> {
    questions
        .iter()
        .filter(|question| question.id != id)
        .cloned()
        .collect()
}

pub fn update(questions: &[Question], id: &str, field: QuestionField) -> Vec<Question> {
    modify(questions, id, |question| match field {
        QuestionField::Text(text) => question.question_text = text,
        QuestionField::Description(description) => question.question_description = description,
        QuestionField::Mask(mask) => question.mask = mask,
    })
}

/// Changes the answer type. Switching to multiple choice, or to long while a
/// number rule is attached, drops the validation in the same step.
pub fn set_type(questions: &[Question], id: &str, kind: QuestionType) -> Vec<Question> {
    modify(questions, id, |question| {
        let clears_validation = match kind {
            QuestionType::MultipleChoice => true,
            QuestionType::Long => question.has_number_rule(),
            QuestionType::Short => false,
        };
        if clears_validation {
            question.validation = None;
        }
        question.kind = kind;
    })
}

pub fn set_validation(
    questions: &[Question],
    id: &str,
    validation: Option<ValidationSpec>,
) -> Vec<Question> {
    modify(questions, id, |question| question.validation = validation)
}

/// Toggles `isRequired`, keeping any rule already attached.
pub fn set_required(questions: &[Question], id: &str, required: bool) -> Vec<Question> {
    modify(questions, id, |question| match question.validation.as_mut() {
        Some(validation) => validation.is_required = required,
        None => question.validation = Some(ValidationSpec::new(required, ValidationRule::None)),
    })
}

/// Switches the rule kind, installing that kind's default sub-rule.
pub fn set_rule_kind(
    questions: &[Question],
    id: &str,
    kind: Option<RuleKind>,
    messages: &Messages,
) -> Vec<Question> {
    modify(questions, id, |question| {
        let is_required = question.is_required();
        let rule = kind
            .map(|kind| ValidationRule::defaults_for(kind, messages))
            .unwrap_or_default();
        question.validation = Some(ValidationSpec::new(is_required, rule));
    })
}

/// Shows the description with placeholder text unless one is already shown.
pub fn add_description(questions: &[Question], id: &str, messages: &Messages) -> Vec<Question> {
    modify(questions, id, |question| {
        if question.question_description.is_none() {
            question.question_description = Some(messages.description_placeholder.clone());
        }
    })
}

/// Attaches the default mask to a `short` question that has none.
pub fn add_mask(questions: &[Question], id: &str, messages: &Messages) -> Vec<Question> {
    modify(questions, id, |question| {
        if question.kind == QuestionType::Short && question.mask.is_none() {
            question.mask = Some(messages.default_mask.clone());
        }
    })
}

/// Takes the order supplied by the caller as the new question list.
pub fn reorder(_questions: &[Question], new_order: Vec<Question>) -> Vec<Question> {
    new_order
}

/// Re-sequences questions by id.
///
/// `order` must name every current question exactly once; anything else
/// (a repeated, unknown or missing id) leaves the list unchanged.
pub fn reorder_by_ids(questions: &[Question], order: &[String]) -> Vec<Question> {
    let current: BTreeSet<&str> = questions.iter().map(|question| question.id.as_str()).collect();
    let requested: BTreeSet<&str> = order.iter().map(String::as_str).collect();
    if order.len() != questions.len() || requested.len() != order.len() || requested != current {
        debug!(?order, "question reorder that is not a permutation ignored");
        return questions.to_vec();
    }

    let new_order = order
        .iter()
        .filter_map(|id| questions.iter().find(|question| &question.id == id))
        .cloned()
        .collect();
    reorder(questions, new_order)
}

pub fn add_choice(
    questions: &[Question],
    id: &str,
    is_other: bool,
    ids: &mut dyn IdSource,
    config: &FormConfig,
) -> Result<Vec<Question>, EditError> {
    let Some(question) = questions.iter().find(|question| question.id == id) else {
        debug!(question_id = id, "choice added to unknown question ignored");
        return Ok(questions.to_vec());
    };
    let next_choices = choices::add(&question.multiple_choices, is_other, ids, config)?;
    Ok(modify(questions, id, |question| {
        question.multiple_choices = next_choices
    }))
}

pub fn rename_choice(
    questions: &[Question],
    id: &str,
    choice_id: &str,
    value: &str,
) -> Vec<Question> {
    modify(questions, id, |question| {
        question.multiple_choices = choices::rename(&question.multiple_choices, choice_id, value)
    })
}

pub fn remove_choice(questions: &[Question], id: &str, choice_id: &str) -> Vec<Question> {
    modify(questions, id, |question| {
        question.multiple_choices = choices::remove(&question.multiple_choices, choice_id)
    })
}

pub fn reorder_choices(questions: &[Question], id: &str, order: &[String]) -> Vec<Question> {
    modify(questions, id, |question| {
        question.multiple_choices = choices::reorder(&question.multiple_choices, order)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::spec::validation::{NumberMethod, NumberRule};

    fn numbered(id: &str) -> Question {
        let mut question = blank_question(&mut SequentialIds::new(id), &Messages::default());
        question.id = id.to_string();
        question.question_text = Some(format!("Question {id}"));
        question.validation = Some(ValidationSpec::new(
            true,
            ValidationRule::Number(NumberRule {
                method: NumberMethod::GreaterThan,
                value: 10.0,
                error_message: "too small".into(),
            }),
        ));
        question
    }

    #[test]
    fn blank_question_has_one_default_option() {
        let question = blank_question(&mut SequentialIds::new("x"), &Messages::default());
        assert_eq!(question.id, "x-1");
        assert_eq!(question.kind, QuestionType::Short);
        assert_eq!(question.multiple_choices.len(), 1);
        assert_eq!(question.multiple_choices[0].value, "Option 01");
        assert!(question.validation.is_none());
    }

    #[test]
    fn set_type_to_long_drops_number_rule_only() {
        let questions = vec![numbered("q")];
        let long = set_type(&questions, "q", QuestionType::Long);
        assert_eq!(long[0].kind, QuestionType::Long);
        assert!(long[0].validation.is_none());

        let required_only = set_validation(&questions, "q", Some(ValidationSpec::required()));
        let long = set_type(&required_only, "q", QuestionType::Long);
        assert_eq!(long[0].validation, Some(ValidationSpec::required()));
    }

    #[test]
    fn set_type_to_multiple_choice_always_clears() {
        let questions = set_validation(&[numbered("q")], "q", Some(ValidationSpec::required()));
        let choice = set_type(&questions, "q", QuestionType::MultipleChoice);
        assert_eq!(choice[0].kind, QuestionType::MultipleChoice);
        assert!(choice[0].validation.is_none());
    }

    #[test]
    fn set_required_preserves_rule() {
        let questions = vec![numbered("q")];
        let optional = set_required(&questions, "q", false);
        let validation = optional[0].validation.as_ref().expect("validation");
        assert!(!validation.is_required);
        assert_eq!(validation.kind(), Some(RuleKind::Number));

        let bare = set_validation(&questions, "q", None);
        let required = set_required(&bare, "q", true);
        assert_eq!(required[0].validation, Some(ValidationSpec::required()));
    }

    #[test]
    fn set_rule_kind_installs_defaults_and_keeps_required() {
        let messages = Messages::default();
        let questions = set_rule_kind(&[numbered("q")], "q", Some(RuleKind::Length), &messages);
        let validation = questions[0].validation.as_ref().expect("validation");
        assert!(validation.is_required);
        assert_eq!(
            validation.rule,
            ValidationRule::defaults_for(RuleKind::Length, &messages)
        );
    }

    #[test]
    fn add_description_and_mask_do_not_overwrite() {
        let messages = Messages::default();
        let questions = update(&[numbered("q")], "q", QuestionField::Description(Some(String::new())));
        let described = add_description(&questions, "q", &messages);
        assert_eq!(described[0].question_description.as_deref(), Some(""));

        let masked = add_mask(&questions, "q", &messages);
        assert_eq!(masked[0].mask.as_deref(), Some("999"));
        let custom = update(&masked, "q", QuestionField::Mask(Some("99/99".into())));
        assert_eq!(add_mask(&custom, "q", &messages)[0].mask.as_deref(), Some("99/99"));

        let long = set_type(&questions, "q", QuestionType::Long);
        assert!(add_mask(&long, "q", &messages)[0].mask.is_none());
    }

    #[test]
    fn stale_ids_leave_the_list_unchanged() {
        let questions = vec![numbered("a"), numbered("b")];
        let mut ids = SequentialIds::new("n");
        assert_eq!(update(&questions, "zz", QuestionField::Text(None)), questions);
        assert_eq!(duplicate(&questions, "zz", &mut ids), questions);
        assert_eq!(remove(&questions, "zz"), questions);
        assert_eq!(set_type(&questions, "zz", QuestionType::Long), questions);
        assert_eq!(
            add_choice(&questions, "zz", false, &mut ids, &FormConfig::default()),
            Ok(questions.clone())
        );
    }

    #[test]
    fn reorder_by_ids_follows_supplied_order() {
        let questions = vec![numbered("a"), numbered("b"), numbered("c")];
        let order = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let reordered = reorder_by_ids(&questions, &order);
        let ids: Vec<&str> = reordered.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
