use tracing::{debug, warn};

use crate::config::{FormConfig, Messages, OtherPolicy};
use crate::editor::EditError;
use crate::ids::IdSource;
use crate::spec::choice::Choice;

/// Label of the `n`-th regular option, 1-based: `Option 01`, `Option 02`, ...
pub fn option_label(messages: &Messages, n: usize) -> String {
    format!("{} {:02}", messages.option_label, n)
}

pub fn has_other(choices: &[Choice]) -> bool {
    choices.iter().any(Choice::is_other)
}

/// Appends a regular option, or the "Other" pseudo-option when `is_other`.
///
/// Under the permissive policy the caller is trusted to offer "Other" only
/// while none exists; the strict policy rejects a second one.
pub fn add(
    choices: &[Choice],
    is_other: bool,
    ids: &mut dyn IdSource,
    config: &FormConfig,
) -> Result<Vec<Choice>, EditError> {
    if is_other && config.other_policy == OtherPolicy::Strict && has_other(choices) {
        warn!("rejected a second \"Other\" choice");
        return Err(EditError::OtherChoiceExists);
    }

    let id = ids.next_id();
    let choice = if is_other {
        Choice::other(id, config.messages.other_label.clone())
    } else {
        Choice::option(id, option_label(&config.messages, choices.len() + 1))
    };

    let mut next = choices.to_vec();
    next.push(choice);
    Ok(next)
}

/// Replaces the label of a regular option. The "Other" label is pinned.
pub fn rename(choices: &[Choice], id: &str, value: &str) -> Vec<Choice> {
    let mut next = choices.to_vec();
    match next.iter_mut().find(|choice| choice.id == id) {
        Some(choice) if choice.is_other() => {
            debug!(choice_id = id, "ignoring rename of the \"Other\" choice");
        }
        Some(choice) => choice.value = value.to_string(),
        None => debug!(choice_id = id, "rename of unknown choice ignored"),
    }
    next
}

pub fn remove(choices: &[Choice], id: &str) -> Vec<Choice> {
    choices
        .iter()
        .filter(|choice| choice.id != id)
        .cloned()
        .collect()
}

/// Re-sequences choices to follow `order`, a list of choice values.
///
/// Choices are matched by value, first match wins, and choices whose value is
/// absent from `order` are dropped. Two choices sharing a label cannot be
/// told apart here.
pub fn reorder(choices: &[Choice], order: &[String]) -> Vec<Choice> {
    order
        .iter()
        .filter_map(|value| choices.iter().find(|choice| &choice.value == value))
        .cloned()
        .collect()
}
