use crate::spec::choice::Choice;

/// How a multiple-choice response maps onto the question's choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    Empty,
    /// A regular option whose label equals the response.
    Listed(&'a Choice),
    /// Free text typed into the "Other" box.
    Custom(&'a str),
}

/// Resolves a response against the choices.
///
/// Labels of regular options select that option; any other non-empty text,
/// the "Other" label itself included, is custom text for the "Other" entry.
pub fn resolve_selection<'a>(choices: &'a [Choice], response: Option<&'a str>) -> Selection<'a> {
    let Some(response) = response.filter(|value| !value.is_empty()) else {
        return Selection::Empty;
    };
    choices
        .iter()
        .find(|choice| !choice.is_other() && choice.value == response)
        .map(Selection::Listed)
        .unwrap_or(Selection::Custom(response))
}

pub fn custom_input_active(choices: &[Choice], response: Option<&str>) -> bool {
    matches!(resolve_selection(choices, response), Selection::Custom(_))
}

/// Choices offered as selectable rows. While custom text is active its text
/// box stands in for the "Other" row.
pub fn visible_rows<'a>(choices: &'a [Choice], response: Option<&str>) -> Vec<&'a Choice> {
    let hide_other = custom_input_active(choices, response);
    choices
        .iter()
        .filter(|choice| !(hide_other && choice.is_other()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<Choice> {
        vec![
            Choice::option("m", "Male"),
            Choice::option("f", "Female"),
            Choice::other("o", "Other"),
        ]
    }

    #[test]
    fn listed_values_select_their_option() {
        let choices = choices();
        assert_eq!(
            resolve_selection(&choices, Some("Female")),
            Selection::Listed(&choices[1])
        );
        assert_eq!(visible_rows(&choices, Some("Female")).len(), 3);
    }

    #[test]
    fn free_text_becomes_custom_and_hides_other_row() {
        let choices = choices();
        assert_eq!(
            resolve_selection(&choices, Some("Non-binary")),
            Selection::Custom("Non-binary")
        );
        let rows: Vec<&str> = visible_rows(&choices, Some("Non-binary"))
            .iter()
            .map(|choice| choice.id.as_str())
            .collect();
        assert_eq!(rows, vec!["m", "f"]);
    }

    #[test]
    fn picking_the_other_row_opens_the_text_box() {
        let choices = choices();
        assert!(custom_input_active(&choices, Some("Other")));
    }

    #[test]
    fn empty_response_shows_every_row() {
        let choices = choices();
        assert_eq!(resolve_selection(&choices, None), Selection::Empty);
        assert_eq!(resolve_selection(&choices, Some("")), Selection::Empty);
        assert_eq!(visible_rows(&choices, None).len(), 3);
    }
}
