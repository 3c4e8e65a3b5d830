use serde_json::{Map, Value, json};

use crate::{
    compile::ParsedValue,
    config::Messages,
    mask,
    response::{Selection, resolve_selection, visible_rows},
    spec::{
        form::FormModel,
        question::{Question, QuestionType},
    },
    validate::{FormValidator, Responses},
};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    /// No question has text; nothing can be submitted.
    Empty,
    /// Responses have not been validated yet.
    Pending,
    /// At least one field failed validation.
    Invalid,
    /// Every field passed validation.
    Ready,
}

impl PreviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewStatus::Empty => "empty",
            PreviewStatus::Pending => "pending",
            PreviewStatus::Invalid => "invalid",
            PreviewStatus::Ready => "ready",
        }
    }
}

/// One selectable row of a multiple-choice field.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewChoice {
    pub id: String,
    pub value: String,
    pub selected: bool,
}

/// Describes a single field of the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewField {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub kind: QuestionType,
    pub required: bool,
    pub input_type: &'static str,
    pub mask: Option<String>,
    pub current_value: Option<String>,
    pub rows: Vec<PreviewChoice>,
    /// Free text of the "Other" box when it is active.
    pub custom_text: Option<String>,
    pub error: Option<String>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPayload {
    pub title: String,
    pub description: String,
    pub status: PreviewStatus,
    pub fields: Vec<PreviewField>,
}

impl PreviewPayload {
    pub fn submittable(&self) -> bool {
        self.status != PreviewStatus::Empty
    }
}

/// Live value of a field after a keystroke: masked for `short` questions
/// that carry a mask, untouched otherwise.
pub fn masked_value(question: &Question, raw: &str) -> String {
    match (&question.kind, &question.mask) {
        (QuestionType::Short, Some(template)) => mask::apply(template, raw),
        _ => raw.to_string(),
    }
}

/// Build the preview payload. Errors are only reported when `responses` are
/// given, the way a preview shows them after a submit attempt.
pub fn build_preview(
    model: &FormModel,
    responses: Option<&Responses>,
    messages: &Messages,
) -> PreviewPayload {
    let validator = FormValidator::build(&model.questions, messages);
    let result = responses.map(|responses| validator.validate(responses));

    let fields = model
        .complete_questions()
        .map(|question| {
            let current_value = responses
                .and_then(|responses| responses.get(&question.id))
                .map(|raw| masked_value(question, raw));
            let error = result
                .as_ref()
                .and_then(|result| result.errors.get(&question.id).cloned());
            preview_field(question, current_value, error)
        })
        .collect();

    let status = match &result {
        _ if !validator.is_submittable() => PreviewStatus::Empty,
        None => PreviewStatus::Pending,
        Some(result) if result.valid => PreviewStatus::Ready,
        Some(_) => PreviewStatus::Invalid,
    };

    PreviewPayload {
        title: model.title.clone(),
        description: model.description.clone(),
        status,
        fields,
    }
}

fn preview_field(
    question: &Question,
    current_value: Option<String>,
    error: Option<String>,
) -> PreviewField {
    let (rows, custom_text) = if question.kind == QuestionType::MultipleChoice {
        let response = current_value.as_deref();
        let choices = &question.multiple_choices;
        let selection = resolve_selection(choices, response);
        let rows = visible_rows(choices, response)
            .into_iter()
            .map(|choice| PreviewChoice {
                id: choice.id.clone(),
                value: choice.value.clone(),
                selected: matches!(selection, Selection::Listed(listed) if listed.id == choice.id),
            })
            .collect();
        let custom_text = match selection {
            Selection::Custom(text) => Some(text.to_string()),
            _ => None,
        };
        (rows, custom_text)
    } else {
        (Vec::new(), None)
    };

    PreviewField {
        id: question.id.clone(),
        label: question.question_text.clone().unwrap_or_default(),
        description: question.question_description.clone(),
        kind: question.kind,
        required: question.is_required(),
        input_type: if question.has_number_rule() {
            "number"
        } else {
            "text"
        },
        mask: match question.kind {
            QuestionType::Short => question.mask.clone(),
            _ => None,
        },
        current_value,
        rows,
        custom_text,
        error,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &PreviewPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(field.id.clone()));
            map.insert("label".into(), Value::String(field.label.clone()));
            map.insert(
                "description".into(),
                field
                    .description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            map.insert("type".into(), Value::String(field.kind.as_str().into()));
            map.insert("required".into(), Value::Bool(field.required));
            map.insert("inputType".into(), Value::String(field.input_type.into()));
            if let Some(mask) = &field.mask {
                map.insert("mask".into(), Value::String(mask.clone()));
            }
            if let Some(value) = &field.current_value {
                map.insert("currentValue".into(), Value::String(value.clone()));
            }
            if field.kind == QuestionType::MultipleChoice {
                let rows = field
                    .rows
                    .iter()
                    .map(|row| {
                        json!({
                            "id": row.id,
                            "value": row.value,
                            "selected": row.selected,
                        })
                    })
                    .collect();
                map.insert("choices".into(), Value::Array(rows));
            }
            if let Some(custom) = &field.custom_text {
                map.insert("otherText".into(), Value::String(custom.clone()));
            }
            if let Some(error) = &field.error {
                map.insert("error".into(), Value::String(error.clone()));
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "title": payload.title,
        "description": payload.description,
        "status": payload.status.as_str(),
        "submittable": payload.submittable(),
        "fields": fields,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &PreviewPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {}", payload.title));
    if !payload.description.is_empty() {
        lines.push(payload.description.clone());
    }
    lines.push(format!("Status: {}", payload.status.as_str()));

    if !payload.submittable() {
        lines.push("Add at least one question with text to build the form.".to_string());
        return lines.join("\n");
    }

    for field in &payload.fields {
        let mut entry = format!(" - {}", field.label);
        if field.required {
            entry.push_str(" *");
        }
        if let Some(mask) = &field.mask {
            entry.push_str(&format!(" [{}]", mask));
        }
        if let Some(value) = &field.current_value {
            entry.push_str(&format!(" = {}", value));
        }
        lines.push(entry);
        if let Some(description) = &field.description {
            lines.push(format!("   {}", description));
        }
        for row in &field.rows {
            let marker = if row.selected { "(x)" } else { "( )" };
            lines.push(format!("   {} {}", marker, row.value));
        }
        if let Some(custom) = &field.custom_text {
            lines.push(format!("   (x) {}", custom));
        }
        if let Some(error) = &field.error {
            lines.push(format!("   ! {}", error));
        }
    }

    lines.join("\n")
}

/// Display form of a parsed value, used by submission listings.
pub fn value_to_display(value: &ParsedValue) -> String {
    match value {
        ParsedValue::Missing => String::new(),
        ParsedValue::Text(text) => text.clone(),
        ParsedValue::Number(number) => number.to_string(),
    }
}
