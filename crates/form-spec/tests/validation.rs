use form_spec::{
    FormModel, FormValidator, Messages, ParsedValue, Question, QuestionType, Responses,
    SubmitError, ValidationSpec,
};

fn fixture() -> FormModel {
    serde_json::from_str(include_str!("../tests/fixtures/signup_form.json")).expect("deserialize")
}

fn responses(pairs: &[(&str, &str)]) -> Responses {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), value.to_string()))
        .collect()
}

fn valid_responses() -> Responses {
    responses(&[
        ("name", "Maria Souza"),
        ("cpf", "123.456.789-01"),
        ("age", "34"),
        ("gender", "Female"),
        ("email", "maria@example.com"),
    ])
}

#[test]
fn fixture_round_trips_through_json() {
    let form = fixture();
    let value = serde_json::to_value(&form).expect("serialize");
    let back: FormModel = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, form);
}

#[test]
fn incomplete_questions_are_not_validated() {
    let form = fixture();
    let validator = FormValidator::build(&form.questions, &Messages::default());
    assert!(validator.validator("draft").is_none());
    assert!(validator.validator("name").is_some());

    let result = validator.validate(&valid_responses());
    assert!(result.valid, "{:?}", result.errors);
    assert!(!result.values.contains_key("draft"));
    assert_eq!(result.values["age"], ParsedValue::Number(34.0));
}

#[test]
fn errors_are_reported_per_field() {
    let form = fixture();
    let validator = FormValidator::build(&form.questions, &Messages::default());
    let mut answers = valid_responses();
    answers.remove("name");
    answers.insert("age".into(), "16".into());
    answers.insert("email".into(), "maria".into());

    let result = validator.validate(&answers);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 3);
    assert_eq!(result.errors["name"], "field required");
    assert_eq!(result.errors["age"], "Adults only");
    assert_eq!(result.errors["email"], "Please enter a valid e-mail");
    assert!(result.values.contains_key("cpf"));
}

#[test]
fn optional_number_may_be_left_empty() {
    let form = fixture();
    let validator = FormValidator::build(&form.questions, &Messages::default());
    let mut answers = valid_responses();
    answers.remove("age");
    assert!(validator.validate(&answers).valid);
}

#[test]
fn unknown_response_keys_are_ignored() {
    let form = fixture();
    let validator = FormValidator::build(&form.questions, &Messages::default());
    let mut answers = valid_responses();
    answers.insert("not-a-question".into(), "x".into());
    assert!(validator.validate(&answers).valid);
}

#[test]
fn submit_lists_answers_in_form_order() {
    let form = fixture();
    let validator = FormValidator::build(&form.questions, &Messages::default());
    let submitted = validator.submit(&valid_responses()).expect("submit");
    let texts: Vec<&str> = submitted
        .iter()
        .map(|answer| answer.question_text.as_str())
        .collect();
    assert_eq!(texts, vec!["Full name", "CPF", "Age", "Gender", "E-mail"]);
    assert_eq!(submitted[2].response, ParsedValue::Number(34.0));
}

#[test]
fn submit_rejects_invalid_responses() {
    let form = fixture();
    let validator = FormValidator::build(&form.questions, &Messages::default());
    match validator.submit(&Responses::new()) {
        Err(SubmitError::Invalid(result)) => {
            assert!(result.errors.contains_key("name"));
            assert!(!result.errors.contains_key("age"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn form_without_question_text_is_not_submittable() {
    let form = fixture();
    let drafts: Vec<Question> = form
        .questions
        .into_iter()
        .map(|mut question| {
            question.question_text = None;
            question
        })
        .collect();
    let validator = FormValidator::build(&drafts, &Messages::default());
    assert!(!validator.is_submittable());
    assert_eq!(
        validator.submit(&valid_responses()),
        Err(SubmitError::NothingToSubmit)
    );
}

#[test]
fn end_to_end_required_number_question() {
    let spec: ValidationSpec = serde_json::from_value(serde_json::json!({
        "isRequired": true,
        "type": "number",
        "number": { "method": "is_number", "value": 0, "errorMessage": "bad" }
    }))
    .expect("deserialize");
    let question = Question {
        id: "q".into(),
        kind: QuestionType::Short,
        question_text: Some("How many?".into()),
        question_description: None,
        mask: None,
        validation: Some(spec),
        multiple_choices: Vec::new(),
    };
    let validator = FormValidator::build(&[question], &Messages::default());

    let ok = validator.validate(&responses(&[("q", "42")]));
    assert!(ok.valid);
    assert_eq!(ok.values["q"], ParsedValue::Number(42.0));

    let empty = validator.validate(&responses(&[("q", "")]));
    assert_eq!(empty.errors["q"], "field required");

    let garbage = validator.validate(&responses(&[("q", "abc")]));
    assert_eq!(garbage.errors["q"], "bad");
}
