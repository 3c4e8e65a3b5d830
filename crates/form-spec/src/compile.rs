use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::Messages;
use crate::spec::validation::{
    LengthMethod, LengthRule, NumberMethod, NumberRule, TextMethod, TextRule, ValidationRule,
    ValidationSpec,
};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("email pattern is valid")
});

/// Value produced by a successful validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedValue {
    Missing,
    Text(String),
    Number(f64),
}

impl ParsedValue {
    fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(text) => ParsedValue::Text(text.to_string()),
            None => ParsedValue::Missing,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParsedValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParsedValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Equal,
    NotEqual,
}

impl Comparison {
    /// NaN operands fail every comparison except `NotEqual`.
    fn holds(self, operand: f64, threshold: f64) -> bool {
        match self {
            Comparison::Greater => operand > threshold,
            Comparison::GreaterOrEqual => operand >= threshold,
            Comparison::Less => operand < threshold,
            Comparison::LessOrEqual => operand <= threshold,
            Comparison::Equal => operand == threshold,
            Comparison::NotEqual => operand != threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Check {
    /// No rule at all: the raw value is returned untouched.
    Passthrough,
    /// String without a shape constraint.
    Bare,
    Compare {
        comparison: Comparison,
        threshold: f64,
        error: String,
    },
    IsNumber {
        error: String,
    },
    Contains {
        needle: String,
        error: String,
    },
    Excludes {
        needle: String,
        error: String,
    },
    Email {
        error: String,
    },
    Url {
        error: String,
    },
    /// Limits count characters (Unicode scalar values), so an emoji is one.
    MaxLength {
        limit: f64,
        error: String,
    },
    /// Counts characters like [`Check::MaxLength`].
    MinLength {
        limit: f64,
        error: String,
    },
}

impl Check {
    fn run(&self, raw: &str) -> Result<ParsedValue, String> {
        let text = || ParsedValue::Text(raw.to_string());
        let verdict = |ok: bool, error: &String| if ok { Ok(text()) } else { Err(error.clone()) };
        match self {
            Check::Passthrough | Check::Bare => Ok(text()),
            Check::Compare {
                comparison,
                threshold,
                error,
            } => {
                let operand = parse_float(raw);
                if comparison.holds(operand, *threshold) {
                    Ok(ParsedValue::Number(operand))
                } else {
                    Err(error.clone())
                }
            }
            Check::IsNumber { error } => {
                let operand = parse_float(raw);
                if operand.is_nan() {
                    Err(error.clone())
                } else {
                    Ok(ParsedValue::Number(operand))
                }
            }
            // An empty configured substring never passes.
            Check::Contains { needle, error } => {
                verdict(!needle.is_empty() && raw.contains(needle.as_str()), error)
            }
            Check::Excludes { needle, error } => {
                verdict(!needle.is_empty() && !raw.contains(needle.as_str()), error)
            }
            Check::Email { error } => verdict(is_email(raw), error),
            Check::Url { error } => verdict(Url::parse(raw).is_ok(), error),
            Check::MaxLength { limit, error } => verdict(char_len(raw) <= *limit, error),
            Check::MinLength { limit, error } => verdict(char_len(raw) >= *limit, error),
        }
    }
}

/// Per-field validator compiled from a [`ValidationSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validator {
    required: Option<String>,
    check: Check,
}

impl Validator {
    /// Always succeeds and hands back the raw value.
    pub fn passthrough() -> Self {
        Self {
            required: None,
            check: Check::Passthrough,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Validates one raw input.
    ///
    /// Required fields report the required message for absent or blank input
    /// before any shape rule runs. Optional fields short-circuit to success on
    /// absent or empty input without running the shape rule.
    pub fn validate(&self, raw: Option<&str>) -> Result<ParsedValue, String> {
        match (&self.required, raw) {
            (Some(message), None) => Err(message.clone()),
            (Some(message), Some(text)) if text.trim().is_empty() => Err(message.clone()),
            (None, None) => Ok(ParsedValue::Missing),
            (None, Some("")) => Ok(ParsedValue::from_raw(raw)),
            (_, Some(text)) => self.check.run(text),
        }
    }
}

/// Compiles a declarative rule into a [`Validator`]. Never fails: malformed
/// or unrecognized rules degrade to a bare string check.
pub fn compile(spec: Option<&ValidationSpec>, messages: &Messages) -> Validator {
    let Some(spec) = spec else {
        return Validator::passthrough();
    };

    let check = match &spec.rule {
        ValidationRule::None => Check::Bare,
        ValidationRule::Number(rule) => number_check(rule),
        ValidationRule::Text(rule) => text_check(rule),
        ValidationRule::Length(rule) => length_check(rule),
        ValidationRule::MissingSubRule(kind) => {
            debug!(?kind, "validation type declared without its rule; using bare check");
            Check::Bare
        }
    };

    Validator {
        required: spec.is_required.then(|| messages.required.clone()),
        check,
    }
}

fn number_check(rule: &NumberRule) -> Check {
    let comparison = match rule.method {
        NumberMethod::GreaterThan => Comparison::Greater,
        NumberMethod::GreaterThanOrEqual => Comparison::GreaterOrEqual,
        NumberMethod::LessThan => Comparison::Less,
        NumberMethod::LessThanOrEqual => Comparison::LessOrEqual,
        NumberMethod::Equal => Comparison::Equal,
        NumberMethod::NotEqual => Comparison::NotEqual,
        NumberMethod::IsNumber => {
            return Check::IsNumber {
                error: rule.error_message.clone(),
            };
        }
        NumberMethod::Unrecognized => {
            debug!("unrecognized number method; using bare check");
            return Check::Bare;
        }
    };
    Check::Compare {
        comparison,
        threshold: rule.value,
        error: rule.error_message.clone(),
    }
}

fn text_check(rule: &TextRule) -> Check {
    let error = rule.error_message.clone();
    match rule.method {
        TextMethod::Contains => Check::Contains {
            needle: rule.message.clone(),
            error,
        },
        TextMethod::NoContains => Check::Excludes {
            needle: rule.message.clone(),
            error,
        },
        TextMethod::Email => Check::Email { error },
        TextMethod::Url => Check::Url { error },
        TextMethod::Unrecognized => {
            debug!("unrecognized text method; using bare check");
            Check::Bare
        }
    }
}

fn length_check(rule: &LengthRule) -> Check {
    let error = rule.error_message.clone();
    match rule.method {
        LengthMethod::Max => Check::MaxLength {
            limit: rule.value,
            error,
        },
        LengthMethod::Min => Check::MinLength {
            limit: rule.value,
            error,
        },
        LengthMethod::Unrecognized => {
            debug!("unrecognized length method; using bare check");
            Check::Bare
        }
    }
}

fn char_len(raw: &str) -> f64 {
    raw.chars().count() as f64
}

fn is_email(raw: &str) -> bool {
    !raw.starts_with('.') && !raw.contains("..") && EMAIL.is_match(raw)
}

/// Parses the longest leading decimal literal of `raw`, NaN when there is none.
///
/// Leading whitespace is ignored and trailing garbage is dropped, so `"12abc"`
/// yields `12.0` and `"abc"` yields NaN.
pub fn parse_float(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if trimmed[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits + frac_digits > 0 {
            end = frac_end;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_float_takes_leading_literal() {
        assert_eq!(parse_float("42"), 42.0);
        assert_eq!(parse_float("  -3.5kg"), -3.5);
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("7."), 7.0);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("+8"), 8.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn parse_float_rejects_non_numeric() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("e5").is_nan());
    }

    #[test]
    fn nan_only_satisfies_not_equal() {
        let nan = f64::NAN;
        assert!(!Comparison::Greater.holds(nan, 10.0));
        assert!(!Comparison::LessOrEqual.holds(nan, 10.0));
        assert!(!Comparison::Equal.holds(nan, 10.0));
        assert!(Comparison::NotEqual.holds(nan, 10.0));
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("ana.souza+forms@example.com.br"));
        assert!(!is_email(".ana@example.com"));
        assert!(!is_email("ana..souza@example.com"));
        assert!(!is_email("ana@example"));
        assert!(!is_email("ana.@example.com"));
    }
}
