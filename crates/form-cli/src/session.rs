use serde::Serialize;
use serde_json::Value;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use form_spec::{Edit, FormConfig, FormModel, Responses};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "FORM_BUILDER_CONFIG";

pub type SessionResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn resolve_config(flag: Option<PathBuf>) -> SessionResult<FormConfig> {
    let path = flag.or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Ok(FormConfig::load(&path)?)
        }
        None => Ok(FormConfig::default()),
    }
}

pub fn load_form(path: &Path) -> SessionResult<FormModel> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn load_edits(path: &Path) -> SessionResult<Vec<Edit>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn load_responses(path: &Path) -> SessionResult<Responses> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    responses_from_value(&value)
}

/// Flattens a JSON object into raw string responses. Numbers and booleans are
/// taken as typed text; `null` counts as unanswered.
pub fn responses_from_value(value: &Value) -> SessionResult<Responses> {
    let object = value
        .as_object()
        .ok_or("responses must be a JSON object keyed by question id")?;
    let mut responses = Responses::new();
    for (id, answer) in object {
        let raw = match answer {
            Value::Null => continue,
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            other => return Err(format!("response '{}' must be a scalar, got {}", id, other).into()),
        };
        responses.insert(id.clone(), raw);
    }
    Ok(responses)
}

pub fn write_json(path: &Path, value: &impl Serialize) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    fs::write(path, contents)
}
