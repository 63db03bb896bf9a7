//! Turns command-line assignments and value files into property values.

use crate::models::args::ValueArgs;
use anyhow::{Context, Result, bail};
use pmark::schema::Value;
use std::path::Path;

/// Reads `--values` first, then applies every `--set` in order. Later entries win.
///
/// # Errors
/// Returns an error for an unreadable or non-object values file, an assignment
/// without `=`, or a JSON value the schema cannot represent.
pub fn collect_values(args: &ValueArgs) -> Result<Vec<(String, Value)>> {
    let mut values = match &args.values {
        Some(path) => read_values_file(path)?,
        None => Vec::new(),
    };

    for assignment in &args.assignments {
        let (name, value) = parse_assignment(assignment)?;
        match values.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => values.push((name, value)),
        }
    }

    Ok(values)
}

/// Parses `name=value`. The value is read as JSON; anything that is not valid JSON is
/// taken as a plain string, so `text=Hello` and `text="Hello"` are equivalent.
pub fn parse_assignment(assignment: &str) -> Result<(String, Value)> {
    let Some((name, raw)) = assignment.split_once('=') else {
        bail!("Expected NAME=VALUE, got '{assignment}'");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing property name in '{assignment}'");
    }

    let json =
        serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()));
    let value = Value::try_from(json).with_context(|| format!("Invalid value for '{name}'"))?;
    Ok((name.to_owned(), value))
}

fn read_values_file(path: &Path) -> Result<Vec<(String, Value)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Reading values file {}", path.display()))?;
    let serde_json::Value::Object(object) = serde_json::from_str(&content)
        .with_context(|| format!("Parsing values file {}", path.display()))?
    else {
        bail!("Values file {} must contain a JSON object", path.display());
    };

    object
        .into_iter()
        .map(|(name, json)| {
            let value =
                Value::try_from(json).with_context(|| format!("Invalid value for '{name}'"))?;
            Ok((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn assignments_parse_json_or_fall_back_to_strings() {
        assert_eq!(parse_assignment("x=1").unwrap(), ("x".to_owned(), Value::Int(1)));
        assert_eq!(parse_assignment("x_offset=-2.5").unwrap().1, Value::Float(-2.5));
        assert_eq!(parse_assignment("visible=false").unwrap().1, Value::Bool(false));
        assert_eq!(parse_assignment("text_color=null").unwrap().1, Value::Null);
        assert_eq!(parse_assignment("text=Hello world").unwrap().1, Value::from("Hello world"));
        assert_eq!(parse_assignment("text=\"quoted\"").unwrap().1, Value::from("quoted"));
        assert_eq!(parse_assignment("text=a=b").unwrap().1, Value::from("a=b"));
    }

    #[test]
    fn malformed_assignments_are_rejected() {
        assert!(parse_assignment("no-separator").is_err());
        assert!(parse_assignment("=1").is_err());
        assert!(parse_assignment("x={\"a\":1}").is_err());
    }

    #[test]
    fn set_overrides_values_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"x": 1, "y": 2, "text": "from file"}}"#).unwrap();

        let args = ValueArgs {
            assignments: vec!["text=from flag".to_owned(), "y_offset=3".to_owned()],
            values: Some(file.path().to_path_buf()),
        };
        let values = collect_values(&args).unwrap();

        let lookup = |name: &str| values.iter().find(|(n, _)| n == name).map(|(_, v)| v.clone());
        assert_eq!(lookup("text"), Some(Value::from("from flag")));
        assert_eq!(lookup("x"), Some(Value::Int(1)));
        assert_eq!(lookup("y_offset"), Some(Value::Int(3)));
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn values_file_must_hold_an_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        let args = ValueArgs { assignments: Vec::new(), values: Some(file.path().to_path_buf()) };
        assert!(collect_values(&args).is_err());
    }
}
