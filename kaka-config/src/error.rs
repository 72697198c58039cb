//! Errors raised while loading a [`KakaConfig`](crate::KakaConfig).

use std::path::PathBuf;

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `load_from_path` was pointed at a file that does not exist.
    #[error("config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A field is outside its allowed range or format.
    #[error("invalid config:\n{}", describe(.0))]
    Validation(#[source] ValidationErrors),

    /// Limits that are valid on their own but contradict each other.
    #[error("inconsistent config: {0}")]
    Inconsistent(String),

    /// A YAML file or `KAKA_*` variable could not be read into the config.
    #[error("config could not be read: {0}")]
    Parsing(#[from] figment::Error),
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

/// One `section.field: reason` line per failed check, sorted by path.
fn describe(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    collect(errors, "", &mut lines);
    lines.sort();
    lines.join("\n")
}

fn collect(errors: &ValidationErrors, prefix: &str, lines: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    let mut line = format!("  {path}: ");
                    match &failure.message {
                        Some(message) => line.push_str(message),
                        None => line.push_str(&failure.code),
                    }
                    lines.push(line);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, lines),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{path}[{index}]"), lines);
                }
            }
        }
    }
}
