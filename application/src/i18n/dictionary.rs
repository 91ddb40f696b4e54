//! [`Dictionary`] definitions.

use std::{collections::HashMap, fmt};

use derive_more::{Display, Error, From};
use serde_json::{Map, Value};

/// Version of the [`Dictionary`] schema supported by this application.
pub const VERSION: u64 = 1;

/// Translation bundle of a single [`Locale`].
///
/// Nested JSON objects are flattened into dot-separated paths, so
/// `{"filters": {"guests": "Guests"}}` is resolved via `filters.guests`.
///
/// [`Locale`]: common::Locale
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    /// Translated strings by their paths.
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Parses and validates a [`Dictionary`] out of the provided JSON.
    ///
    /// # Errors
    ///
    /// Errors if the JSON:
    /// - is malformed or is not an object;
    /// - declares no or unsupported `version`;
    /// - contains anything but strings in its leaves.
    pub fn parse(json: &str) -> Result<Self, LoadError> {
        let Value::Object(mut root) = serde_json::from_str::<Value>(json)?
        else {
            return Err(LoadError::NotObject);
        };

        match root.remove("version") {
            Some(Value::Number(n)) if n.as_u64() == Some(VERSION) => {}
            Some(v) => return Err(LoadError::UnsupportedVersion(v.to_string())),
            None => return Err(LoadError::MissingVersion),
        }

        let mut entries = HashMap::new();
        flatten("", root, &mut entries)?;
        Ok(Self { entries })
    }

    /// Resolves the string at the provided `path`, falling back to the
    /// `default` one if there is none.
    #[must_use]
    pub fn resolve<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.entries.get(path).map_or(default, String::as_str)
    }

    /// [Resolves] the template at the provided `path` and substitutes its
    /// `{name}` placeholders with the provided `args`.
    ///
    /// [Resolves]: Dictionary::resolve
    #[must_use]
    pub fn format(
        &self,
        path: &str,
        default: &str,
        args: &[(&str, &dyn fmt::Display)],
    ) -> String {
        args.iter().fold(
            self.resolve(path, default).to_owned(),
            |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), &value.to_string())
            },
        )
    }
}

/// Flattens the provided JSON `object` into the `entries` prefixing their
/// paths with the `prefix`.
fn flatten(
    prefix: &str,
    object: Map<String, Value>,
    entries: &mut HashMap<String, String>,
) -> Result<(), LoadError> {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::String(s) => drop(entries.insert(path, s)),
            Value::Object(o) => flatten(&path, o, entries)?,
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Array(_) => {
                return Err(LoadError::NonStringLeaf(path));
            }
        }
    }
    Ok(())
}

/// Error of loading a [`Dictionary`].
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    /// JSON is malformed.
    #[display("malformed JSON: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// JSON root is not an object.
    #[display("root is not an object")]
    NotObject,

    /// `version` is not declared.
    #[display("`version` is missing")]
    MissingVersion,

    /// `version` differs from the supported [`VERSION`].
    #[display("unsupported `version`: {_0}")]
    UnsupportedVersion(#[error(not(source))] String),

    /// Leaf at the path is not a string.
    #[display("`{_0}` is not a string")]
    NonStringLeaf(#[error(not(source))] String),
}
