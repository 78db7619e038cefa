//! Runtime and package arguments, and the input declarations they share
//! with environment variables and headers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A user-supplied or fixed input value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    /// Human-readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fixed value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Value used when the user supplies none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether the user must supply a value.
    pub is_required: bool,
    /// Whether the value is sensitive.
    pub is_secret: bool,
    /// Identifier hint for the value, used by positional arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_hint: Option<String>,
    /// Value format such as `string`, `number`, `boolean` or `filepath`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Allowed values.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

/// A named input such as an environment variable or header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueInput {
    /// Variable or header name.
    #[serde(default)]
    pub name: String,
    /// Input declaration.
    #[serde(flatten)]
    pub input: Input,
}

impl KeyValueInput {
    /// Declares a named input with no further settings.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: Input::default(),
        }
    }
}

/// Kind of command-line argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArgumentType {
    /// A `--flag value` style argument.
    Named,
    /// A bare value.
    Positional,
    /// Any other value, including an absent one.
    Unsupported(String),
}

impl ArgumentType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named => "named",
            Self::Positional => "positional",
            Self::Unsupported(raw) => raw,
        }
    }
}

impl Default for ArgumentType {
    fn default() -> Self {
        Self::Unsupported(String::new())
    }
}

impl From<String> for ArgumentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "named" => Self::Named,
            "positional" => Self::Positional,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<ArgumentType> for String {
    fn from(value: ArgumentType) -> Self {
        match value {
            ArgumentType::Unsupported(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A command-line argument passed to the server runtime or package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    /// Argument kind.
    #[serde(rename = "type", default)]
    pub kind: ArgumentType,
    /// Flag name for named arguments, free-form label for positional ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Input declaration.
    #[serde(flatten)]
    pub input: Input,
    /// Declarations for `{placeholder}` names used in the value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, Input>,
    /// Whether the argument may be given more than once.
    #[serde(default)]
    pub is_repeated: bool,
}

impl Argument {
    /// Creates a named argument.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: ArgumentType::Named,
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Creates a positional argument with a value hint.
    #[must_use]
    pub fn positional(value_hint: impl Into<String>) -> Self {
        Self {
            kind: ArgumentType::Positional,
            input: Input {
                value_hint: Some(value_hint.into()),
                ..Input::default()
            },
            ..Self::default()
        }
    }

    /// Sets the fixed value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.input.value = Some(value.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.input.default = Some(default.into());
        self
    }
}
