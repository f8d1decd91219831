//! Flag descriptors owned by a context.

use serde::{Deserialize, Serialize};

/// A named option belonging to a context.
///
/// At least one of `short`/`long` is present. A flag with an `arg_name`
/// consumes the following token as its value; any other flag is boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Flag {
    /// Boolean flag with both names.
    pub fn switch(short: char, long: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            short: Some(short),
            long: Some(long.into()),
            arg_name: None,
            description: description.into(),
        }
    }

    /// Value-taking flag with both names.
    pub fn with_value(
        short: char,
        long: impl Into<String>,
        arg_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            short: Some(short),
            long: Some(long.into()),
            arg_name: Some(arg_name.into()),
            description: description.into(),
        }
    }

    pub fn takes_value(&self) -> bool {
        self.arg_name.is_some()
    }

    pub fn has_name(&self) -> bool {
        self.short.is_some() || self.long.as_deref().is_some_and(|l| !l.is_empty())
    }

    /// Key under which a parsed value is stored: long name, else the short character.
    pub fn key(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) if !long.is_empty() => long.clone(),
            (_, Some(short)) => short.to_string(),
            _ => String::new(),
        }
    }

    /// How the flag was spelled on a command line, for error messages.
    pub fn display_name(&self) -> String {
        match (self.short, &self.long) {
            (Some(short), _) => format!("-{}", short),
            (None, Some(long)) => format!("--{}", long),
            (None, None) => String::from("<unnamed>"),
        }
    }
}
