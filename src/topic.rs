//! The user's seminar topic.

use crate::error::{Result, SeminarError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, whitespace-trimmed topic.
///
/// Topics are used verbatim as cache keys, so "Rust" and "rust" are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic(String);

impl Topic {
    /// Trim the raw input and reject it if nothing is left.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SeminarError::InvalidInput(
                "Please enter or say a topic.".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Topic with spaces replaced by underscores, used for file names.
    pub fn slug(&self) -> String {
        self.0.replace(' ', "_")
    }

    /// Upper-case the first letter of every alphabetic run, lower-case the rest.
    pub fn title_case(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut prev_alpha = false;
        for c in self.0.chars() {
            if c.is_alphabetic() {
                if prev_alpha {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                prev_alpha = true;
            } else {
                out.push(c);
                prev_alpha = false;
            }
        }
        out
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Topic {
    type Err = SeminarError;

    fn from_str(s: &str) -> Result<Self> {
        Topic::new(s)
    }
}

impl TryFrom<String> for Topic {
    type Error = SeminarError;

    fn try_from(value: String) -> Result<Self> {
        Topic::new(value)
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.0
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
