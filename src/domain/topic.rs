// ============================================================
// Layer 3 — Topic Codes and Suggestions
// ============================================================
// A topic code is the machine token for a conversation subject
// ("fees", "hostel", "admission_process"). A suggestion pairs a
// display label with the code the button sends back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable topic identifier. Always stored lowercase
/// with any leading `/` payload marker removed, including when
/// read back from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TopicCode(String);

impl TopicCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        let code = code.as_ref().trim().trim_start_matches('/');
        Self(code.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TopicCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for TopicCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<TopicCode> for String {
    fn from(code: TopicCode) -> Self {
        code.0
    }
}

impl fmt::Display for TopicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A suggestion button: what the user sees and what it sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSuggestion {
    pub label: String,
    pub code:  TopicCode,
}

impl TopicSuggestion {
    pub fn new(label: impl Into<String>, code: impl Into<TopicCode>) -> Self {
        Self {
            label: label.into(),
            code:  code.into(),
        }
    }

    /// The payload a chat framework posts back when the button is pressed
    pub fn payload(&self) -> String {
        format!("/{}", self.code)
    }
}
