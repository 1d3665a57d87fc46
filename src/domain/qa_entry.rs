// ============================================================
// Layer 3 — QaEntry Domain Type
// ============================================================
// One curated question together with its answer.
//
// Example row from the source table:
//   question: "What is the admission process"
//   answer:   "You can apply online through ..."
//   intent:   admission_process
//
// The optional topic lets a fuzzy hit drive the follow-up
// suggestions even when no external classifier is present.

use serde::{Deserialize, Serialize};

use crate::domain::topic::TopicCode;

/// A single curated question and the answer shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    /// The stored question text, never empty
    pub question: String,

    /// The answer returned when this question wins the match
    pub answer: String,

    /// Topic the question belongs to, when the source provides one
    pub topic: Option<TopicCode>,
}

impl QaEntry {
    /// Create a new entry without a topic
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer:   answer.into(),
            topic:    None,
        }
    }

    /// Attach a topic code to this entry
    pub fn with_topic(mut self, topic: impl Into<TopicCode>) -> Self {
        self.topic = Some(topic.into());
        self
    }
}

/// A keyword heuristic: if `keyword` is a substring of the
/// normalized input, `answer` is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub answer:  String,
    pub topic:   TopicCode,
}

impl KeywordRule {
    pub fn new(
        keyword: impl Into<String>,
        answer:  impl Into<String>,
        topic:   impl Into<TopicCode>,
    ) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            answer:  answer.into(),
            topic:   topic.into(),
        }
    }
}

/// A canonical spelling and the misspellings that map onto it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRule {
    pub canonical: String,
    pub variants:  Vec<String>,
}

impl CorrectionRule {
    pub fn new(canonical: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            canonical: canonical.into(),
            variants:  variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_is_lowercased() {
        let rule = KeywordRule::new("Fees", "answer", "fees");
        assert_eq!(rule.keyword, "fees");
    }

    #[test]
    fn test_with_topic() {
        let entry = QaEntry::new("q", "a").with_topic("hostel");
        assert_eq!(entry.topic.as_ref().map(|t| t.as_str()), Some("hostel"));
    }
}
