// ============================================================
// Layer 5 — Follow-up Selector
// ============================================================
// After a question is answered, the assistant offers two or
// three related topics and remembers what was just discussed.
//
//   fees     → Scholarships · Hostel Fees · Admission Process
//   hostel   → Hostel Fees · Safety Measures · Mess Facilities
//
// record_topic is the only function that changes a
// ConversationState.

use std::collections::HashMap;

use crate::domain::state::ConversationState;
use crate::domain::topic::{TopicCode, TopicSuggestion};

pub const FOLLOWUP_PROMPT: &str = "💡 You might also want to know:";

/// Static topic → related-topics table.
#[derive(Debug, Clone)]
pub struct FollowupSelector {
    groups: HashMap<TopicCode, Vec<TopicSuggestion>>,
}

impl FollowupSelector {
    pub fn new() -> Self {
        let mut groups = HashMap::new();

        groups.insert(
            TopicCode::new("admission_process"),
            vec![
                TopicSuggestion::new("🎓 Eligibility Criteria", "eligibility"),
                TopicSuggestion::new("💰 Fee Structure",        "fees"),
                TopicSuggestion::new("📞 Contact Admissions",   "contact"),
            ],
        );
        groups.insert(
            TopicCode::new("fees"),
            vec![
                TopicSuggestion::new("🎓 Scholarships",      "scholarship"),
                TopicSuggestion::new("🏠 Hostel Fees",       "hostel"),
                TopicSuggestion::new("📘 Admission Process", "admission_process"),
            ],
        );
        groups.insert(
            TopicCode::new("hostel"),
            vec![
                TopicSuggestion::new("💰 Hostel Fees",      "fees"),
                TopicSuggestion::new("🛡️ Safety Measures",  "safety"),
                TopicSuggestion::new("🍽️ Mess Facilities",  "facilities"),
            ],
        );
        groups.insert(
            TopicCode::new("placement"),
            vec![
                TopicSuggestion::new("📚 Courses Offered", "courses"),
                TopicSuggestion::new("🎓 Eligibility",     "eligibility"),
                TopicSuggestion::new("💼 Internships",     "academic"),
            ],
        );

        Self { groups }
    }

    /// Related topics for `topic`; empty when the topic has none.
    pub fn suggestions_for(&self, topic: &TopicCode) -> &[TopicSuggestion] {
        self.groups.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Overwrite the last resolved topic. Recording the same topic
    /// twice leaves the state as recording it once.
    pub fn record_topic(&self, topic: TopicCode, mut state: ConversationState) -> ConversationState {
        tracing::debug!("Recording topic '{}'", topic);
        state.last_topic = Some(topic);
        state
    }

    /// A clarifying question about the previously recorded topic.
    pub fn contextual_hint(&self, previous: Option<&TopicCode>) -> Option<&'static str> {
        match previous?.as_str() {
            "fees" => Some("Would you also like to know about scholarships or payment options?"),
            "admission_process" => {
                Some("Do you need information about eligibility criteria or required documents?")
            }
            "hostel" => Some("Would you like to know about hostel fees or room allocation process?"),
            _ => None,
        }
    }
}

impl Default for FollowupSelector {
    fn default() -> Self {
        Self::new()
    }
}
