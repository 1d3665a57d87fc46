// ============================================================
// Layer 5 — Topic Menu
// ============================================================
// The reply given when neither the question store nor the
// keyword rules recognise the input. Pure constant data.

use serde::Serialize;

use crate::domain::topic::TopicSuggestion;

pub const MENU_INTRO:  &str = "I'd be happy to help! Here are some popular topics:";
pub const MENU_PROMPT: &str = "Choose a topic:";

/// Greeting, button prompt and the six topic buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuResponse {
    pub intro:       String,
    pub prompt:      String,
    pub suggestions: Vec<TopicSuggestion>,
}

pub fn default_response() -> MenuResponse {
    MenuResponse {
        intro:  MENU_INTRO.to_string(),
        prompt: MENU_PROMPT.to_string(),
        suggestions: vec![
            TopicSuggestion::new("📘 Admission Process",   "admission_process"),
            TopicSuggestion::new("💰 Fees & Scholarships", "fees"),
            TopicSuggestion::new("🏠 Hostel Facilities",   "hostel"),
            TopicSuggestion::new("💼 Placements",          "placement"),
            TopicSuggestion::new("🎓 Eligibility",         "eligibility"),
            TopicSuggestion::new("📞 Contact Info",        "contact"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_fixed_suggestions() {
        let menu = default_response();
        assert_eq!(menu.intro, MENU_INTRO);
        let codes: Vec<&str> = menu.suggestions.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(
            codes,
            ["admission_process", "fees", "hostel", "placement", "eligibility", "contact"]
        );
    }

    #[test]
    fn test_is_constant() {
        assert_eq!(default_response(), default_response());
    }
}
