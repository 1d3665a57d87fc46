// ============================================================
// Layer 5 — Keyword Fallback
// ============================================================
// Used when no stored question is close enough. Rules are
// checked in declaration order and the FIRST keyword found as a
// substring of the normalized text wins, so the order below is
// part of the behaviour:
//
//   admission → fees → hostel → placement → eligibility → scholarship
//
//   "hostel fees plz" → "fees" answer (fees is checked before hostel)

use crate::domain::qa_entry::KeywordRule;

/// The built-in keyword rules, in match order.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            "admission",
            "You can apply online through https://pdeu.ac.in/admissions. Complete the application form and upload required documents.",
            "admission_process",
        ),
        KeywordRule::new(
            "fees",
            "B.Tech tuition fee is ₹2,25,000 per semester. Total annual fee including hostel is approximately ₹5,50,000.",
            "fees",
        ),
        KeywordRule::new(
            "hostel",
            "PDEU provides excellent hostel facilities with AC/Non-AC rooms, WiFi, mess, laundry, and 24x7 security.",
            "hostel",
        ),
        KeywordRule::new(
            "placement",
            "PDEU has 85%+ placement rate with average package ₹6-8 LPA. Top recruiters include TCS, Infosys, Reliance, Microsoft.",
            "placement",
        ),
        KeywordRule::new(
            "eligibility",
            "Minimum 50% in 12th with PCM and valid JEE Main score or PDET score required for B.Tech admission.",
            "eligibility",
        ),
        KeywordRule::new(
            "scholarship",
            "Merit-based scholarships up to 100% fee waiver, need-based scholarships, and sports scholarships available.",
            "scholarship",
        ),
    ]
}

/// Ordered keyword → answer rules.
#[derive(Debug, Clone)]
pub struct KeywordFallback {
    rules: Vec<KeywordRule>,
}

impl KeywordFallback {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter_map(|mut r| {
                // An empty keyword would match every input
                if r.keyword.trim().is_empty() {
                    tracing::warn!("Ignoring keyword rule with an empty keyword");
                    return None;
                }
                r.keyword = r.keyword.to_lowercase();
                Some(r)
            })
            .collect();
        Self { rules }
    }

    /// First rule whose keyword occurs in `normalized`.
    pub fn find(&self, normalized: &str) -> Option<&KeywordRule> {
        self.rules.iter().find(|r| normalized.contains(r.keyword.as_str()))
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordFallback {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_declared_keyword_wins() {
        let fb = KeywordFallback::default();
        let rule = fb.find("hstel fees plz").unwrap();
        assert_eq!(rule.keyword, "fees");

        let rule = fb.find("hostel fees plz").unwrap();
        assert_eq!(rule.keyword, "fees");
        assert!(rule.answer.starts_with("B.Tech tuition fee"));
    }

    #[test]
    fn test_reversed_order_changes_winner() {
        let mut rules = default_rules();
        rules.reverse();
        let fb = KeywordFallback::new(rules);
        assert_eq!(fb.find("hostel fees plz").unwrap().keyword, "hostel");
    }

    #[test]
    fn test_substring_match() {
        let fb = KeywordFallback::default();
        assert_eq!(fb.find("placements?").unwrap().topic.as_str(), "placement");
    }

    #[test]
    fn test_no_match() {
        let fb = KeywordFallback::default();
        assert!(fb.find("where is the library").is_none());
        assert!(fb.find("").is_none());
    }

    #[test]
    fn test_empty_keyword_is_dropped() {
        let fb = KeywordFallback::new(vec![KeywordRule::new("", "always", "misc")]);
        assert!(fb.rules().is_empty());
        assert!(fb.find("anything").is_none());
    }
}
