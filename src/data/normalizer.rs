// ============================================================
// Layer 4 — Text Normalizer (spell correction)
// ============================================================
// Cleans a raw user message before matching.
//
// Steps, per whitespace-separated token:
//   1. Lowercase the whole message
//   2. Strip non-word characters to get a comparison key
//      ("addmission?" → "addmission")
//   3. If the key is a known misspelling, replace it inside the
//      original token so punctuation survives
//      ("addmission?" → "admission?")
//   4. Rejoin tokens with single spaces
//
// Only exact variant lookups are made here. Anything fuzzier is
// the question store's job.

use anyhow::{bail, Result};
use std::collections::HashMap;

use crate::domain::qa_entry::CorrectionRule;

/// The built-in misspelling table for university FAQ terms.
pub fn default_rules() -> Vec<CorrectionRule> {
    vec![
        CorrectionRule::new("pdeu",        &["pdu", "pde", "pdeu"]),
        CorrectionRule::new("admission",   &["admision", "admissions", "addmission", "admition"]),
        CorrectionRule::new("eligibility", &["eligibilty", "eligiblity"]),
        CorrectionRule::new("scholarship", &["scholership", "scholarshp", "scholarhip"]),
        CorrectionRule::new("hostel",      &["hostl", "hostle", "hostell"]),
        CorrectionRule::new("placement",   &["placment", "placements", "placemnt"]),
        CorrectionRule::new("fees",        &["fee", "fess", "fes"]),
        CorrectionRule::new("engineering", &["engg", "enginering", "enginnering"]),
        CorrectionRule::new("university",  &["univrsity", "universty", "unversity"]),
        CorrectionRule::new("course",      &["cours", "corse", "courss"]),
        CorrectionRule::new("contact",     &["contct", "cantact", "contat"]),
    ]
}

/// Exact-lookup spell corrector. Immutable once built.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// misspelled variant → canonical term
    lookup: HashMap<String, String>,
}

impl Normalizer {
    /// Build a normalizer from correction rules.
    ///
    /// Fails when a canonical term is not lowercase, a rule has no
    /// variants, or one variant is claimed by two canonical terms.
    pub fn new(rules: &[CorrectionRule]) -> Result<Self> {
        let mut lookup: HashMap<String, String> = HashMap::new();

        for rule in rules {
            if rule.canonical.is_empty() || rule.canonical != rule.canonical.to_lowercase() {
                bail!("Canonical term '{}' must be non-empty and lowercase", rule.canonical);
            }
            if rule.variants.is_empty() {
                bail!("Canonical term '{}' has no variants", rule.canonical);
            }

            for variant in &rule.variants {
                let variant = variant.to_lowercase();
                if variant.is_empty() {
                    bail!("Canonical term '{}' has an empty variant", rule.canonical);
                }
                if let Some(owner) = lookup.get(&variant) {
                    if owner != &rule.canonical {
                        bail!(
                            "Variant '{}' is claimed by both '{}' and '{}'",
                            variant,
                            owner,
                            rule.canonical
                        );
                    }
                }
                lookup.insert(variant, rule.canonical.clone());
            }
        }

        Ok(Self { lookup })
    }

    /// Lowercase and spell-correct `text`. Empty input gives "".
    pub fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .map(|token| self.correct_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of known misspellings
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    fn correct_token(&self, token: &str) -> String {
        let key: String = token.chars().filter(|&c| is_word_char(c)).collect();

        match self.lookup.get(&key) {
            // The key is the token's word characters in order, so it can
            // occur at most once inside the token.
            Some(canonical) => token.replacen(&key, canonical, 1),
            None => token.to_string(),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(&default_rules()).unwrap()
    }

    #[test]
    fn test_corrects_known_misspelling() {
        assert_eq!(
            normalizer().normalize("what is the addmission process"),
            "what is the admission process"
        );
    }

    #[test]
    fn test_preserves_punctuation() {
        assert_eq!(normalizer().normalize("Hostl, fee?"), "hostel, fees?");
    }

    #[test]
    fn test_canonical_appears_once() {
        let out = normalizer().normalize("(scholership)");
        assert_eq!(out, "(scholarship)");
        assert_eq!(out.matches("scholarship").count(), 1);
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalizer().normalize("  hello\t  world \n"), "hello world");
    }

    #[test]
    fn test_unknown_and_partial_tokens_unchanged() {
        // "hstel" is not a listed variant; "fees" is already canonical
        assert_eq!(normalizer().normalize("hstel fees plz"), "hstel fees plz");
        // punctuation inside the word breaks the substring
        assert_eq!(normalizer().normalize("ad-mision"), "ad-mision");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(normalizer().normalize(""), "");
        assert_eq!(normalizer().normalize("   "), "");
    }

    #[test]
    fn test_rejects_overlapping_variants() {
        let rules = vec![
            CorrectionRule::new("fees", &["fes"]),
            CorrectionRule::new("festival", &["fes"]),
        ];
        assert!(Normalizer::new(&rules).is_err());
    }

    #[test]
    fn test_rejects_uppercase_canonical() {
        let rules = vec![CorrectionRule::new("PDEU", &["pdu"])];
        assert!(Normalizer::new(&rules).is_err());
    }

    #[test]
    fn test_rejects_empty_variant_set() {
        let rules = vec![CorrectionRule::new("fees", &[])];
        assert!(Normalizer::new(&rules).is_err());
    }
}
