// ============================================================
// Layer 4 — Question Variations
// ============================================================
// Produces training examples for an external intent classifier
// from a single curated question:
//
//   "How can I pay the fees"
//     → "how can i pay the fees"
//     → "hw can i pay the fees"
//     → "hwo can i pay the fees"
//     → "how cn i pay the fees"
//     → "how cna i pay the fees"
//
// At most MAX_VARIATIONS are kept per question.

pub const MAX_VARIATIONS: usize = 5;

/// Words the generator knows how to misspell, in the order they
/// are tried.
const REPLACEMENTS: &[(&str, &[&str])] = &[
    ("how",         &["hw", "hwo"]),
    ("what",        &["wat", "wht"]),
    ("where",       &["wher", "were"]),
    ("when",        &["wen", "whn"]),
    ("can",         &["cn", "cna"]),
    ("admission",   &["admision", "addmission"]),
    ("fees",        &["fee", "fess"]),
    ("hostel",      &["hostl", "hostle"]),
    ("placement",   &["placment", "placements"]),
    ("scholarship", &["scholership", "scholarshp"]),
    ("eligibility", &["eligibilty", "eligiblity"]),
    ("university",  &["univrsity", "universty"]),
    ("course",      &["cours", "corse"]),
    ("pdeu",        &["pdu", "pde"]),
];

fn replacements_for(word: &str) -> &'static [&'static str] {
    REPLACEMENTS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, r)| *r)
        .unwrap_or(&[])
}

/// Lowercased question, one variant per known misspelling, and a
/// three-word prefix for questions longer than three words.
pub fn generate_variations(question: &str) -> Vec<String> {
    let lowered = question.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut variations = vec![lowered.clone()];

    for (i, word) in words.iter().enumerate() {
        for replacement in replacements_for(word) {
            let mut new_words = words.clone();
            new_words[i] = *replacement;
            variations.push(new_words.join(" "));
        }
    }

    if words.len() > 3 {
        variations.push(words[..3].join(" "));
    }

    variations.truncate(MAX_VARIATIONS);
    variations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_variation_is_lowercased_question() {
        let v = generate_variations("Tell me about Hostel");
        assert_eq!(v[0], "tell me about hostel");
        assert!(v.contains(&"tell me about hostl".to_string()));
        assert!(v.contains(&"tell me about".to_string()));
    }

    #[test]
    fn test_capped_at_five() {
        let v = generate_variations("How can I pay the fees");
        assert_eq!(v.len(), MAX_VARIATIONS);
        assert_eq!(v[1], "hw can i pay the fees");
    }

    #[test]
    fn test_short_question_has_no_prefix() {
        assert_eq!(generate_variations("hi there"), vec!["hi there".to_string()]);
    }
}
