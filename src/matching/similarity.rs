// ============================================================
// Layer 5 — Token-Sort Similarity
// ============================================================
// Scores two strings 0..=100 ignoring word order:
//
//   1. lowercase, split on whitespace, sort the tokens,
//      rejoin with single spaces
//   2. ratio = 100 * 2 * LCS(a, b) / (len(a) + len(b))
//      over characters (the indel similarity)
//
//   "admission process what is the"  vs
//   "what is the admission process"  → 100.0

/// Sort the tokens of `text` so word order no longer matters.
pub fn sort_tokens(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity of two strings after token sorting, 0..=100.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sort_tokens(a), &sort_tokens(b))
}

/// Indel similarity of two strings as they are, 0..=100.
/// Two empty strings are identical and score 100.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }

    100.0 * (2 * lcs_len(&a, &b)) as f64 / total as f64
}

/// Longest common subsequence length, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
