//! String similarity scoring for spoken names
//!
//! Spoken names rarely match library tags exactly ("summer vibes" vs.
//! "Summer Vibes 2020"), so fuzzy resolution scores candidates with a
//! similarity ratio and accepts only those above a threshold. The ratio is
//! `200 * lcs(a, b) / (|a| + |b|)` over lowercased characters: 100 for
//! identical strings, 0 when nothing lines up.

/// Similarity ratio between two strings in [0, 100], case-insensitive
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let lcs = lcs_length(&a, &b);
    ((200 * lcs) / (a.len() + b.len())) as u8
}

/// Longest-common-subsequence length, two-row dynamic programming
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            row[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
        row[0] = 0;
    }

    prev[b.len()]
}

/// Best-scoring candidate for a query, if any
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(|candidate| (candidate, ratio(query, candidate)))
        .max_by_key(|(_, score)| *score)
}

/// Capitalize the first letter of each whitespace-separated word
///
/// Local libraries conventionally store tags in title case while speech
/// transcription arrives lowercased; the exact-match tier bridges the two.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
