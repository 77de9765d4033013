use std::cmp;

/// Lowercases and trims a name so that all comparisons are case-insensitive
/// and ignore surrounding whitespace.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Levenshtein edit distance counted in chars, not bytes.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    // Keep the shorter string on the row axis.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut previous: Vec<usize> = (0..=short.len()).collect();
    let mut current: Vec<usize> = vec![0; short.len() + 1];
    for (i, lc) in long.iter().enumerate() {
        current[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = previous[j] + usize::from(lc != sc);
            let insertion = current[j] + 1;
            let deletion = previous[j + 1] + 1;
            current[j + 1] = cmp::min(substitution, cmp::min(insertion, deletion));
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[short.len()]
}

/// Token-wise similarity in `[0, 1]` between an already normalized needle
/// and hay. Tokens are compared pairwise in order, the sum is averaged over
/// the needle's tokens.
pub fn score(needle: &str, hay: &str) -> f64 {
    let needle_tokens: Vec<_> = needle.split_whitespace().collect();
    if needle_tokens.is_empty() {
        return 0.0;
    }
    let total: f64 = needle_tokens
        .iter()
        .zip(hay.split_whitespace())
        .map(|(n, h)| similarity(n, h))
        .sum();
    total / needle_tokens.len() as f64
}

fn similarity(a: &str, b: &str) -> f64 {
    let longest = cmp::max(a.chars().count(), b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - distance(a, b) as f64 / longest as f64
}
