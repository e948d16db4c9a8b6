//! String similarity metrics used to compare business names.

use std::collections::HashSet;

/// Levenshtein distance over Unicode scalar values (no case folding).
///
/// Runs the usual two-row dynamic programme with the shorter string on the
/// inner axis, so memory is `O(min(|a|, |b|))`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];
    for (i, &ch_long) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &ch_short) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(ch_long != ch_short);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}

/// Length in characters, the unit `edit_distance` counts in.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// `distance / max(len(a), len(b))`, or 0.0 when both strings are empty.
pub fn normalized_distance(distance: usize, max_length: usize) -> f64 {
    if max_length == 0 {
        0.0
    } else {
        distance as f64 / max_length as f64
    }
}

pub fn normalized_edit_distance(a: &str, b: &str) -> f64 {
    normalized_distance(edit_distance(a, b), char_len(a).max(char_len(b)))
}

/// Whitespace-token Jaccard similarity; 0.0 when neither side has tokens.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a_tokens: HashSet<&str> = a.split_whitespace().collect();
    let b_tokens: HashSet<&str> = b.split_whitespace().collect();
    let union = a_tokens.union(&b_tokens).count();
    if union == 0 {
        return 0.0;
    }
    let inter = a_tokens.intersection(&b_tokens).count();
    inter as f64 / union as f64
}
