//! Textual similarity scoring for transcription evaluation
//!
//! Compares a recognized transcription against its expected text and returns
//! a normalized similarity in `[0.0, 1.0]`. The score is the
//! Ratcliff/Obershelp matching-blocks ratio over characters:
//!
//! ```text
//! similarity = 2 * M / (len(a) + len(b))
//! ```
//!
//! where `M` is the total length of the blocks found by recursively taking
//! the longest common substring of the two (case-folded) inputs. Identical
//! strings score 1.0, strings with no characters in common ordering score
//! 0.0, and the score is symmetric.

use std::collections::HashMap;

/// Compute the case-insensitive similarity between two strings.
///
/// Two empty strings are considered identical (1.0). If exactly one side is
/// empty the score is 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let matched = matched_length(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Total length of all matching blocks between `a` and `b`.
///
/// Finds the longest common substring, then recurses into the unmatched
/// regions on either side of it.
fn matched_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (i, j, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }

    len + matched_length(&a[..i], &b[..j])
        + matched_length(&a[i + len..], &b[j + len..])
}

/// Find the longest block of characters common to `a` and `b`.
///
/// Returns `(start_in_a, start_in_b, length)` of the earliest such block.
/// Runs the classic dynamic scan: for each position in `a`, extend the match
/// lengths carried over from the previous position for every occurrence of
/// the current character in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b_positions.entry(ch).or_default().push(j);
    }

    let mut best = (0usize, 0usize, 0usize);
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate() {
        let mut next_runs: HashMap<usize, usize> = HashMap::new();

        if let Some(positions) = b_positions.get(ch) {
            for &j in positions {
                let len = match j.checked_sub(1) {
                    Some(prev) => run_lengths.get(&prev).copied().unwrap_or(0) + 1,
                    None => 1,
                };
                next_runs.insert(j, len);

                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }

        run_lengths = next_runs;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identical_strings_score_one() {
        assert_relative_eq!(similarity("open the door", "open the door"), 1.0);
        assert_relative_eq!(similarity("a", "a"), 1.0);
    }

    #[test]
    fn case_is_ignored() {
        assert_relative_eq!(similarity("Open The Door", "open the door"), 1.0);
        assert_relative_eq!(similarity("HELLO", "hello"), 1.0);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            ("open the door", "open the floor"),
            ("hello world", "goodbye world"),
            ("", "abc"),
            ("kitten", "sitting"),
        ];
        for (a, b) in pairs {
            assert_relative_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn empty_strings() {
        assert_relative_eq!(similarity("", ""), 1.0);
        assert_relative_eq!(similarity("", "abc"), 0.0);
        assert_relative_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_relative_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let samples = [
            ("open the door", "open the floor"),
            ("abcabc", "cbacba"),
            ("the quick brown fox", "a lazy dog"),
            ("aaaa", "aa"),
        ];
        for (a, b) in samples {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s), "similarity({a:?}, {b:?}) = {s}");
        }
    }

    #[test]
    fn near_match_scores_above_threshold() {
        // "open the " (9 chars) plus "oor" (3 chars) match out of 13 + 14.
        let s = similarity("open the door", "open the floor");
        assert_relative_eq!(s, 24.0 / 27.0, epsilon = 1e-12);
        assert!(s > 0.8);
    }

    #[test]
    fn partial_overlap() {
        // "ab" vs "ax": one matched char out of four total.
        assert_relative_eq!(similarity("ab", "ax"), 0.5);
    }

    #[test]
    fn matching_respects_ordering() {
        // Same characters, reversed order: only one block of length 1 per
        // recursion branch can survive.
        let s = similarity("abcd", "dcba");
        assert!(s < 0.5);
        assert!(s > 0.0);
    }
}
