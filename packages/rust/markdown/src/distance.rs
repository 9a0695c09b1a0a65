//! Edit distance for typo suggestions.

/// Classic Levenshtein distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two-row table
    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// The candidate closest to `name` within `max_distance`, if any.
///
/// Ties go to the earlier candidate.
pub fn closest_match<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        let distance = levenshtein(name, candidate);
        if distance > max_distance {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "", 0)]
    #[case("note", "", 4)]
    #[case("", "open", 4)]
    #[case("note", "note", 0)]
    #[case("nte", "note", 1)]
    #[case("ntoe", "note", 2)]
    #[case("kitten", "sitting", 3)]
    #[case("colapse", "collapse", 1)]
    #[case("Open", "open", 1)]
    fn distances(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        assert_eq!(levenshtein(a, b), expected);
        assert_eq!(levenshtein(b, a), expected);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn closest_match_respects_threshold() {
        let names = ["note", "collapse", "footnote"];
        assert_eq!(closest_match("nte", names, 2), Some("note"));
        assert_eq!(closest_match("colapse", names, 2), Some("collapse"));
        assert_eq!(closest_match("banana", names, 2), None);
    }

    #[test]
    fn closest_match_prefers_smaller_distance_then_order() {
        // "notes" is 1 from "note", 4 from "footnote"
        assert_eq!(closest_match("notes", ["footnote", "note"], 2), Some("note"));
        // equal distance: first candidate wins
        assert_eq!(closest_match("ab", ["aa", "bb"], 2), Some("aa"));
    }
}
