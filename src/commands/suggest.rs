//! Completion suggestions
//!
//! The line editor replaces the whole line when a suggestion is accepted, so
//! bare aliases are expanded into full lines here.

/// Expand `candidates` into full-line completions
///
/// Each candidate is prefixed with the first `matched_depth` fields of
/// `line`. When the line ends exactly on a matched token and there is
/// nothing left to offer, the result collapses to that line alone.
pub fn normalize<S: AsRef<str>>(line: &str, matched_depth: usize, candidates: &[S]) -> Vec<String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let prefix = fields
        .iter()
        .take(matched_depth)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if fields.len() == matched_depth && candidates.is_empty() {
        return vec![prefix];
    }

    candidates
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            if prefix.is_empty() {
                candidate.to_string()
            } else {
                format!("{} {}", prefix, candidate)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_prefix_matched_fields() {
        let result = normalize("set", 1, &["bill", "stat"]);
        assert_eq!(result, ["set bill", "set stat"]);
    }

    #[test]
    fn test_partial_word_is_dropped_from_prefix() {
        let result = normalize("set bill am", 2, &["amount", "name"]);
        assert_eq!(result, ["set bill amount", "set bill name"]);
    }

    #[test]
    fn test_extra_spaces_are_collapsed() {
        let result = normalize("  set    bill ", 2, &["amount"]);
        assert_eq!(result, ["set bill amount"]);
    }

    #[test]
    fn test_empty_prefix() {
        let result = normalize("", 0, &["set", "pay"]);
        assert_eq!(result, ["set", "pay"]);

        let result = normalize("xyz", 0, &["set", "pay"]);
        assert_eq!(result, ["set", "pay"]);
    }

    #[test]
    fn test_collapse_on_finished_line() {
        let result = normalize("set bill amount ", 3, &NONE);
        assert_eq!(result, ["set bill amount"]);
    }

    #[test]
    fn test_no_collapse_with_unconsumed_fields() {
        let result = normalize("set bill amount extra", 3, &NONE);
        assert!(result.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let candidates = ["zeta", "alpha", "mid"];
        let result = normalize("go", 1, &candidates);
        assert_eq!(result, ["go zeta", "go alpha", "go mid"]);
    }

    #[test]
    fn test_owned_candidates() {
        let candidates = vec!["bill".to_string(), "card".to_string()];
        let result = normalize("pay", 1, &candidates);
        assert_eq!(result, ["pay bill", "pay card"]);
    }
}
