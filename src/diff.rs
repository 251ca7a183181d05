// src/diff.rs
//! Line diff for the original-vs-polished summary view.
//!
//! Longest-common-subsequence at line granularity: unchanged lines pair up
//! as `Same` rows even when one side gained or lost lines above them, so an
//! insertion no longer misaligns everything after it.

/// One row of the rendered diff, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRow {
    Same(String),
    Removed(String),
    Added(String),
}

/// Diff two texts line by line.
///
/// Rows come out in an order that preserves the line order of both inputs:
/// reading only `Same` + `Removed` rows reproduces `original`, reading only
/// `Same` + `Added` rows reproduces `polished`.
pub fn diff_lines(original: &str, polished: &str) -> Vec<DiffRow> {
    let a: Vec<&str> = original.lines().collect();
    let b: Vec<&str> = polished.lines().collect();
    let n = a.len();
    let m = b.len();

    // table[i][j] = LCS length of a[i..] and b[j..]
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut rows = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            rows.push(DiffRow::Same(a[i].to_string()));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            rows.push(DiffRow::Removed(a[i].to_string()));
            i += 1;
        } else {
            rows.push(DiffRow::Added(b[j].to_string()));
            j += 1;
        }
    }
    for line in &a[i..] {
        rows.push(DiffRow::Removed(line.to_string()));
    }
    for line in &b[j..] {
        rows.push(DiffRow::Added(line.to_string()));
    }

    rows
}

/// The slice of raw uploaded text the summary diff compares against:
/// whatever sits between the `Summary:` and `Experience:` markers, empty
/// when the extracted text has no such markers.
pub fn original_summary_section(full_text: &str) -> &str {
    full_text
        .split_once("Summary:")
        .map(|(_, rest)| match rest.split_once("Experience:") {
            Some((section, _)) => section,
            None => rest,
        })
        .unwrap_or("")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(rows: &[DiffRow], keep_added: bool) -> Vec<&str> {
        rows.iter()
            .filter_map(|row| match row {
                DiffRow::Same(line) => Some(line.as_str()),
                DiffRow::Removed(line) if !keep_added => Some(line.as_str()),
                DiffRow::Added(line) if keep_added => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_equal_inputs_are_all_same() {
        let text = "one\ntwo\nthree";
        let rows = diff_lines(text, text);
        assert_eq!(
            rows,
            vec![
                DiffRow::Same("one".to_string()),
                DiffRow::Same("two".to_string()),
                DiffRow::Same("three".to_string()),
            ]
        );
    }

    #[test]
    fn test_pure_insertion_has_no_removed_rows() {
        let rows = diff_lines("one\nthree", "one\ntwo\nthree");
        assert!(!rows.iter().any(|r| matches!(r, DiffRow::Removed(_))));
        assert_eq!(
            rows,
            vec![
                DiffRow::Same("one".to_string()),
                DiffRow::Added("two".to_string()),
                DiffRow::Same("three".to_string()),
            ]
        );
    }

    #[test]
    fn test_insertion_does_not_misalign_followers() {
        // The naive index-by-index pairing marks every line after the
        // insertion as changed; LCS must keep them as Same.
        let original = "a\nb\nc\nd";
        let polished = "a\nnew\nb\nc\nd";
        let rows = diff_lines(original, polished);
        let same: Vec<_> = rows
            .iter()
            .filter(|r| matches!(r, DiffRow::Same(_)))
            .collect();
        assert_eq!(same.len(), 4);
    }

    #[test]
    fn test_rows_reconstruct_both_sides() {
        let original = "alpha\nbeta\ngamma";
        let polished = "alpha\nbeta prime\ngamma\ndelta";
        let rows = diff_lines(original, polished);
        assert_eq!(rendered(&rows, false), vec!["alpha", "beta", "gamma"]);
        assert_eq!(
            rendered(&rows, true),
            vec!["alpha", "beta prime", "gamma", "delta"]
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(diff_lines("", "").is_empty());
        let rows = diff_lines("", "only new");
        assert_eq!(rows, vec![DiffRow::Added("only new".to_string())]);
    }

    #[test]
    fn test_original_summary_section() {
        let text = "Jane Smith\nSummary: seasoned builder\nof things\nExperience: Acme";
        assert_eq!(
            original_summary_section(text),
            "seasoned builder\nof things"
        );
        assert_eq!(original_summary_section("no markers here"), "");
        assert_eq!(
            original_summary_section("Summary: tail only"),
            "tail only"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_text() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-c ]{0,6}", 0..8).prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        #[test]
        fn prop_diff_reconstructs_original(a in arb_text(), b in arb_text()) {
            let rows = diff_lines(&a, &b);
            let left: Vec<String> = rows
                .iter()
                .filter_map(|r| match r {
                    DiffRow::Same(l) | DiffRow::Removed(l) => Some(l.clone()),
                    DiffRow::Added(_) => None,
                })
                .collect();
            let expected: Vec<String> = a.lines().map(|l| l.to_string()).collect();
            prop_assert_eq!(left, expected);
        }

        #[test]
        fn prop_diff_reconstructs_polished(a in arb_text(), b in arb_text()) {
            let rows = diff_lines(&a, &b);
            let right: Vec<String> = rows
                .iter()
                .filter_map(|r| match r {
                    DiffRow::Same(l) | DiffRow::Added(l) => Some(l.clone()),
                    DiffRow::Removed(_) => None,
                })
                .collect();
            let expected: Vec<String> = b.lines().map(|l| l.to_string()).collect();
            prop_assert_eq!(right, expected);
        }

        #[test]
        fn prop_identical_inputs_all_same(a in arb_text()) {
            let rows = diff_lines(&a, &a);
            prop_assert!(rows.iter().all(|r| matches!(r, DiffRow::Same(_))));
        }
    }
}
