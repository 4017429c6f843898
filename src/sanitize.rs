//! Filename sanitization

use crate::consts::{MAX_NAME_CHARS, UNTITLED};

/// Characters replaced by a space: path separators, control whitespace and
/// characters reserved on common filesystems
const ILLEGAL_CHARS: &[char] = &[
    '\n', '\r', '\t', ':', '/', '\\', '?', '*', '"', '\'', '<', '>', '|',
];

fn is_edge_char(c: char) -> bool {
    c == ' ' || c == '.'
}

/// Turn an arbitrary model suggestion into a legal, bounded filename.
///
/// Order: replace illegal characters, collapse whitespace, re-attach dots,
/// strip edge spaces/periods, truncate, strip again. Never returns an empty
/// string.
pub(crate) fn sanitize_filename(name: Option<&str>) -> String {
    let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
        return UNTITLED.to_string();
    };

    let replaced: String = name
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { ' ' } else { c })
        .collect();
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    // "Report .pdf" -> "Report.pdf"
    let attached = collapsed.replace(" .", ".");

    let stripped = attached.trim_matches(is_edge_char);
    let truncated: String = stripped.chars().take(MAX_NAME_CHARS).collect();
    let result = truncated.trim_end_matches(is_edge_char);

    if result.is_empty() {
        UNTITLED.to_string()
    } else {
        result.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_legal(name: &str) {
        assert!(!name.is_empty());
        assert!(name.chars().count() <= MAX_NAME_CHARS, "too long: {name:?}");
        assert!(!name.contains(ILLEGAL_CHARS), "illegal char in {name:?}");
        assert!(!name.starts_with(is_edge_char), "bad start: {name:?}");
        assert!(!name.ends_with(is_edge_char), "bad end: {name:?}");
    }

    #[test]
    fn blank_inputs_are_untitled() {
        assert_eq!(sanitize_filename(None), "untitled");
        assert_eq!(sanitize_filename(Some("")), "untitled");
        assert_eq!(sanitize_filename(Some("   ")), "untitled");
        assert_eq!(sanitize_filename(Some("\n\t ")), "untitled");
    }

    #[test]
    fn replaces_illegal_chars_and_collapses() {
        assert_eq!(
            sanitize_filename(Some("Invoice: Q3 / Report?.pdf")),
            "Invoice Q3 Report.pdf"
        );
        assert_eq!(
            sanitize_filename(Some("a<b>c|d*e\"f'g\\h")),
            "a b c d e f g h"
        );
        assert_eq!(
            sanitize_filename(Some("  Meeting\r\nNotes\t2024  ")),
            "Meeting Notes 2024"
        );
    }

    #[test]
    fn strips_edge_spaces_and_periods() {
        assert_eq!(sanitize_filename(Some("...hidden name.")), "hidden name");
        assert_eq!(sanitize_filename(Some("\"Quarterly Report\"")), "Quarterly Report");
    }

    #[test]
    fn only_illegal_chars_become_untitled() {
        assert_eq!(sanitize_filename(Some("?/:*|")), "untitled");
        assert_eq!(sanitize_filename(Some(" . . ")), "untitled");
    }

    #[test]
    fn truncates_to_limit_by_chars() {
        let long = "é".repeat(300);
        let out = sanitize_filename(Some(&long));
        assert_eq!(out.chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn retrims_after_truncation() {
        // The cut lands right after a period and a space
        let input = format!("{}. b", "a".repeat(118));
        let out = sanitize_filename(Some(&input));
        assert_eq!(out, "a".repeat(118));
        assert_legal(&out);

        let input = format!("{} b", "a".repeat(119));
        let out = sanitize_filename(Some(&input));
        assert_eq!(out, "a".repeat(119));
    }

    #[test]
    fn keeps_internal_periods() {
        assert_eq!(sanitize_filename(Some("v1.2.3 release notes")), "v1.2.3 release notes");
    }

    #[test]
    fn idempotent_and_legal_over_samples() {
        let samples = [
            "Invoice: Q3 / Report?.pdf",
            "  . leading dots and spaces",
            "trailing ... ",
            "tabs\tand\nnewlines\r\n",
            "quotes \"here\" and 'there'",
            "<<<>>>|||",
            "dots . . . between",
            "",
            "ok",
            "Ünïcödé — naming ✓",
        ];
        let long = format!("{}. .x", "word ".repeat(40));
        for s in samples.iter().copied().chain(std::iter::once(long.as_str())) {
            let once = sanitize_filename(Some(s));
            let twice = sanitize_filename(Some(&once));
            assert_eq!(once, twice, "not idempotent for {s:?}");
            assert_legal(&once);
        }
    }
}
