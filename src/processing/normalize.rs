//! WebVTT caption cleanup.
//!
//! Raw caption tracks interleave prose with timing artifacts: a `WEBVTT`
//! header, cue delimiter lines (`HH:MM:SS.mmm --> HH:MM:SS.mmm`, sometimes
//! trailed by positioning metadata), and heavy line breaking. Normalization
//! strips all of that and reflows the remaining text into one prose string.

use regex::Regex;
use std::sync::LazyLock;

static CUE_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\d{2}:\d{2}:\d{2}\.\d{3} --> \d{2}:\d{2}:\d{2}\.\d{3}(?: line:[^ \n]* position:[^ \n]* align:[^\n]*)?",
    )
    .expect("cue timing pattern compiles")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern compiles"));

/// Reduce a raw caption track to one cleaned prose string.
///
/// Applied in order: cue timing lines (bare or with trailing positioning
/// metadata) are replaced by a single space, the leading `WEBVTT` header
/// token is stripped, whitespace runs of two or more characters collapse to
/// one space, and the ends are trimmed. The output carries no cue timings,
/// no leading header token, and no consecutive whitespace.
pub fn normalize(raw: &str) -> String {
    let without_cues = CUE_TIMING.replace_all(raw, " ");
    let without_header = without_cues
        .strip_prefix("WEBVTT")
        .unwrap_or(&without_cues);
    let collapsed = WHITESPACE_RUN.replace_all(without_header, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cleans_a_two_cue_track() {
        let raw = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:02.000 --> 00:00:03.000\nWorld";
        assert_eq!(normalize(raw), "Hello World");
    }

    #[test]
    fn normalize_strips_cues_with_positioning_metadata() {
        let raw = "WEBVTT\n\n00:00:01.000 --> 00:00:04.000 line:90% position:50% align:middle\nDown here";
        assert_eq!(normalize(raw), "Down here");
    }

    #[test]
    fn normalize_leaves_no_artifacts_behind() {
        let raw = "WEBVTT\n\n00:10:00.500 --> 00:10:02.750\nfirst line\nsecond line\n\n01:02:03.004 --> 01:02:05.006\nthird";
        let cleaned = normalize(raw);
        assert!(!CUE_TIMING.is_match(&cleaned));
        assert!(!cleaned.starts_with("WEBVTT"));
        assert!(!WHITESPACE_RUN.is_match(&cleaned));
        assert_eq!(cleaned, cleaned.trim());
        assert_eq!(cleaned, "first line\nsecond line third");
    }

    #[test]
    fn normalize_is_idempotent_on_caption_tracks() {
        let inputs = [
            "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:02.000 --> 00:00:03.000\nWorld",
            "WEBVTT\n\n00:00:01.000 --> 00:00:04.000 line:0% position:20% align:start\nText",
            "  plain text with   gaps  ",
            "",
        ];
        for raw in inputs {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn normalize_is_a_trim_and_collapse_for_plain_text() {
        assert_eq!(normalize("  already   clean \n\n text "), "already clean text");
    }

    #[test]
    fn normalize_keeps_single_line_breaks() {
        // A lone newline is not a whitespace run; the original reflow only
        // collapses runs of two or more.
        assert_eq!(normalize("one\ntwo"), "one\ntwo");
    }
}
