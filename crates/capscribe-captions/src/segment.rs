//! Greedy paragraph segmentation over timestamped caption lines.
//!
//! Boundaries are driven purely by accumulated length and pause duration;
//! this is not a sentence or topic detector. Output is deterministic for
//! identical input and thresholds.

use capscribe_models::CaptionLine;

/// Flush the current paragraph once it exceeds this many characters.
pub const DEFAULT_MAX_CHARS: usize = 300;

/// Flush when the pause before the next line exceeds this many seconds.
pub const DEFAULT_MAX_GAP_SECS: f64 = 8.0;

/// Markers emitted by auto-captioning for non-speech audio.
const FILLER_MARKERS: [&str; 4] = ["[music]", "(music)", "[applause]", "(applause)"];

/// Segmentation thresholds.
#[derive(Debug, Clone, Copy)]
pub struct SegmentOptions {
    pub max_chars: usize,
    pub max_gap_secs: f64,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            max_gap_secs: DEFAULT_MAX_GAP_SECS,
        }
    }
}

/// Whether a trimmed caption text is a filler marker (case-insensitive).
fn is_filler(text: &str) -> bool {
    FILLER_MARKERS.contains(&text.to_lowercase().as_str())
}

/// Merge caption lines into paragraphs.
///
/// Single greedy pass: blank and filler lines are skipped; remaining text
/// accumulates space-joined. The paragraph flushes when the character count
/// exceeds `max_chars`, the gap to the next retained line exceeds
/// `max_gap_secs`, or the input ends.
pub fn segment(lines: &[CaptionLine], opts: SegmentOptions) -> Vec<String> {
    // Filter up front so the gap look-ahead sees the next retained line,
    // not a blank or filler in between.
    let kept: Vec<(f64, &str)> = lines
        .iter()
        .filter_map(|line| {
            let text = line.text.trim();
            (!text.is_empty() && !is_filler(text)).then_some((line.start, text))
        })
        .collect();

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;

    for (i, (start, text)) in kept.iter().enumerate() {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(text);
        count += text.chars().count();

        let next = kept.get(i + 1);
        let long_pause = next.is_some_and(|(next_start, _)| next_start - start > opts.max_gap_secs);

        if count > opts.max_chars || long_pause || next.is_none() {
            paragraphs.push(current.trim().to_string());
            current.clear();
            count = 0;
        }
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: f64, text: &str) -> CaptionLine {
        CaptionLine::new(start, text)
    }

    #[test]
    fn short_dense_input_yields_one_paragraph() {
        let lines = vec![line(0.0, "Hello"), line(1.0, "world"), line(2.0, "again")];
        let paragraphs = segment(&lines, SegmentOptions::default());
        assert_eq!(paragraphs, vec!["Hello world again"]);
    }

    #[test]
    fn long_pause_forces_a_break() {
        let lines = vec![
            line(0.0, "Hello"),
            line(1.0, "world"),
            line(20.0, "Next topic"),
        ];
        let paragraphs = segment(&lines, SegmentOptions::default());
        assert_eq!(paragraphs, vec!["Hello world", "Next topic"]);
    }

    #[test]
    fn character_budget_forces_a_break() {
        let chunk = "a".repeat(200);
        let lines = vec![
            line(0.0, &chunk),
            line(1.0, &chunk),
            line(2.0, "tail"),
        ];
        let paragraphs = segment(
            &lines,
            SegmentOptions {
                max_chars: 300,
                max_gap_secs: 8.0,
            },
        );
        // 400 chars > 300 flushes after the second chunk
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1], "tail");
    }

    #[test]
    fn fillers_and_blanks_never_appear_in_output() {
        let lines = vec![
            line(0.0, "Welcome"),
            line(1.0, "[Music]"),
            line(2.0, "  "),
            line(3.0, "(APPLAUSE)"),
            line(4.0, "back"),
        ];
        let paragraphs = segment(&lines, SegmentOptions::default());
        assert_eq!(paragraphs, vec!["Welcome back"]);
    }

    #[test]
    fn gap_look_ahead_skips_filtered_lines() {
        // The filler sits inside the long pause; the gap is measured to the
        // next retained line, so the break still happens.
        let lines = vec![
            line(0.0, "Intro"),
            line(2.0, "[music]"),
            line(30.0, "Later"),
        ];
        let paragraphs = segment(&lines, SegmentOptions::default());
        assert_eq!(paragraphs, vec!["Intro", "Later"]);
    }

    #[test]
    fn concatenation_preserves_every_fragment_in_order() {
        let lines = vec![
            line(0.0, "one"),
            line(10.0, "two"),
            line(11.0, "three"),
            line(40.0, "four"),
        ];
        let paragraphs = segment(&lines, SegmentOptions::default());
        assert_eq!(paragraphs.join(" "), "one two three four");
    }

    #[test]
    fn empty_and_filler_only_input_yields_nothing() {
        assert!(segment(&[], SegmentOptions::default()).is_empty());

        let lines = vec![line(0.0, "[music]"), line(5.0, "(applause)")];
        assert!(segment(&lines, SegmentOptions::default()).is_empty());
    }

    #[test]
    fn multibyte_text_counts_characters_not_bytes() {
        // 150 two-byte characters twice stays within a 300-char budget
        let chunk = "\u{e9}".repeat(150);
        let lines = vec![line(0.0, &chunk), line(1.0, &chunk)];
        let paragraphs = segment(&lines, SegmentOptions::default());
        assert_eq!(paragraphs.len(), 1);
    }
}
