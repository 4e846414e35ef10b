//! Timedtext (json3) caption payload parsing.
//!
//! Caption tracks download as `{"events": [{"tStartMs": ..., "segs":
//! [{"utf8": ...}]}]}`. Events without segments (window styling, cue
//! metadata) and blank segments are dropped during flattening.

use capscribe_models::CaptionLine;
use serde::Deserialize;

/// Top-level timedtext payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TimedText {
    #[serde(default)]
    pub events: Vec<CaptionEvent>,
}

/// One caption event: a start offset plus zero or more text segments.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionEvent {
    #[serde(rename = "tStartMs", default)]
    pub t_start_ms: u64,
    #[serde(default)]
    pub segs: Option<Vec<TextSegment>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextSegment {
    #[serde(default)]
    pub utf8: String,
}

/// Flatten a timedtext payload into ordered caption lines.
///
/// Each non-blank segment becomes one line carrying its event's start time
/// converted to seconds.
pub fn flatten_events(timed: &TimedText) -> Vec<CaptionLine> {
    timed
        .events
        .iter()
        .filter_map(|event| {
            let segs = event.segs.as_ref()?;
            let start = event.t_start_ms as f64 / 1000.0;
            Some(
                segs.iter()
                    .filter(|seg| !seg.utf8.trim().is_empty())
                    .map(move |seg| CaptionLine::new(start, seg.utf8.clone())),
            )
        })
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_events_to_lines_in_order() {
        let payload = r#"{
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "Hello"}]},
                {"tStartMs": 1500, "segs": [{"utf8": "world"}, {"utf8": "again"}]}
            ]
        }"#;
        let timed: TimedText = serde_json::from_str(payload).unwrap();
        let lines = flatten_events(&timed);

        assert_eq!(
            lines,
            vec![
                CaptionLine::new(0.0, "Hello"),
                CaptionLine::new(1.5, "world"),
                CaptionLine::new(1.5, "again"),
            ]
        );
    }

    #[test]
    fn skips_events_without_segments() {
        let payload = r#"{
            "events": [
                {"tStartMs": 0, "wWinId": 1},
                {"tStartMs": 100, "segs": [{"utf8": "kept"}]}
            ]
        }"#;
        let timed: TimedText = serde_json::from_str(payload).unwrap();
        let lines = flatten_events(&timed);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "kept");
    }

    #[test]
    fn drops_blank_segments() {
        let payload = r#"{
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "\n"}, {"utf8": "  "}, {"utf8": "text"}]}
            ]
        }"#;
        let timed: TimedText = serde_json::from_str(payload).unwrap();
        let lines = flatten_events(&timed);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "text");
    }

    #[test]
    fn empty_payload_yields_no_lines() {
        let timed: TimedText = serde_json::from_str("{}").unwrap();
        assert!(flatten_events(&timed).is_empty());
    }
}
