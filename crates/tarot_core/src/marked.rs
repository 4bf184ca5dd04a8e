use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::sanitize::visible_text;

/// Line prefix editors use to flag hand-picked source lines.
pub const DEFAULT_MARKER: &str = "phuc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedLine {
    /// Raw markup following the marker on the same line.
    pub html: String,
    pub text: String,
    pub line_number: usize,
}

/// Source lines whose first non-blank characters are `marker`
/// (ASCII case-insensitive), with whatever follows it on that line.
///
/// Works on the raw page text rather than the parsed tree because the marker
/// lives outside any element.
pub fn marked_lines(raw: &str, marker: &str) -> Vec<MarkedLine> {
    raw.lines()
        .enumerate()
        .filter_map(|(offset, line)| {
            let line = line.trim_start();
            let head = line.get(..marker.len())?;
            if !head.eq_ignore_ascii_case(marker) {
                return None;
            }
            let rest = line[marker.len()..].trim();
            if rest.is_empty() {
                return None;
            }
            let fragment = Html::parse_fragment(rest);
            Some(MarkedLine {
                html: rest.to_string(),
                text: visible_text(fragment.root_element()),
                line_number: offset + 1,
            })
        })
        .collect()
}
