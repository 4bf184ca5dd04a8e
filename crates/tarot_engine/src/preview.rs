/// Line budget for console previews of generated files.
pub const PREVIEW_LINES: usize = 20;

const MORE_MARKER: &str = "...";

/// First `max_lines` lines of `text`, followed by `...` when lines were cut.
pub fn preview_lines(text: &str, max_lines: usize) -> String {
    let mut lines = text.lines();
    let mut preview = lines
        .by_ref()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n");
    if lines.next().is_some() {
        preview.push('\n');
        preview.push_str(MORE_MARKER);
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::preview_lines;

    #[test]
    fn short_text_kept_as_is() {
        assert_eq!(preview_lines("a\nb", 5), "a\nb");
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        let text = (1..=30).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let preview = preview_lines(&text, 20);
        assert!(preview.starts_with("1\n2\n"));
        assert!(preview.ends_with("20\n..."));
    }

    #[test]
    fn exact_fit_has_no_marker() {
        assert_eq!(preview_lines("a\nb\n", 2), "a\nb");
    }
}
