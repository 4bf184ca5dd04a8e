use scraper::ElementRef;

/// Normalize serialized markup so it embeds cleanly as a JSON string value.
///
/// Drops C0 control characters except tab, newline and carriage return,
/// collapses every whitespace run to a single space and trims both ends.
pub fn sanitize_markup(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if is_stripped_control(ch) {
            continue;
        }
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !cleaned.is_empty() {
            cleaned.push(' ');
        }
        pending_space = false;
        cleaned.push(ch);
    }
    cleaned
}

fn is_stripped_control(ch: char) -> bool {
    matches!(ch, '\u{0}'..='\u{8}' | '\u{B}'..='\u{C}' | '\u{E}'..='\u{1F}')
}

/// True when any text node below `element` holds a character that survives
/// [`sanitize_markup`] and is not whitespace.
pub fn has_visible_text(element: ElementRef<'_>) -> bool {
    element
        .text()
        .any(|chunk| chunk.chars().any(|c| !c.is_whitespace() && !is_stripped_control(c)))
}

/// Visible text of `element`: each text node trimmed, empty ones dropped,
/// the rest joined by a single space.
pub fn visible_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
