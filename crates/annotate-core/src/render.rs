//! Highlight rendering: document text plus annotations in, markup string out.
//!
//! The output is the only markup ever inserted into the text container, so
//! every raw text segment (including the span bodies and label badges) is
//! HTML-escaped here.

use crate::types::{label_color, Annotation};

/// Escape `&`, `<` and `>` for insertion into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Byte position of the char offset `ch`, clamped to the end of `text`.
fn byte_at(text: &str, ch: usize) -> usize {
    text.char_indices()
        .nth(ch)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Slice by char offsets. Annotation offsets count characters, not bytes.
fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    &text[byte_at(text, start)..byte_at(text, end)]
}

/// Render the document with highlighted annotation spans.
///
/// Annotations are sorted by ascending `start`, stable by insertion order for
/// ties, then spliced into the escaped text with a cursor walk. Each span is
/// clamped to begin at the cursor and end within the text, and any span left
/// empty by clamping (wholly behind the cursor, reversed, or past the end) is
/// skipped, so malformed or overlapping server data still renders
/// deterministically and stripping the markup always yields the original
/// text.
pub fn render_highlights(text: &str, annotations: &[Annotation]) -> String {
    let char_len = text.chars().count();

    let mut order: Vec<&Annotation> = annotations.iter().collect();
    order.sort_by_key(|a| a.start);

    let mut html = String::new();
    let mut last = 0;
    for ann in order {
        let end = ann.end.min(char_len);
        let start = ann.start.max(last);
        if end <= start {
            continue;
        }

        html.push_str(&escape_html(slice_chars(text, last, start)));
        html.push_str(&format!(
            r#"<span class="entity" data-id="{}" style="background:{}">"#,
            escape_html(ann.id.as_deref().unwrap_or("")),
            label_color(&ann.label)
        ));
        html.push_str(&escape_html(slice_chars(text, start, end)));
        html.push_str(&format!(
            r#"<span class="label">{}</span></span>"#,
            escape_html(&ann.label)
        ));
        last = end;
    }
    html.push_str(&escape_html(slice_chars(text, last, char_len)));
    html
}
