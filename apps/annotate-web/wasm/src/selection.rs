//! Text offset resolver: maps the current browser selection to plain-text
//! character offsets relative to the text container's full content.

use wasm_bindgen::prelude::*;
use web_sys::Element;

/// A resolved selection span in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanOffsets {
    pub start: usize,
    pub end: usize,
}

impl SpanOffsets {
    /// A caret click produces an empty span; it never opens the menu.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Resolve the current selection against `container`.
///
/// Returns `None` when there is no selection range or the range lies outside
/// the container. Offsets are computed by serializing the container contents
/// preceding the range start into plain text, so they stay accurate when the
/// container already holds highlight markup. No side effects.
pub fn selection_offsets(container: &Element) -> Result<Option<SpanOffsets>, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let selection = match window.get_selection()? {
        Some(sel) => sel,
        None => return Ok(None),
    };
    if selection.range_count() == 0 {
        return Ok(None);
    }

    let range = selection.get_range_at(0)?;
    let ancestor = range.common_ancestor_container()?;
    if !container.contains(Some(&ancestor)) {
        return Ok(None);
    }

    let preceding = range.clone_range();
    preceding.select_node_contents(container)?;
    preceding.set_end(&range.start_container()?, range.start_offset()?)?;

    let start = String::from(preceding.to_string()).chars().count();
    let end = start + String::from(range.to_string()).chars().count();
    Ok(Some(SpanOffsets { start, end }))
}

/// Bottom-right corner of the selection rect in page coordinates, where the
/// label menu is anchored.
pub fn selection_menu_position() -> Result<Option<(f64, f64)>, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let selection = match window.get_selection()? {
        Some(sel) => sel,
        None => return Ok(None),
    };
    if selection.range_count() == 0 {
        return Ok(None);
    }

    let rect = selection.get_range_at(0)?.get_bounding_client_rect();
    let x = rect.right() + window.scroll_x()?;
    let y = rect.bottom() + window.scroll_y()?;
    Ok(Some((x, y)))
}
