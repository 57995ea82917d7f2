//! Browser glue for the text annotation widget.
//!
//! The page provides two elements: the text container (`#text`) and the label
//! menu popup (`#label-menu`). JS instantiates [`Annotator`] and calls
//! `start()`, which loads the document and its annotations, renders the
//! highlights, and wires the selection and click listeners.

use wasm_bindgen::prelude::*;

pub mod api;
pub mod menu;
pub mod selection;
pub mod session;

pub use menu::LabelMenu;
pub use selection::{selection_offsets, SpanOffsets};
pub use session::Annotator;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
