//! The annotation session controller.
//!
//! Owns the document text and the annotation store explicitly (no ambient
//! globals) and drives every mutation from the browser main thread: selection
//! confirms, menu choices, document clicks and network-response callbacks all
//! run through the single shared state cell.

use std::cell::RefCell;
use std::rc::Rc;

use annotate_core::{render_highlights, AnnotationStore, Label};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, Document, HtmlElement, MouseEvent, Node};

use crate::api;
use crate::menu::LabelMenu;
use crate::selection::{selection_menu_position, selection_offsets, SpanOffsets};

pub const TEXT_ELEMENT_ID: &str = "text";
pub const MENU_ELEMENT_ID: &str = "label-menu";

struct SessionState {
    document_text: String,
    store: AnnotationStore,
    text_el: HtmlElement,
    menu: LabelMenu,
}

impl SessionState {
    fn render(&self) {
        if self.document_text.is_empty() {
            return;
        }
        self.text_el
            .set_inner_html(&render_highlights(&self.document_text, self.store.annotations()));
    }

    fn text_char_len(&self) -> usize {
        self.document_text.chars().count()
    }
}

/// Widget entry point. JS constructs one per page and calls `start()`.
#[wasm_bindgen]
pub struct Annotator {
    state: Rc<RefCell<SessionState>>,
}

#[wasm_bindgen]
impl Annotator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Annotator, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        let text_el = document
            .get_element_by_id(TEXT_ELEMENT_ID)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", TEXT_ELEMENT_ID)))?
            .dyn_into::<HtmlElement>()?;
        let menu = LabelMenu::attach(&document, MENU_ELEMENT_ID)?;

        let state = Rc::new(RefCell::new(SessionState {
            document_text: String::new(),
            store: AnnotationStore::new(),
            text_el,
            menu,
        }));

        let annotator = Annotator { state };
        annotator.wire_listeners(&document)?;
        Ok(annotator)
    }

    /// Fetch the document, render, fetch its annotations, render again.
    ///
    /// A failed document fetch falls back to the placeholder text; a failed
    /// annotation fetch leaves the store empty. Neither surfaces an error.
    pub async fn start(&self) -> Result<(), JsValue> {
        let text = match api::fetch_document().await {
            Ok(doc) => doc.text,
            Err(err) => {
                console::warn_1(&err);
                api::FALLBACK_DOCUMENT_TEXT.to_string()
            }
        };
        {
            let mut state = self.state.borrow_mut();
            state.document_text = text;
            state.render();
        }

        match api::fetch_annotations().await {
            Ok(anns) => {
                let mut state = self.state.borrow_mut();
                state.store.replace_all(anns);
                state.render();
            }
            Err(err) => console::warn_1(&err),
        }
        Ok(())
    }

    /// Create an annotation directly, bypassing the menu. Used from JS.
    #[wasm_bindgen(js_name = addAnnotation)]
    pub fn add_annotation(&self, start: usize, end: usize, label: &str) -> Result<(), JsValue> {
        let label = Label::from_str(label)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid label: {}", label)))?;
        choose_label(&self.state, SpanOffsets { start, end }, label);
        Ok(())
    }

    /// Current annotations as JSON
    #[wasm_bindgen(js_name = annotationsJson)]
    pub fn annotations_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.state.borrow().store.annotations())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = annotationCount)]
    pub fn annotation_count(&self) -> usize {
        self.state.borrow().store.len()
    }

    fn wire_listeners(&self, document: &Document) -> Result<(), JsValue> {
        let state = Rc::clone(&self.state);
        let on_mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
            if let Err(err) = confirm_selection(&state) {
                console::warn_1(&err);
            }
        }));
        self.state
            .borrow()
            .text_el
            .add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref())?;
        on_mouseup.forget();

        let state = Rc::clone(&self.state);
        let on_click = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
            let state = state.borrow();
            let target: Option<Node> = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            if !state.menu.contains(target.as_ref()) {
                state.menu.hide();
            }
        }));
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        Ok(())
    }
}

/// Mouse-release on the text container: resolve the selection and show the
/// menu for a non-empty span, otherwise hide it.
fn confirm_selection(state: &Rc<RefCell<SessionState>>) -> Result<(), JsValue> {
    let st = state.borrow();
    match selection_offsets(&st.text_el)? {
        Some(span) if !span.is_empty() => {
            if let Some((x, y)) = selection_menu_position()? {
                let chooser = Rc::clone(state);
                let on_choose: Rc<dyn Fn(Label)> = Rc::new(move |label| {
                    choose_label(&chooser, span, label);
                });
                st.menu.show(x, y, on_choose)?;
            }
        }
        _ => st.menu.hide(),
    }
    Ok(())
}

/// A label was chosen for the pending span: append to the store, re-render
/// optimistically, hide the menu, then persist in the background. The save
/// response patches the server id into its own record by local id, so
/// out-of-order completions cannot clobber each other.
fn choose_label(state: &Rc<RefCell<SessionState>>, span: SpanOffsets, label: Label) {
    let created = {
        let mut st = state.borrow_mut();
        let text_len = st.text_char_len();
        let result = st.store.insert(span.start, span.end, label, text_len);
        let created = match result {
            Ok(local_id) => {
                let ann = st.store.get(&local_id).cloned();
                st.render();
                ann.map(|ann| (local_id, ann))
            }
            Err(err) => {
                // Overlapping or out-of-range spans are refused outright
                console::warn_1(&JsValue::from_str(&err.to_string()));
                None
            }
        };
        st.menu.hide();
        created
    };

    if let Some((local_id, ann)) = created {
        let state = Rc::clone(state);
        spawn_local(async move {
            match api::create_annotation(&ann).await {
                Ok(id) => {
                    state.borrow_mut().store.assign_id(&local_id, id);
                }
                // The record stays visible, permanently without an id
                Err(err) => console::warn_1(&err),
            }
        });
    }
}
