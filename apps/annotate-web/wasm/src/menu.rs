//! The transient label menu popup.
//!
//! Either hidden or shown at a fixed page position with one button per label
//! in the fixed set. The buttons are rebuilt on every show; choosing a label
//! fires the supplied callback exactly once.

use std::rc::Rc;

use annotate_core::Label;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Node};

const HIDDEN_CLASS: &str = "hidden";

pub struct LabelMenu {
    element: HtmlElement,
    document: Document,
}

impl LabelMenu {
    /// Bind to the popup element already present in the page.
    pub fn attach(document: &Document, element_id: &str) -> Result<Self, JsValue> {
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", element_id)))?
            .dyn_into::<HtmlElement>()?;
        Ok(Self {
            element,
            document: document.clone(),
        })
    }

    pub fn hide(&self) {
        let _ = self.element.class_list().add_1(HIDDEN_CLASS);
    }

    pub fn is_hidden(&self) -> bool {
        self.element.class_list().contains(HIDDEN_CLASS)
    }

    /// True if `node` is the menu or one of its buttons.
    pub fn contains(&self, node: Option<&Node>) -> bool {
        self.element.contains(node)
    }

    /// Populate the menu with one button per label and show it at `(x, y)`
    /// in page coordinates.
    pub fn show(&self, x: f64, y: f64, on_choose: Rc<dyn Fn(Label)>) -> Result<(), JsValue> {
        self.element.set_inner_html("");

        for label in Label::ALL {
            let button = self.document.create_element("button")?;
            button.set_text_content(Some(label.as_str()));

            let choose = Rc::clone(&on_choose);
            let onclick = Closure::once(Box::new(move |_event: web_sys::Event| {
                choose(label);
            }) as Box<dyn FnOnce(_)>);
            button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();

            self.element.append_child(&button)?;
        }

        let style = self.element.style();
        style.set_property("left", &format!("{}px", x))?;
        style.set_property("top", &format!("{}px", y))?;
        let _ = self.element.class_list().remove_1(HIDDEN_CLASS);
        Ok(())
    }
}
