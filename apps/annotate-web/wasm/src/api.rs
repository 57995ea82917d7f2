//! The three API calls: load document, load annotations, create annotation.
//!
//! Each is a single fetch with no retry, no timeout override and no
//! cancellation. Callers decide what a failure means; the posture throughout
//! is best-effort and never blocks the UI.

use annotate_core::{Annotation, Document};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub const API_BASE: &str = "http://localhost:5000";

/// Shown when the document fetch fails; the widget stays usable for a demo.
pub const FALLBACK_DOCUMENT_TEXT: &str = "Sample text to annotate.";

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

fn get_request(url: &str) -> Result<Request, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    Request::new_with_str_and_init(url, &opts)
}

async fn fetch_body(request: &Request) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let response = JsFuture::from(window.fetch_with_request(request)).await?;
    let response: Response = response.dyn_into()?;

    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "Request failed: {}",
            response.status()
        )));
    }

    let body = JsFuture::from(response.text()?).await?;
    body.as_string()
        .ok_or_else(|| JsValue::from_str("Response body is not text"))
}

/// `GET {base}/documents/1`
pub async fn fetch_document() -> Result<Document, JsValue> {
    let request = get_request(&format!("{}/documents/1", API_BASE))?;
    let body = fetch_body(&request).await?;
    serde_json::from_str(&body).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `GET {base}/annotations`
pub async fn fetch_annotations() -> Result<Vec<Annotation>, JsValue> {
    let request = get_request(&format!("{}/annotations", API_BASE))?;
    let body = fetch_body(&request).await?;
    serde_json::from_str(&body).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `POST {base}/annotations` with body `{start, end, label}`.
/// Returns the server-assigned id.
pub async fn create_annotation(ann: &Annotation) -> Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    let body = serde_json::to_string(ann).map_err(|e| JsValue::from_str(&e.to_string()))?;
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&format!("{}/annotations", API_BASE), &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let body = fetch_body(&request).await?;
    let parsed: CreateResponse =
        serde_json::from_str(&body).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(parsed.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotate_core::Label;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_body_shape() {
        let ann = Annotation::new(0, 5, Label::Person);
        let body: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&ann).unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"start": 0, "end": 5, "label": "PERSON"})
        );
    }

    #[test]
    fn test_create_response_parse() {
        let parsed: CreateResponse = serde_json::from_str(r#"{"id":"12"}"#).unwrap();
        assert_eq!(parsed.id, "12");
        // The backend echoes the full annotation; extra fields are ignored
        let parsed: CreateResponse =
            serde_json::from_str(r#"{"id":"3","start":0,"end":5,"label":"PERSON"}"#).unwrap();
        assert_eq!(parsed.id, "3");
    }

    #[test]
    fn test_annotation_list_parse() {
        let anns: Vec<Annotation> =
            serde_json::from_str(r#"[{"id":"1","start":0,"end":5,"label":"PERSON"}]"#).unwrap();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].id.as_deref(), Some("1"));
    }
}
