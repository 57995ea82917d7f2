use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Background color used when an annotation carries a label string the
/// client does not recognize.
pub const DEFAULT_LABEL_COLOR: &str = "#ffd54f";

/// The fixed label set. Not user-extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Person,
    Org,
    Loc,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Person, Label::Org, Label::Loc];

    /// Wire/display form of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Person => "PERSON",
            Label::Org => "ORG",
            Label::Loc => "LOC",
        }
    }

    /// Parse a label from its wire form
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PERSON" => Some(Label::Person),
            "ORG" => Some(Label::Org),
            "LOC" => Some(Label::Loc),
            _ => None,
        }
    }

    /// Highlight background color for this label
    pub fn color(&self) -> &'static str {
        match self {
            Label::Person => "#ffd54f",
            Label::Org => "#81c784",
            Label::Loc => "#4fc3f7",
        }
    }
}

/// Resolve the highlight color for a raw label string, falling back to
/// [`DEFAULT_LABEL_COLOR`] for labels outside the fixed set.
pub fn label_color(label: &str) -> &'static str {
    Label::from_str(label)
        .map(|l| l.color())
        .unwrap_or(DEFAULT_LABEL_COLOR)
}

fn fresh_local_id() -> String {
    Uuid::new_v4().to_string()
}

/// A labeled span over document text.
///
/// `id` is the server-assigned identifier and is absent until the create
/// request completes. `local_id` is client-generated and never serialized;
/// it identifies the record so an in-flight save response can patch `id`
/// into the right annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub start: usize,
    pub end: usize,
    pub label: String,
    #[serde(skip, default = "fresh_local_id")]
    pub local_id: String,
}

impl Annotation {
    /// Create a new unsaved annotation with a fresh local id
    pub fn new(start: usize, end: usize, label: Label) -> Self {
        Self {
            id: None,
            start,
            end,
            label: label.as_str().to_string(),
            local_id: fresh_local_id(),
        }
    }
}

/// A text document, loaded once per session and immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_label_round_trip() {
        for label in Label::ALL {
            assert_eq!(Label::from_str(label.as_str()), Some(label));
        }
        assert_eq!(Label::from_str("GPE"), None);
    }

    #[test]
    fn test_label_colors() {
        assert_eq!(label_color("PERSON"), "#ffd54f");
        assert_eq!(label_color("ORG"), "#81c784");
        assert_eq!(label_color("LOC"), "#4fc3f7");
        // Unrecognized labels fall back to the PERSON color
        assert_eq!(label_color("MISC"), DEFAULT_LABEL_COLOR);
    }

    #[test]
    fn test_unsaved_annotation_wire_format() {
        let ann = Annotation::new(0, 5, Label::Person);
        let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&ann).unwrap()).unwrap();
        // The create body carries exactly start, end and label
        assert_eq!(
            json,
            serde_json::json!({"start": 0, "end": 5, "label": "PERSON"})
        );
    }

    #[test]
    fn test_annotation_deserialization_assigns_local_id() {
        let a: Annotation = serde_json::from_str(r#"{"id":"7","start":3,"end":9,"label":"ORG"}"#).unwrap();
        let b: Annotation = serde_json::from_str(r#"{"start":3,"end":9,"label":"ORG"}"#).unwrap();
        assert_eq!(a.id.as_deref(), Some("7"));
        assert_eq!(b.id, None);
        assert!(!a.local_id.is_empty());
        assert_ne!(a.local_id, b.local_id);
    }

    #[test]
    fn test_document_defaults() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.id, None);
        assert_eq!(doc.text, "");
    }
}
