use crate::error::AnnotateError;
use crate::types::{Annotation, Label};

/// Ordered in-memory collection of annotations for the loaded document.
///
/// Owned exclusively by the rendering session; all mutation happens on the
/// single UI thread.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a user-created annotation, returning its local id.
    ///
    /// Spans must satisfy `start < end <= text_len` and must not overlap any
    /// existing annotation. `text_len` is the document length in characters.
    pub fn insert(
        &mut self,
        start: usize,
        end: usize,
        label: Label,
        text_len: usize,
    ) -> Result<String, AnnotateError> {
        if start >= end {
            return Err(AnnotateError::InvalidSpan { start, end });
        }
        if end > text_len {
            return Err(AnnotateError::OutOfBounds {
                start,
                end,
                len: text_len,
            });
        }
        if self
            .annotations
            .iter()
            .any(|a| a.start < end && start < a.end)
        {
            return Err(AnnotateError::Overlap { start, end });
        }

        let ann = Annotation::new(start, end, label);
        let local_id = ann.local_id.clone();
        self.annotations.push(ann);
        Ok(local_id)
    }

    /// Replace the collection with server-loaded records.
    ///
    /// Server data is taken verbatim for display; the renderer clamps any
    /// overlapping spans deterministically.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    /// Patch the server-assigned id into the record created under `local_id`.
    /// Returns false if no such record exists.
    pub fn assign_id(&mut self, local_id: &str, id: String) -> bool {
        match self.annotations.iter_mut().find(|a| a.local_id == local_id) {
            Some(ann) => {
                ann.id = Some(id);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, local_id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.local_id == local_id)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_appends_in_order() {
        let mut store = AnnotationStore::new();
        store.insert(0, 5, Label::Person, 20).unwrap();
        store.insert(10, 14, Label::Org, 20).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.annotations()[0].label, "PERSON");
        assert_eq!(store.annotations()[1].label, "ORG");
    }

    #[test]
    fn test_insert_rejects_empty_span() {
        let mut store = AnnotationStore::new();
        let err = store.insert(5, 5, Label::Person, 20).unwrap_err();
        assert_eq!(err, AnnotateError::InvalidSpan { start: 5, end: 5 });
        let err = store.insert(7, 3, Label::Person, 20).unwrap_err();
        assert_eq!(err, AnnotateError::InvalidSpan { start: 7, end: 3 });
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_rejects_out_of_bounds_span() {
        let mut store = AnnotationStore::new();
        let err = store.insert(18, 25, Label::Loc, 20).unwrap_err();
        assert_eq!(
            err,
            AnnotateError::OutOfBounds {
                start: 18,
                end: 25,
                len: 20
            }
        );
    }

    #[test]
    fn test_insert_rejects_overlap() {
        let mut store = AnnotationStore::new();
        store.insert(5, 10, Label::Person, 30).unwrap();
        // Partial overlap on either side, containment, and exact duplicate
        assert!(store.insert(8, 12, Label::Org, 30).is_err());
        assert!(store.insert(2, 6, Label::Org, 30).is_err());
        assert!(store.insert(6, 9, Label::Org, 30).is_err());
        assert!(store.insert(5, 10, Label::Org, 30).is_err());
        // Adjacent spans are fine
        store.insert(10, 12, Label::Org, 30).unwrap();
        store.insert(0, 5, Label::Loc, 30).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_assign_id_patches_only_its_record() {
        let mut store = AnnotationStore::new();
        let first = store.insert(0, 3, Label::Person, 20).unwrap();
        let second = store.insert(5, 8, Label::Org, 20).unwrap();

        // Out-of-order save completions each patch their own record
        assert!(store.assign_id(&second, "41".to_string()));
        assert!(store.assign_id(&first, "42".to_string()));
        assert_eq!(store.get(&first).unwrap().id.as_deref(), Some("42"));
        assert_eq!(store.get(&second).unwrap().id.as_deref(), Some("41"));
    }

    #[test]
    fn test_assign_id_unknown_local_id() {
        let mut store = AnnotationStore::new();
        assert!(!store.assign_id("missing", "1".to_string()));
    }

    #[test]
    fn test_failed_save_leaves_annotation_visible_without_id() {
        let mut store = AnnotationStore::new();
        let local_id = store.insert(0, 5, Label::Person, 20).unwrap();
        // No assign_id call, as after a swallowed network failure
        let ann = store.get(&local_id).unwrap();
        assert_eq!(ann.id, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_all_accepts_server_data_verbatim() {
        let mut store = AnnotationStore::new();
        store.insert(0, 5, Label::Person, 20).unwrap();
        let loaded: Vec<Annotation> = serde_json::from_str(
            r#"[{"id":"1","start":3,"end":9,"label":"ORG"},
                {"id":"2","start":3,"end":7,"label":"LOC"}]"#,
        )
        .unwrap();
        store.replace_all(loaded);
        assert_eq!(store.len(), 2);
        assert_eq!(store.annotations()[0].id.as_deref(), Some("1"));
    }
}
