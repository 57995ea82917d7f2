pub mod error;
pub mod render;
pub mod store;
pub mod types;

pub use error::AnnotateError;
pub use render::{escape_html, render_highlights};
pub use store::AnnotationStore;
pub use types::{label_color, Annotation, Document, Label, DEFAULT_LABEL_COLOR};
