use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    #[error("Invalid span: start {start} is not before end {end}")]
    InvalidSpan { start: usize, end: usize },

    #[error("Span {start}..{end} extends past document length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Span {start}..{end} overlaps an existing annotation")]
    Overlap { start: usize, end: usize },
}
