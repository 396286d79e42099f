//! Error types used internally by the parser.
//!
//! Parsing itself never fails; these errors describe recoverable fallbacks and
//! are logged rather than returned.

/// Result type for props parsing stages.
pub type PropsResult<T> = Result<T, PropsError>;

/// Reasons a props string was not accepted as a JSON object.
#[derive(Debug, thiserror::Error)]
pub enum PropsError {
  #[error("props are not wrapped in braces")]
  NotJsonShaped,
  #[error("props are not valid JSON: {0}")]
  Json(#[from] serde_json::Error),
  #[error("props JSON is not an object")]
  NotAnObject,
}
