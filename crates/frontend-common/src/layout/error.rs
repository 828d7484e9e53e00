use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Failed to load stylesheet: {url}")]
    Stylesheet { url: String },

    #[error("Failed to load script: {url}")]
    Script { url: String },

    #[error("DOM error: {0}")]
    Dom(String),
}
