use thiserror::Error;

/// Why a token sequence could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input text is empty")]
    EmptyInput,
    #[error("request failed: {0}")]
    Request(String),
    #[error("server replied with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not read token file: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Message shown to the user in place of the visualization.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::EmptyInput => "Please enter some text to visualize",
            _ => "Failed to fetch output",
        }
    }
}
