use thiserror::Error;

/// Errors from the probe client.
///
/// Per-URL fetch and classification failures are not errors; they collapse
/// to absent results so one bad candidate never disturbs its batch. Only
/// client construction can fail.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
