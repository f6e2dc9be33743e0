use thiserror::Error;

/// Errors surfaced by campaign kit operations.
///
/// Every variant renders as a single user-facing message. Optional stages
/// never produce an error for an empty upstream result; only the variants
/// below abort a submission.
#[derive(Debug, Error)]
pub enum KitError {
    /// Missing or invalid configuration, detected before any network activity.
    #[error("{0}")]
    Config(String),

    /// The remote service failed at the transport or protocol level.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The mandatory poster stage returned zero images.
    #[error("The AI did not return any poster images. It may have refused the request.")]
    NoPosters,

    /// Source image synthesis returned zero images.
    #[error("AI image generation failed to return an image.")]
    NoSourceImage,

    /// A string could not be decoded as a base64 data URL.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Another generation is already in flight.
    #[error("A generation is already in progress. Please wait for it to finish.")]
    Busy,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl KitError {
    /// Build a configuration error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an upstream error from any displayable source.
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }

    /// Whether the error stems from the remote service rather than local input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::NoPosters | Self::NoSourceImage)
    }
}

pub type Result<T> = std::result::Result<T, KitError>;
