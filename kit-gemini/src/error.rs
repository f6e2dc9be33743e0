use snafu::Snafu;
use url::Url;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("API key is required but was not provided"))]
    MissingApiKey,

    #[snafu(display("invalid API key: not a valid header value"))]
    InvalidApiKey { source: reqwest::header::InvalidHeaderValue },

    #[snafu(display("failed to construct URL (probably incorrect model name): {suffix}"))]
    ConstructUrl { source: url::ParseError, suffix: String },

    #[snafu(display("failed to build HTTP client"))]
    BuildClient { source: reqwest::Error },

    #[snafu(display("failed to perform request to '{url}'"))]
    PerformRequest { source: reqwest::Error, url: Url },

    #[snafu(display(
        "bad response from server; code {code}; description: {}",
        description.as_deref().unwrap_or("none")
    ))]
    BadResponse {
        /// HTTP status code
        code: u16,
        /// Error message extracted from the response body, if any
        description: Option<String>,
    },

    #[snafu(display("failed to obtain response body"))]
    DecodeResponse { source: reqwest::Error },

    #[snafu(display("failed to deserialize JSON response"))]
    Deserialize { source: serde_json::Error },
}

impl Error {
    /// HTTP status code for server-side rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadResponse { code, .. } => Some(*code),
            _ => None,
        }
    }
}
