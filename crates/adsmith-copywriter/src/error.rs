use thiserror::Error;

/// Errors returned by the ad copy generation client.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Network or TLS failure from the underlying HTTP client, including
    /// request timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generation API base URL did not parse.
    #[error("invalid generation API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The generation API returned a non-2xx status.
    #[error("generation API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response decoded cleanly but carried no text content block.
    #[error("generation response contained no text content")]
    NoTextContent,
}
