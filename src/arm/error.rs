// Management-plane error type for ARM Wizards

/// Errors surfaced by management-plane calls.
///
/// Nothing here is retried; every failure propagates unchanged to the
/// caller, which decides whether to report or abort.
#[derive(Debug, thiserror::Error)]
pub enum ArmError {
    /// Transport-level failure talking to Azure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The management API rejected the request.
    #[error("azure api error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Token acquisition failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
