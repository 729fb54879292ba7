//! Error type for the client, decoders and derived statistics.

/// Boxed source for transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Endpoint name outside `miner`, `worker`, `pool`.
    #[error("endpoint not supported: {0}")]
    UnsupportedEndpoint(String),

    /// Connection, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// Body is not a valid `{error, result}` envelope.
    #[error("malformed envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// Envelope carried a populated error descriptor.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Result did not have the shape the endpoint promises.
    #[error("malformed response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("block sample is empty")]
    EmptyBlockSample,

    #[error("block sample spans zero round time")]
    DegenerateTimespan,

    #[error("division by zero: {what} is zero")]
    DivisionByZero { what: &'static str },

    #[error("hashrate conversion overflows u64")]
    HashrateOverflow,

    #[error("PPLNS share window overflows u64 seconds")]
    ShareWindowOverflow,
}

impl Error {
    pub(crate) fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn transport(err: impl Into<BoxError>) -> Self {
        Error::Transport(err.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::transport(err)
    }
}
