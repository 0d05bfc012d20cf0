use std::fmt;

/// All errors that can occur while driving the form or talking to the prediction endpoint.
///
/// Per-field validation failures are not errors in this sense, they are reported as
/// [`FieldErrors`](crate::schema::FieldErrors) and rendered next to each input.
#[derive(Debug)]
pub enum PredictorError {
    /// A category name outside the five ocean-proximity options.
    UnknownCategory(String),
    /// The request never produced a response (connection refused, reset, ...).
    Transport(reqwest::Error),
    /// The endpoint answered with a non-success status code.
    Status(u16),
    /// The response body did not carry a usable `predicted_price[0]`.
    MalformedResponse(String),
    /// The request was dropped before it produced any result.
    Aborted,
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(name) => write!(f, "unknown category: {name}"),
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Status(code) => write!(f, "endpoint returned status {code}"),
            Self::MalformedResponse(msg) => write!(f, "malformed response: {msg}"),
            Self::Aborted => write!(f, "request aborted before completion"),
        }
    }
}

impl std::error::Error for PredictorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PredictorError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}
