use thiserror::Error;

/// Longest response body (in bytes) carried by [`Error::UnexpectedStatus`].
pub const MAX_ERROR_BODY: usize = 512;

/// Top-level error type for the `casaos-api` crate.
///
/// Covers client construction, transport, HTTP status, and payload
/// decoding failures. `casaos-core` classifies these into the four
/// caller-facing kinds without re-wrapping them.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// The configured host is empty, unparsable, or not http(s).
    #[error("Invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    /// URL parsing error while joining a request path onto the host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Transport ───────────────────────────────────────────────────
    /// DNS failure, refused connection, timeout, reset, etc.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Protocol ────────────────────────────────────────────────────
    /// The device answered with a non-success HTTP status.
    #[error("Unexpected status (HTTP {status}){}", body_suffix(.body))]
    UnexpectedStatus { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body is not the expected JSON shape.
    ///
    /// `index` and `store_app_id` locate the offending element when the
    /// failure is inside one entry rather than in the envelope.
    #[error("Malformed payload{}: {message}", location_suffix(.index, .store_app_id))]
    Deserialization {
        message: String,
        index: Option<usize>,
        store_app_id: Option<String>,
    },
}

impl Error {
    /// Build an [`Error::UnexpectedStatus`], truncating the body.
    pub fn unexpected_status(status: u16, body: &str) -> Self {
        Self::UnexpectedStatus {
            status,
            body: truncate(body, MAX_ERROR_BODY).to_owned(),
        }
    }

    /// Envelope-level decode failure (no element position).
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
            index: None,
            store_app_id: None,
        }
    }

    /// HTTP status code, if the device answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the device rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Cut `s` to at most `max` bytes without splitting a UTF-8 sequence.
pub(crate) fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

#[allow(clippy::ref_option)]
fn location_suffix(index: &Option<usize>, store_app_id: &Option<String>) -> String {
    match (index, store_app_id) {
        (Some(i), Some(id)) => format!(" at element {i} (store_app_id {id:?})"),
        (Some(i), None) => format!(" at element {i}"),
        (None, Some(id)) => format!(" (store_app_id {id:?})"),
        (None, None) => String::new(),
    }
}
