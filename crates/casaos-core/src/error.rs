// ── Fetch pipeline errors ──
//
// Each stage's error is carried as-is. `kind()` answers "which of the
// caller-facing categories is this" without hiding the original value.

use strum::{AsRefStr, Display};
use thiserror::Error;

/// Error returned by the inventory pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Credential resolution failed (unresolved or missing fields).
    #[error(transparent)]
    Configuration(#[from] casaos_config::ConfigError),

    /// Client construction, request, status, or decode failed.
    #[error(transparent)]
    Api(#[from] casaos_api::Error),

    /// The caller canceled the fetch before it finished.
    #[error("Fetch canceled")]
    Canceled,
}

/// Caller-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Unresolved/missing credential, or an unusable host / TLS setup.
    Configuration,
    /// DNS, connect, timeout, reset.
    Transport,
    /// The device answered with a non-success status.
    Protocol,
    /// The body is not a valid app grid.
    Decode,
    Canceled,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Canceled => ErrorKind::Canceled,
            Self::Api(e) => match e {
                casaos_api::Error::InvalidHost { .. }
                | casaos_api::Error::InvalidUrl(_)
                | casaos_api::Error::Tls(_) => ErrorKind::Configuration,
                casaos_api::Error::Transport(_) => ErrorKind::Transport,
                casaos_api::Error::UnexpectedStatus { .. } => ErrorKind::Protocol,
                casaos_api::Error::Deserialization { .. } => ErrorKind::Decode,
            },
        }
    }

    /// HTTP status for protocol errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use casaos_config::{ConfigError, CredentialField};

    use super::*;

    #[test]
    fn kinds_follow_the_originating_stage() {
        let missing = FetchError::from(ConfigError::Credentials {
            unresolved: Vec::new(),
            missing: vec![CredentialField::Host],
        });
        assert_eq!(missing.kind(), ErrorKind::Configuration);

        let host = FetchError::from(casaos_api::Error::InvalidHost {
            host: String::new(),
            reason: "host is empty".into(),
        });
        assert_eq!(host.kind(), ErrorKind::Configuration);

        let status = FetchError::from(casaos_api::Error::unexpected_status(401, "nope"));
        assert_eq!(status.kind(), ErrorKind::Protocol);
        assert_eq!(status.status(), Some(401));

        let decode = FetchError::from(casaos_api::Error::Deserialization {
            message: "eof".into(),
            index: None,
            store_app_id: None,
        });
        assert_eq!(decode.kind(), ErrorKind::Decode);

        assert_eq!(FetchError::Canceled.kind(), ErrorKind::Canceled);
    }

    #[test]
    fn display_is_the_stage_error() {
        let err = FetchError::from(casaos_api::Error::unexpected_status(503, "busy"));
        assert_eq!(err.to_string(), "Unexpected status (HTTP 503): busy");
        assert_eq!(ErrorKind::Protocol.to_string(), "protocol");
    }
}
