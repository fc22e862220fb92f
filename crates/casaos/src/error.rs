//! CLI error types with miette diagnostics.
//!
//! Maps `FetchError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use casaos_config::ConfigError;
use casaos_core::{ErrorKind, FetchError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const CANCELED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Incomplete credentials: {fields}")]
    #[diagnostic(
        code(casaos::incomplete_credentials),
        help(
            "{details}\n\
             Pass --host/--username/--password or configure a profile."
        )
    )]
    IncompleteCredentials { fields: String, details: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(casaos::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Config file: {path}"
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(casaos::config))]
    Config(ConfigError),

    #[error("Invalid device configuration: {message}")]
    #[diagnostic(
        code(casaos::invalid_device),
        help("The host must be an http:// or https:// URL, e.g. http://casaos.local")
    )]
    InvalidDevice { message: String },

    // ── Device ───────────────────────────────────────────────────────
    #[error("Could not reach the device")]
    #[diagnostic(
        code(casaos::connection_failed),
        help(
            "Check that the device is running and reachable.\n\
             Increase --timeout for slow devices, or use --insecure (-k) for self-signed TLS."
        )
    )]
    ConnectionFailed {
        #[source]
        source: FetchError,
    },

    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(casaos::auth_failed),
        help("Verify the username and password, or CASAOS_USERNAME / CASAOS_PASSWORD.")
    )]
    AuthFailed { status: u16 },

    #[error("The device rejected the request: {message}")]
    #[diagnostic(code(casaos::unexpected_status))]
    UnexpectedStatus { message: String },

    #[error("The device returned an unreadable app grid: {message}")]
    #[diagnostic(
        code(casaos::decode),
        help("The device's API may be a version this tool does not understand.")
    )]
    Decode { message: String },

    #[error("Application '{id}' not found")]
    #[diagnostic(
        code(casaos::not_found),
        help("Run: casaos apps list to see installed applications")
    )]
    NotFound { id: String },

    #[error("Canceled")]
    #[diagnostic(code(casaos::canceled))]
    Canceled,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(casaos::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(casaos::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::IncompleteCredentials { .. }
            | Self::ProfileNotFound { .. }
            | Self::Config(_)
            | Self::InvalidDevice { .. } => exit_code::USAGE,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::UnexpectedStatus { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Canceled => exit_code::CANCELED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

fn field_names(err: &ConfigError) -> String {
    err.fields()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Credentials { .. } => CliError::IncompleteCredentials {
                fields: field_names(&err),
                details: err.field_details().join("\n"),
            },
            other => CliError::Config(other),
        }
    }
}

// ── FetchError → CliError mapping ────────────────────────────────────

impl From<FetchError> for CliError {
    fn from(err: FetchError) -> Self {
        match err.kind() {
            ErrorKind::Canceled => CliError::Canceled,
            ErrorKind::Transport => CliError::ConnectionFailed { source: err },
            ErrorKind::Decode => CliError::Decode {
                message: err.to_string(),
            },
            ErrorKind::Protocol => match (&err, err.status()) {
                (FetchError::Api(api), Some(status)) if api.is_unauthorized() => {
                    CliError::AuthFailed { status }
                }
                _ => CliError::UnexpectedStatus {
                    message: err.to_string(),
                },
            },
            ErrorKind::Configuration => match err {
                FetchError::Configuration(cfg) => cfg.into(),
                other => CliError::InvalidDevice {
                    message: other.to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use casaos_config::CredentialField;

    use super::*;

    #[test]
    fn unresolved_and_missing_fields_share_one_error() {
        let err = CliError::from(FetchError::from(ConfigError::Credentials {
            unresolved: vec![CredentialField::Password],
            missing: vec![CredentialField::Host],
        }));
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(err.to_string(), "Incomplete credentials: host, password");
        let CliError::IncompleteCredentials { details, .. } = err else {
            panic!("expected IncompleteCredentials");
        };
        let lines: Vec<&str> = details.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("host: no value configured"));
        assert!(lines[0].contains("CASAOS_HOST"));
        assert!(lines[1].starts_with("password: the value is not known yet"));
    }

    #[test]
    fn only_missing_fields_still_map_to_usage() {
        let err = CliError::from(ConfigError::Credentials {
            unresolved: Vec::new(),
            missing: vec![CredentialField::Username],
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(err.to_string(), "Incomplete credentials: username");
    }

    #[test]
    fn canceled_exits_130() {
        assert_eq!(CliError::from(FetchError::Canceled).exit_code(), 130);
    }
}
