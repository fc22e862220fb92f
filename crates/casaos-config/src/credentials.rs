// ── Credential resolution ──
//
// Explicit value > environment variable > empty, per field. Validation
// reports unresolved and missing fields together in a single error.

use secrecy::{ExposeSecret, SecretString};
use strum::{AsRefStr, Display, EnumIter};
use tracing::debug;

use crate::env::EnvironmentLookup;
use crate::error::ConfigError;
use crate::{HOST_ENV, PASSWORD_ENV, USERNAME_ENV};

/// An explicit configuration input.
///
/// `Unset` means the caller did not supply the field (environment
/// fallback applies). `Unknown` means the caller declared it but its value
/// depends on something not evaluated yet. `Known` always wins, even
/// when it is the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue<T = String> {
    Unset,
    Unknown,
    Known(T),
}

impl<T> Default for ConfigValue<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> ConfigValue<T> {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unset | Self::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for ConfigValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Known)
    }
}

/// One of the three credential fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum CredentialField {
    Host,
    Username,
    Password,
}

impl CredentialField {
    /// The environment variable that supplies this field.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Host => HOST_ENV,
            Self::Username => USERNAME_ENV,
            Self::Password => PASSWORD_ENV,
        }
    }
}

/// Explicit inputs as supplied by the caller's configuration.
///
/// The password is wrapped in `SecretString` so `Debug` never prints it.
#[derive(Debug, Clone, Default)]
pub struct CredentialInput {
    pub host: ConfigValue,
    pub username: ConfigValue,
    pub password: ConfigValue<SecretString>,
}

impl CredentialInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = ConfigValue::Known(host.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = ConfigValue::Known(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = ConfigValue::Known(SecretString::from(password.into()));
        self
    }

    /// Fill every `Unset` field of `self` from `fallback`.
    ///
    /// Lets a caller layer flags over a profile file: both are explicit
    /// inputs, the flags simply take priority.
    pub fn or(self, fallback: Self) -> Self {
        fn pick<T>(primary: ConfigValue<T>, fallback: ConfigValue<T>) -> ConfigValue<T> {
            match primary {
                ConfigValue::Unset => fallback,
                other => other,
            }
        }
        Self {
            host: pick(self.host, fallback.host),
            username: pick(self.username, fallback.username),
            password: pick(self.password, fallback.password),
        }
    }
}

/// Resolved, validated host/username/password triple.
///
/// All three fields are non-empty. `Debug` redacts the password.
#[derive(Debug, Clone)]
pub struct CredentialSet {
    pub host: String,
    pub username: String,
    pub password: SecretString,
}

/// Merge `explicit` with `env` and validate completeness.
///
/// A declared-but-unknown field is reported as unresolved whatever the
/// environment holds; every other field that ends up empty is reported as
/// missing. Both are collected before failing.
pub fn resolve(
    explicit: &CredentialInput,
    env: &impl EnvironmentLookup,
) -> Result<CredentialSet, ConfigError> {
    let unresolved: Vec<CredentialField> = [
        (CredentialField::Host, explicit.host.is_unknown()),
        (CredentialField::Username, explicit.username.is_unknown()),
        (CredentialField::Password, explicit.password.is_unknown()),
    ]
    .into_iter()
    .filter_map(|(field, unknown)| unknown.then_some(field))
    .collect();

    let host = merge(explicit.host.known().cloned(), env, CredentialField::Host);
    let username = merge(
        explicit.username.known().cloned(),
        env,
        CredentialField::Username,
    );
    let password = explicit
        .password
        .known()
        .cloned()
        .or_else(|| env.var(PASSWORD_ENV).map(SecretString::from))
        .unwrap_or_else(|| SecretString::from(String::new()));

    let missing: Vec<CredentialField> = [
        (CredentialField::Host, host.is_empty()),
        (CredentialField::Username, username.is_empty()),
        (
            CredentialField::Password,
            password.expose_secret().is_empty(),
        ),
    ]
    .into_iter()
    .filter_map(|(field, empty)| (empty && !unresolved.contains(&field)).then_some(field))
    .collect();

    if !unresolved.is_empty() || !missing.is_empty() {
        return Err(ConfigError::Credentials {
            unresolved,
            missing,
        });
    }

    debug!(host = %host, username = %username, "credentials resolved");
    Ok(CredentialSet {
        host,
        username,
        password,
    })
}

fn merge(explicit: Option<String>, env: &impl EnvironmentLookup, field: CredentialField) -> String {
    explicit
        .or_else(|| env.var(field.env_var()))
        .unwrap_or_default()
}
