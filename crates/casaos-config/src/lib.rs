//! Credential resolution and profile configuration for CasaOS tools.
//!
//! [`resolve`] merges explicit inputs with environment defaults into a
//! validated [`CredentialSet`], reporting every unresolved or missing field
//! in one [`ConfigError`]. The [`profile`] module loads optional TOML
//! profiles that callers turn into explicit inputs.

pub mod credentials;
pub mod env;
pub mod error;
pub mod profile;

pub use credentials::{ConfigValue, CredentialField, CredentialInput, CredentialSet, resolve};
pub use env::{EnvironmentLookup, MapEnv, ProcessEnv};
pub use error::ConfigError;
pub use profile::{Config, Defaults, Profile, config_path, load_config, load_config_from};

/// Environment variable supplying the device host.
pub const HOST_ENV: &str = "CASAOS_HOST";
/// Environment variable supplying the username.
pub const USERNAME_ENV: &str = "CASAOS_USERNAME";
/// Environment variable supplying the password.
pub const PASSWORD_ENV: &str = "CASAOS_PASSWORD";
