//! Turns global flags plus the optional profile file into fetch inputs.
//!
//! Flags are explicit inputs; profile values fill only what the flags left
//! unset. Anything still unset falls through to `CASAOS_*` in the resolver.

use std::path::Path;
use std::time::Duration;

use casaos_config::{Config, ConfigError, CredentialInput, Profile, config_path, load_config};
use casaos_core::{FetchOptions, TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config file and build the credential input and fetch options.
pub fn build_fetch(global: &GlobalOpts) -> Result<(CredentialInput, FetchOptions), CliError> {
    let cfg = load_config()?;
    build_fetch_with(global, &cfg, &config_path())
}

pub fn build_fetch_with(
    global: &GlobalOpts,
    cfg: &Config,
    path: &Path,
) -> Result<(CredentialInput, FetchOptions), CliError> {
    let name = cfg.active_profile_name(global.profile.as_deref());
    let profile = match cfg.profile(&name) {
        Ok(p) => Some(p),
        // Only a profile the user asked for by name has to exist.
        Err(ConfigError::ProfileNotFound { profile }) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile,
                available: available_profiles(cfg),
                path: path.display().to_string(),
            });
        }
        Err(ConfigError::ProfileNotFound { .. }) => None,
        Err(other) => return Err(other.into()),
    };
    tracing::debug!(profile = %name, found = profile.is_some(), "selected profile");

    let mut input = flag_input(global);
    if let Some(p) = profile {
        input = input.or(p.credential_input());
    }

    Ok((input, fetch_options(global, cfg, profile)))
}

fn flag_input(global: &GlobalOpts) -> CredentialInput {
    let mut input = CredentialInput::new();
    if let Some(host) = &global.host {
        input = input.host(host.as_str());
    }
    if let Some(username) = &global.username {
        input = input.username(username.as_str());
    }
    if let Some(password) = &global.password {
        input = input.password(password.as_str());
    }
    input
}

fn fetch_options(global: &GlobalOpts, cfg: &Config, profile: Option<&Profile>) -> FetchOptions {
    let defaults = &cfg.defaults;
    let timeout = global.timeout.map_or_else(
        || profile.map_or(Duration::from_secs(defaults.timeout), |p| p.timeout(defaults)),
        Duration::from_secs,
    );

    let insecure =
        global.insecure || profile.map_or(defaults.insecure, |p| p.insecure(defaults));
    let tls = if insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca)
    } else {
        TlsMode::System
    };

    FetchOptions {
        transport: TransportConfig::default().with_timeout(timeout).with_tls(tls),
        ..FetchOptions::default()
    }
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}
