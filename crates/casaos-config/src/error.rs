use strum::IntoEnumIterator;
use thiserror::Error;

use crate::credentials::CredentialField;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Credential resolution failed. `unresolved` fields are declared but
    /// not yet known (the caller's configuration has an open dependency);
    /// `missing` fields are still empty after the environment fallback.
    /// Both lists are always complete, so one error names every field
    /// that needs attention.
    #[error("{}", credentials_message(.unresolved, .missing))]
    Credentials {
        unresolved: Vec<CredentialField>,
        missing: Vec<CredentialField>,
    },

    #[error("profile '{profile}' not found")]
    ProfileNotFound { profile: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    /// Every offending credential field, in host/username/password order.
    pub fn fields(&self) -> Vec<CredentialField> {
        match self {
            Self::Credentials {
                unresolved,
                missing,
            } => CredentialField::iter()
                .filter(|f| unresolved.contains(f) || missing.contains(f))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// One actionable line per offending field, in the order of [`fields`](Self::fields).
    pub fn field_details(&self) -> Vec<String> {
        let Self::Credentials { unresolved, .. } = self else {
            return Vec::new();
        };
        self.fields()
            .into_iter()
            .map(|f| {
                if unresolved.contains(&f) {
                    format!(
                        "{f}: the value is not known yet. Resolve its source first, set it \
                         statically, or use the {} environment variable.",
                        f.env_var()
                    )
                } else {
                    format!(
                        "{f}: no value configured. Set it explicitly or via the {} \
                         environment variable.",
                        f.env_var()
                    )
                }
            })
            .collect()
    }
}

fn credentials_message(unresolved: &[CredentialField], missing: &[CredentialField]) -> String {
    let mut parts = Vec::with_capacity(2);
    if !unresolved.is_empty() {
        parts.push(format!("unresolved {}", field_list(unresolved)));
    }
    if !missing.is_empty() {
        parts.push(format!("missing {}", field_list(missing)));
    }
    format!("incomplete credentials: {}", parts.join("; "))
}

fn field_list(fields: &[CredentialField]) -> String {
    fields
        .iter()
        .map(|f| format!("{f} ({})", f.env_var()))
        .collect::<Vec<_>>()
        .join(", ")
}
