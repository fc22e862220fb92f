//! Application inventory pipeline between `casaos-api` and its callers.
//!
//! - **[`InventoryFetcher`]**: resolves credentials, builds a
//!   [`CasaOsClient`](casaos_api::CasaOsClient), issues the single app-grid
//!   request, and decodes it. Every call starts from scratch; nothing is
//!   cached between calls.
//!
//! - **[`list_applications`]**: the request + decode stages alone, over any
//!   injected [`Transport`](casaos_api::Transport).
//!
//! - **Domain model** ([`model`]): [`ApplicationRecord`] / [`TitleVariant`],
//!   serialized with the stable field names callers bind to.
//!
//! - **[`FetchError`]**: carries the failing stage's error unchanged;
//!   [`FetchError::kind`] classifies it.

pub mod convert;
pub mod error;
pub mod fetcher;
pub mod model;

pub use error::{ErrorKind, FetchError};
pub use fetcher::{FetchOptions, InventoryFetcher, list_applications};
pub use model::{ApplicationRecord, TitleVariant, index_by_id};

pub use casaos_api::{ResponseEnvelope, TlsMode, TransportConfig};
pub use casaos_config::{
    ConfigValue, CredentialField, CredentialInput, EnvironmentLookup, MapEnv, ProcessEnv,
};
pub use tokio_util::sync::CancellationToken;
