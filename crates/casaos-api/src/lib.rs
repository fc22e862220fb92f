// casaos-api: Async Rust client for the CasaOS app-management API

pub mod app_grid;
pub mod client;
pub mod error;
pub mod transport;

pub use app_grid::{APP_GRID_PATH, AppGridEntry, AppTitle, ResponseEnvelope, decode_app_grid};
pub use client::{CasaOsClient, Transport};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};

pub use reqwest::Method;
