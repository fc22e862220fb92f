// ── Inventory fetcher ──
//
// resolve → build client → POST app grid → decode → map to records.
// Each stage short-circuits with its own error; nothing is retried or
// cached, so repeated and concurrent calls are independent.

use std::collections::HashSet;

use casaos_api::app_grid::fetch_app_grid;
use casaos_api::{CasaOsClient, ResponseEnvelope, Transport, TransportConfig};
use casaos_config::{CredentialInput, EnvironmentLookup, resolve};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::model::ApplicationRecord;

/// Knobs for one fetcher: how to reach the device and how to read its answer.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub transport: TransportConfig,
    pub envelope: ResponseEnvelope,
}

/// The "list applications" operation.
///
/// Holds only immutable options; share one instance across tasks freely.
#[derive(Debug, Clone, Default)]
pub struct InventoryFetcher {
    options: FetchOptions,
}

impl InventoryFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    /// Resolve credentials, query the device, and return its applications
    /// in device order.
    pub async fn fetch_applications(
        &self,
        input: &CredentialInput,
        env: &impl EnvironmentLookup,
    ) -> Result<Vec<ApplicationRecord>, FetchError> {
        let creds = resolve(input, env)?;
        let client = CasaOsClient::new(
            &creds.host,
            &creds.username,
            &creds.password,
            &self.options.transport,
        )?;
        info!(host = %client.base_url(), "fetching application inventory");
        list_applications(&client, &self.options.envelope).await
    }

    /// [`fetch_applications`](Self::fetch_applications), abandoned as soon as
    /// `cancel` fires. The in-flight request is dropped, not leaked.
    pub async fn fetch_applications_with_cancel(
        &self,
        input: &CredentialInput,
        env: &impl EnvironmentLookup,
        cancel: &CancellationToken,
    ) -> Result<Vec<ApplicationRecord>, FetchError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("application fetch canceled");
                Err(FetchError::Canceled)
            }
            result = self.fetch_applications(input, env) => result,
        }
    }
}

/// Request + decode over an already-built transport.
///
/// Rejects a response in which two entries share a `store_app_id`.
pub async fn list_applications<T: Transport>(
    transport: &T,
    envelope: &ResponseEnvelope,
) -> Result<Vec<ApplicationRecord>, FetchError> {
    let entries = fetch_app_grid(transport, envelope).await?;

    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if !seen.insert(entry.store_app_id.as_str()) {
            return Err(casaos_api::Error::Deserialization {
                message: "duplicate store_app_id".into(),
                index: Some(index),
                store_app_id: Some(entry.store_app_id.clone()),
            }
            .into());
        }
    }

    let records: Vec<ApplicationRecord> =
        entries.into_iter().map(ApplicationRecord::from).collect();
    debug!(count = records.len(), "application inventory decoded");
    Ok(records)
}
