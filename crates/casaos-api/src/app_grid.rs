// App-management web app grid
//
// `POST /v2/app_management/web/appgrid` lists every application the device
// manages. Decoding is split from the request so the same strict parser
// serves any transport and can be exercised without a server.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::client::Transport;
use crate::error::Error;

/// Device path of the app-grid endpoint.
pub const APP_GRID_PATH: &str = "/v2/app_management/web/appgrid";

// ── Wire models ──────────────────────────────────────────────────────

/// One application entry as the device serializes it.
///
/// Every scalar is required; unknown keys are ignored. camelCase aliases
/// cover firmware that emits `storeAppId` / `isUncontrolled` instead of
/// the snake_case keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppGridEntry {
    #[serde(alias = "storeAppId")]
    pub store_app_id: String,
    #[serde(alias = "appType")]
    pub app_type: String,
    #[serde(alias = "authorType")]
    pub author_type: String,
    pub hostname: String,
    pub icon: String,
    pub image: String,
    pub index: String,
    #[serde(alias = "isUncontrolled")]
    pub is_uncontrolled: bool,
    pub port: String,
    pub scheme: String,
    pub status: String,
    /// Locale-keyed display names, in device order. Absent means none.
    #[serde(default, alias = "titles")]
    pub title: Vec<AppTitle>,
}

/// A `{custom, en_us}` display-name pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppTitle {
    pub custom: String,
    #[serde(alias = "enUS")]
    pub en_us: String,
}

// ── Envelope ─────────────────────────────────────────────────────────

/// Top-level shape of the app-grid response body.
///
/// CasaOS v2 endpoints usually answer with `{"message": "...", "data": [...]}`,
/// older builds and proxies with a bare array. `Auto` accepts both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResponseEnvelope {
    /// The body is the array itself.
    BareArray,
    /// The array sits under the named field of a top-level object.
    Wrapped { field: String },
    /// Bare array, or an object carrying the array under `data`.
    #[default]
    Auto,
}

impl ResponseEnvelope {
    pub fn wrapped(field: impl Into<String>) -> Self {
        Self::Wrapped {
            field: field.into(),
        }
    }

    /// Pull the entry array out of a parsed body.
    ///
    /// A `null` under the wrapper field is an empty grid; anything else
    /// that is not an array fails.
    fn entries(&self, root: Value) -> Result<Vec<Value>, Error> {
        match (self, root) {
            (Self::BareArray | Self::Auto, Value::Array(items)) => Ok(items),
            (Self::BareArray, other) => Err(Error::malformed(format!(
                "expected a JSON array at top level, found {}",
                json_type(&other)
            ))),
            (Self::Wrapped { field }, Value::Object(mut map)) => {
                take_array(map.remove(field.as_str()), field)
            }
            (Self::Auto, Value::Object(mut map)) => take_array(map.remove("data"), "data"),
            (Self::Wrapped { field }, other) => Err(Error::malformed(format!(
                "expected a JSON object with field '{field}', found {}",
                json_type(&other)
            ))),
            (Self::Auto, other) => Err(Error::malformed(format!(
                "expected a JSON array or an object with field 'data', found {}",
                json_type(&other)
            ))),
        }
    }
}

fn take_array(value: Option<Value>, field: &str) -> Result<Vec<Value>, Error> {
    match value {
        Some(Value::Array(items)) => Ok(items),
        Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(Error::malformed(format!(
            "field '{field}' must be an array, found {}",
            json_type(&other)
        ))),
        None => Err(Error::malformed(format!("missing field '{field}'"))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Decoding ─────────────────────────────────────────────────────────

/// Decode a raw app-grid body into entries, preserving device order.
///
/// All-or-nothing: the first malformed element fails the whole decode
/// with its position (and `store_app_id`, when readable) attached.
pub fn decode_app_grid(raw: &[u8], envelope: &ResponseEnvelope) -> Result<Vec<AppGridEntry>, Error> {
    let root: Value = serde_json::from_slice(raw).map_err(|e| {
        let body = String::from_utf8_lossy(raw);
        let preview = crate::error::truncate(&body, 200);
        Error::malformed(format!("{e} (body preview: {preview:?})"))
    })?;

    let items = envelope.entries(root)?;
    trace!(count = items.len(), "decoding app grid entries");

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let store_app_id = item
                .get("store_app_id")
                .or_else(|| item.get("storeAppId"))
                .and_then(Value::as_str)
                .map(str::to_owned);
            serde_json::from_value(item).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                index: Some(index),
                store_app_id,
            })
        })
        .collect()
}

/// Request the app grid over `transport` and decode it.
///
/// The device expects a JSON body; an empty object is sufficient.
pub async fn fetch_app_grid<T: Transport>(
    transport: &T,
    envelope: &ResponseEnvelope,
) -> Result<Vec<AppGridEntry>, Error> {
    let body = Value::Object(serde_json::Map::new());
    let raw = transport
        .send(Method::POST, APP_GRID_PATH, Some(&body))
        .await?;
    debug!(bytes = raw.len(), "app grid response received");
    decode_app_grid(&raw, envelope)
}
