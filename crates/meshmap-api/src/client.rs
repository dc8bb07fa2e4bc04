// Backend HTTP client
//
// Every endpoint comes in two flavors: a fallible `fetch_*` method that
// returns `Result<_, Error>`, and a fail-soft method that logs the failure
// and returns the endpoint's empty value (`[]`, `None`, `{}`).

use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::endpoints::Endpoints;
use crate::error::{Error, json_type_name};
use crate::transport::TransportConfig;

/// HTTP client for the map backend's read-only endpoints.
pub struct MeshApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl MeshApiClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(endpoints: Endpoints, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoints })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(endpoints: Endpoints, http: reqwest::Client) -> Self {
        Self { http, endpoints }
    }

    /// The endpoint layout this client talks to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ── Fallible requests ────────────────────────────────────────────

    /// `GET {gps}:{node_id}`, expecting a JSON array of track points.
    pub async fn fetch_gps_track(&self, node_id: &str) -> Result<Vec<Value>, Error> {
        match self.get_json(&self.endpoints.gps_url(node_id)).await? {
            Value::Array(points) => Ok(points),
            other => Err(Error::UnexpectedShape {
                expected: "array",
                found: json_type_name(&other),
            }),
        }
    }

    /// `GET {device_metrics}:{node_id}`. A JSON `null` body is `None`.
    pub async fn fetch_device_metrics(&self, node_id: &str) -> Result<Option<Value>, Error> {
        let value = self
            .get_json(&self.endpoints.device_metrics_url(node_id))
            .await?;
        Ok(non_null(value))
    }

    /// `GET {environment_metrics}:{node_id}`. A JSON `null` body is `None`.
    pub async fn fetch_environment_metrics(&self, node_id: &str) -> Result<Option<Value>, Error> {
        let value = self
            .get_json(&self.endpoints.environment_metrics_url(node_id))
            .await?;
        Ok(non_null(value))
    }

    /// `GET {main}/devices`, expecting a JSON object keyed by device.
    pub async fn fetch_all_devices(&self) -> Result<Map<String, Value>, Error> {
        match self.get_json(&self.endpoints.devices_url()).await? {
            Value::Object(devices) => Ok(devices),
            other => Err(Error::UnexpectedShape {
                expected: "object",
                found: json_type_name(&other),
            }),
        }
    }

    // ── Fail-soft requests ───────────────────────────────────────────

    /// GPS track for a node, or an empty track on any failure.
    pub async fn gps_track(&self, node_id: &str) -> Vec<Value> {
        self.fetch_gps_track(node_id).await.unwrap_or_else(|e| {
            warn!(
                error = %e,
                transient = e.is_transient(),
                node_id,
                "failed to fetch GPS track"
            );
            Vec::new()
        })
    }

    /// Device metrics for a node, or `None` on any failure.
    pub async fn device_metrics(&self, node_id: &str) -> Option<Value> {
        self.fetch_device_metrics(node_id).await.unwrap_or_else(|e| {
            warn!(
                error = %e,
                transient = e.is_transient(),
                node_id,
                "failed to fetch device metrics"
            );
            None
        })
    }

    /// Environment metrics for a node, or `None` on any failure.
    pub async fn environment_metrics(&self, node_id: &str) -> Option<Value> {
        self.fetch_environment_metrics(node_id)
            .await
            .unwrap_or_else(|e| {
                warn!(
                    error = %e,
                    transient = e.is_transient(),
                    node_id,
                    "failed to fetch environment metrics"
                );
                None
            })
    }

    /// Every device the backend knows about, or an empty map on any failure.
    pub async fn all_devices(&self) -> Map<String, Value> {
        self.fetch_all_devices().await.unwrap_or_else(|e| {
            warn!(
                error = %e,
                transient = e.is_transient(),
                "failed to fetch device list"
            );
            Map::new()
        })
    }

    // ── Request helper ───────────────────────────────────────────────

    /// Send a GET request and parse the body as JSON.
    async fn get_json(&self, raw_url: &str) -> Result<Value, Error> {
        let url = Url::parse(raw_url)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })
    }
}

fn non_null(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        other => Some(other),
    }
}
