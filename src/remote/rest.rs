use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

use super::{RemoteError, TaskStore};
use crate::model::{NewRecord, Record, RecordId, RecordPatch, RemoteConfig};

/// Error body returned by PostgREST: `{message, code, details, hint}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// A [`TaskStore`] backed by a hosted table's REST endpoint.
///
/// Requests block the calling thread; the TUI runs them on worker threads.
pub struct RestStore {
    client: Client,
    /// `{url}/rest/v1/{table}`
    endpoint: String,
}

impl RestStore {
    pub fn new(
        url: &str,
        api_key: &str,
        table: &str,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let invalid_key = |_| RemoteError::Transport("api key is not a valid header value".into());
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(api_key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(invalid_key)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(RestStore {
            client,
            endpoint: table_endpoint(url, table),
        })
    }

    pub fn from_config(remote: &RemoteConfig) -> Result<Self, RemoteError> {
        Self::new(
            &remote.url,
            &remote.api_key,
            &remote.table,
            Duration::from_secs(remote.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a request, turning transport failures and non-2xx statuses into
    /// [`RemoteError`]s.
    fn send(&self, request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request
            .send()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        Err(RemoteError::http(status.as_u16(), message))
    }
}

/// Build the table endpoint, tolerating a trailing slash on the project URL
pub fn table_endpoint(url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", url.trim_end_matches('/'), table)
}

fn id_filter(id: RecordId) -> [(&'static str, String); 1] {
    [("id", format!("eq.{}", id))]
}

impl TaskStore for RestStore {
    fn fetch_all(&self) -> Result<Vec<Record>, RemoteError> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.send(request)?
            .json::<Vec<Record>>()
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    fn insert(&self, task: &str) -> Result<Record, RemoteError> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("Prefer", "return=representation")
            .json(&[NewRecord { task }]);
        let rows = self
            .send(request)?
            .json::<Vec<Record>>()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RemoteError::Decode("insert returned no row".into()))
    }

    fn update(&self, id: RecordId, task: &str) -> Result<(), RemoteError> {
        let request = self
            .client
            .patch(&self.endpoint)
            .query(&id_filter(id))
            .json(&RecordPatch { task });
        self.send(request).map(|_| ())
    }

    fn delete(&self, id: RecordId) -> Result<(), RemoteError> {
        let request = self.client.delete(&self.endpoint).query(&id_filter(id));
        self.send(request).map(|_| ())
    }
}
