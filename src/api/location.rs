//! Provides a client for the location management API.
//!
//! This module defines the `LocationClient` struct and its methods for listing,
//! fetching, creating, updating and deleting location records.

use crate::error::{AppError, Result};
use crate::models::{Location, LocationPayload};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

/// Base URL used when `LOCCTL_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Every request is abandoned after this long. Not configurable.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const LOCATION_PATH: &str = "/api/location";

/// An asynchronous client for the location API.
pub struct LocationClient {
    client: Client,
    base_url: String,
}

impl LocationClient {
    /// Creates a new `LocationClient` talking to `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client with a short timeout.
    ///
    /// This is primarily intended for testing timeout handling against a stalled server.
    #[cfg(test)]
    pub fn new_with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::with_timeout(base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, LOCATION_PATH)
    }

    /// URL of a single location. The id is pushed as one percent-encoded
    /// path segment, so `/`, `#` and `?` stay part of the id.
    fn item_url(&self, id: &str) -> Result<Url> {
        let collection = self.collection_url();
        let mut url = Url::parse(&collection)
            .map_err(|e| AppError::Usage(format!("Invalid API URL {}: {}", collection, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Usage(format!("Invalid API URL {}", collection)))?
            .push(id);
        Ok(url)
    }

    /// Fetches every registered location.
    ///
    /// Corresponds to `GET /api/location`.
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        let url = self.collection_url();
        info!("Listing locations from {}", url);

        let body = send(self.client.get(&url), &url).await?;
        let locations: Vec<Location> = serde_json::from_str(&body).map_err(|e| {
            error!("Error parsing location list JSON: {}", e);
            AppError::from(e)
        })?;

        debug!("Received {} locations", locations.len());
        Ok(locations)
    }

    /// Fetches a single location as the server sent it.
    ///
    /// Returns `None` when the server answers with an empty body or a JSON
    /// value that is empty or zero (`null`, `{}`, `[]`, `""`, `false`, `0`),
    /// which is how it reports an unknown id.
    pub async fn get_location(&self, id: &str) -> Result<Option<Value>> {
        let url = self.item_url(id)?;
        info!("Fetching location {} from {}", id, url);

        let body = send(self.client.get(url.clone()), url.as_str()).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Error parsing location {} JSON: {}", id, e);
            AppError::from(e)
        })?;
        if is_blank(&value) {
            debug!("Location {} not found", id);
            return Ok(None);
        }

        Ok(Some(value))
    }

    /// Registers a new location and returns the raw response body.
    ///
    /// Corresponds to `POST /api/location`.
    pub async fn create_location(&self, payload: &LocationPayload) -> Result<String> {
        let url = self.collection_url();
        info!(
            "Creating location {} at {}",
            payload.id().unwrap_or("<no id>"),
            url
        );
        send(self.client.post(&url).json(payload), &url).await
    }

    /// Replaces the details of location `id` and returns the raw response body.
    ///
    /// Corresponds to `PUT /api/location/{id}`.
    pub async fn update_location(&self, id: &str, payload: &LocationPayload) -> Result<String> {
        let url = self.item_url(id)?;
        info!("Updating location {} at {}", id, url);
        send(self.client.put(url.clone()).json(payload), url.as_str()).await
    }

    /// Removes location `id` and returns the raw response body.
    ///
    /// Corresponds to `DELETE /api/location/{id}`.
    pub async fn delete_location(&self, id: &str) -> Result<String> {
        let url = self.item_url(id)?;
        info!("Deleting location {} at {}", id, url);
        send(self.client.delete(url.clone()), url.as_str()).await
    }
}

/// Whether `value` is one of the empty answers the server gives for an unknown id.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Sends one request and returns the body of a 2xx response.
///
/// Transport failures are classified by `From<reqwest::Error>`; non-2xx
/// responses become `AppError::HttpStatus` carrying the body. Never retries.
async fn send(request: RequestBuilder, url: &str) -> Result<String> {
    let response = request.send().await.map_err(|e| {
        error!("Request to {} failed: {}", url, e);
        AppError::from(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        // The status is the error; a body we cannot read is reported as empty.
        let body = response.text().await.unwrap_or_default();
        error!("API request to {} failed with status {}", url, status);
        return Err(AppError::HttpStatus {
            status,
            url: url.to_string(),
            body,
        });
    }

    let body = response.text().await?;
    debug!("Received {} bytes from {}", body.len(), url);
    Ok(body)
}
