//! HTTP transport - network communication
//!
//! Thin reqwest wrapper: attaches the session cookie automatically via the
//! cookie store, sends `Accept: application/json`, and maps non-2xx
//! statuses onto `ClientError`. No retries, no caching.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::client::ApiEnvelope;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Cookie-session HTTP transport to the booking backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a non-success status to an error, otherwise decodes the JSON body.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response.text().await?));
        }
        Ok(response.json().await?)
    }

    /// Like `handle_response` but discards any body (204-style endpoints).
    async fn handle_empty(&self, response: Response) -> ClientResult<()> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response.text().await?));
        }
        Ok(())
    }

    fn status_error(status: StatusCode, text: String) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            s if s.is_client_error() => ClientError::Api(text),
            _ => ClientError::Internal(text),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Form-encoded POST with no interesting body (login).
    pub async fn post_form<B: Serialize + Sync>(&self, path: &str, form: &B) -> ClientResult<()> {
        let response = self.client.post(self.url(path)).form(form).send().await?;
        self.handle_empty(response).await
    }

    /// Bodyless POST with no interesting response (logout).
    pub async fn post_empty(&self, path: &str) -> ClientResult<()> {
        let response = self.client.post(self.url(path)).send().await?;
        self.handle_empty(response).await
    }

    /// JSON POST where the response body is ignored.
    pub async fn post_ignored<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        self.handle_empty(response).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<ApiEnvelope> {
        let response = self.client.delete(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    // ---- `{status, data}` envelope variants ----

    pub async fn get_enveloped<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let envelope: ApiEnvelope = self.get(path).await?;
        unwrap_envelope(envelope)
    }

    pub async fn post_enveloped<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let envelope: ApiEnvelope = self.post(path, body).await?;
        unwrap_envelope(envelope)
    }

    pub async fn delete_enveloped(&self, path: &str) -> ClientResult<()> {
        let envelope = self.delete(path).await?;
        if !envelope.is_ok() {
            return Err(ClientError::Api(envelope.error_message()));
        }
        Ok(())
    }
}

/// The backend wraps most payloads in `{status, data}`; a 200 with
/// `status != "ok"` is still a failed operation.
fn unwrap_envelope<T: DeserializeOwned>(envelope: ApiEnvelope) -> ClientResult<T> {
    if !envelope.is_ok() {
        return Err(ClientError::Api(envelope.error_message()));
    }
    envelope.decode().map_err(ClientError::from)
}
