//! HTTP client for the RetailOps REST API.
//!
//! Attaches the stored bearer token, decodes `{ data, errors? }` and
//! `{ data, pagination }` envelopes and maps HTTP failures to [`ClientError`].

pub mod envelope;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::storage::{ClientStorage, keys};

pub use envelope::{Envelope, ServerErrors};

/// Pause before the single query retry.
const RETRY_DELAY: Duration = Duration::from_millis(200);

/// Query-string pairs, already canonicalized.
pub type QueryPairs = [(String, String)];

pub const NO_QUERY: &QueryPairs = &[];

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn ClientStorage>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, storage: Arc<dyn ClientStorage>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = self.storage.get(keys::TOKEN).await? {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    /// GET a body decoded as `T`. Transport failures and 5xx are retried once.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &QueryPairs) -> ClientResult<T> {
        let mut attempt = 0;
        loop {
            let result = async {
                let resp = self
                    .request(Method::GET, path)
                    .await?
                    .query(query)
                    .send()
                    .await?;
                decode::<T>(resp).await
            }
            .await;

            match result {
                Err(err) if attempt == 0 && err.is_retryable() => {
                    tracing::warn!(path, error = %err, "query failed, retrying once");
                    attempt += 1;
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                other => return other,
            }
        }
    }

    /// GET a `{ data }` envelope and return `data`.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str, query: &QueryPairs) -> ClientResult<T> {
        let envelope: Envelope = self.get_json(path, query).await?;
        unwrap_data(envelope)
    }

    /// Send a JSON body and return the envelope's `data`. Never retried.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.request(method, path).await?.json(body).send().await?;
        let envelope: Envelope = decode(resp).await?;
        unwrap_data(envelope)
    }

    /// DELETE; any 2xx is success, including an empty body. Never retried.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let resp = self.request(Method::DELETE, path).await?.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        if let Ok(envelope) = serde_json::from_str::<Envelope>(&body) {
            if envelope.has_errors() {
                return Err(envelope_error(status, &envelope));
            }
        }
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(format!("{e} (status {status})")))
}

fn unwrap_data<T: DeserializeOwned>(envelope: Envelope) -> ClientResult<T> {
    if envelope.has_errors() {
        return Err(envelope_error(StatusCode::UNPROCESSABLE_ENTITY, &envelope));
    }
    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    Ok(serde_json::from_value(data)?)
}

fn envelope_error(status: StatusCode, envelope: &Envelope) -> ClientError {
    ClientError::Api {
        status: status.as_u16(),
        message: envelope.error_message(),
    }
}

/// Map a non-2xx response to an error, pulling the server message if any.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<Envelope>(body)
        .ok()
        .and_then(|e| e.error_message())
        .or_else(|| status.canonical_reason().map(str::to_string));

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized { message },
        StatusCode::FORBIDDEN => ClientError::Forbidden { message },
        StatusCode::NOT_FOUND => ClientError::NotFound { message },
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
