//! HTTP backend
//!
//! Every request is a form-encoded POST to a single endpoint, carrying the
//! discriminator field `r`. Reads are retried on transport failures with
//! exponential backoff; writes are sent exactly once.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{CoreError, CoreResult};
use crate::traits::Backend;
use crate::types::{
    AddPatchResponse, AuxResponse, FormPairs, ModuleWireUpdate, PatchForm, PortInfoResponse,
    RequestKind, SearchQuery, SearchResponse, SiteLookup, StatusResponse, SwitchListResponse,
    UseCpResponse,
};
use crate::utils::log_sanitizer::truncate_for_log;

const LOG_TAG: &str = "backend";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries for idempotent requests
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: Url,
    max_retries: u32,
}

impl HttpBackend {
    /// Create a backend for `endpoint`
    ///
    /// # Arguments
    /// * `endpoint` - backend URL, e.g. `http://localhost/spam/api/v0/`
    /// * `timeout` - per-request timeout
    pub fn new(endpoint: &str, timeout: Duration) -> CoreResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CoreError::Validation(format!("Invalid backend URL '{endpoint}': {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build(&self, kind: RequestKind, pairs: &FormPairs) -> RequestBuilder {
        let mut form: FormPairs = Vec::with_capacity(pairs.len() + 1);
        form.push(("r".to_string(), kind.as_str().to_string()));
        form.extend(pairs.iter().cloned());
        self.client.post(self.endpoint.clone()).form(&form)
    }

    /// Send a request and parse its JSON body
    async fn post<T>(&self, kind: RequestKind, pairs: FormPairs) -> CoreResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.build(kind, &pairs);
        let retries = if kind.is_idempotent() {
            self.max_retries
        } else {
            0
        };
        let body = execute_request_with_retry(request, kind, retries).await?;
        parse_json(&body, kind)
    }
}

/// Performs one request and returns the response text
///
/// 502/503/504 are reported as `Network` so that reads can be retried.
async fn execute_request(request: RequestBuilder, kind: RequestKind) -> CoreResult<String> {
    log::debug!("[{LOG_TAG}] POST r={kind}");

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            CoreError::Timeout(format!("r={kind}: {e}"))
        } else {
            CoreError::Network(format!("r={kind}: {e}"))
        }
    })?;

    let status_code = response.status().as_u16();
    log::debug!("[{LOG_TAG}] Response Status: {status_code}");

    if matches!(status_code, 502..=504) {
        let body = response.text().await.unwrap_or_default();
        log::warn!("[{LOG_TAG}] Server error (HTTP {status_code}) for r={kind}");
        return Err(CoreError::Network(format!(
            "HTTP {status_code}: {}",
            truncate_for_log(&body)
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|e| CoreError::Network(format!("Failed to read response body: {e}")))?;

    log::debug!("[{LOG_TAG}] Response Body: {}", truncate_for_log(&text));

    if !(200..300).contains(&status_code) {
        return Err(CoreError::Backend {
            request: kind.to_string(),
            message: format!("HTTP {status_code}"),
        });
    }

    Ok(text)
}

/// Performs a request, retrying transport failures
///
/// # Retry strategy
/// - Only `Network` and `Timeout` are retried
/// - Exponential backoff: 100ms, 200ms, 400ms, ... (maximum 10 seconds)
async fn execute_request_with_retry(
    request: RequestBuilder,
    kind: RequestKind,
    max_retries: u32,
) -> CoreResult<String> {
    if max_retries == 0 {
        return execute_request(request, kind).await;
    }

    let mut last_error = None;

    for attempt in 0..=max_retries {
        let Some(req) = request.try_clone() else {
            log::warn!("[{LOG_TAG}] Cannot clone request, disabling retry");
            return execute_request(request, kind).await;
        };

        match execute_request(req, kind).await {
            Ok(body) => return Ok(body),
            Err(e) if attempt < max_retries && e.is_retryable() => {
                let delay = backoff_delay(attempt);
                log::warn!(
                    "[{}] r={} failed (attempt {}/{}), retrying in {:.1}s: {}",
                    LOG_TAG,
                    kind,
                    attempt + 1,
                    max_retries,
                    delay.as_secs_f32(),
                    e
                );
                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error
        .unwrap_or_else(|| CoreError::Network("All retries exhausted with no error captured".into())))
}

/// Parse a JSON response body
fn parse_json<T>(body: &str, kind: RequestKind) -> CoreResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("[{LOG_TAG}] JSON parse failed for r={kind}: {e}");
        log::error!("[{LOG_TAG}] Raw response: {}", truncate_for_log(body));
        CoreError::Parse(format!("r={kind}: {e}"))
    })
}

/// Exponential backoff: 100ms doubling, capped at 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}

fn host_port(host: &str, portname: &str) -> FormPairs {
    vec![
        ("host".to_string(), host.to_string()),
        ("portname".to_string(), portname.to_string()),
    ]
}

#[async_trait]
impl Backend for HttpBackend {
    async fn aux(&self) -> CoreResult<AuxResponse> {
        self.post(RequestKind::Aux, Vec::new()).await
    }

    async fn switch_list(&self) -> CoreResult<SwitchListResponse> {
        self.post(RequestKind::Swlist, Vec::new()).await
    }

    async fn search(&self, query: &SearchQuery) -> CoreResult<SearchResponse> {
        self.post(RequestKind::Search, query.params.clone()).await
    }

    async fn port_info(&self, host: &str, portname: &str) -> CoreResult<PortInfoResponse> {
        self.post(RequestKind::Portinfo, host_port(host, portname))
            .await
    }

    async fn add_patch(&self, form: &PatchForm) -> CoreResult<AddPatchResponse> {
        self.post(RequestKind::Addpatch, form.to_pairs()).await
    }

    async fn delete_patch(&self, host: &str, portname: &str) -> CoreResult<StatusResponse> {
        self.post(RequestKind::Delpatch, host_port(host, portname))
            .await
    }

    async fn use_cp(&self, lookup: &SiteLookup) -> CoreResult<UseCpResponse> {
        self.post(RequestKind::Usecp, lookup.to_pairs()).await
    }

    async fn module_wire(&self, update: &ModuleWireUpdate) -> CoreResult<StatusResponse> {
        self.post(RequestKind::Modwire, update.to_pairs()).await
    }
}
