use std::time::Duration;

use admin_core::{DropdownOption, RemoteSearchQuery, ServerReply};
use admin_logging::{admin_debug, admin_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};

use crate::{FailureKind, RequestFailure};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// The admin endpoints the page talks to.
#[async_trait::async_trait]
pub trait AdminClient: Send + Sync {
    async fn delete(&self, url: &str) -> Result<ServerReply, RequestFailure>;

    async fn bulk_delete(&self, url: &str, ids: &[String]) -> Result<ServerReply, RequestFailure>;

    async fn remote_search(
        &self,
        url: &str,
        query: &RemoteSearchQuery,
    ) -> Result<Vec<DropdownOption>, RequestFailure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestFailure> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestFailure::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Sends the request and returns the status and body of a 2xx answer.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(u16, String), RequestFailure> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_body_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_body_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&bytes).into_owned();

        if !status.is_success() {
            return Err(
                RequestFailure::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_body(body),
            );
        }
        Ok((status.as_u16(), body))
    }

    async fn mutate(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ServerReply, RequestFailure> {
        let (status, body) = self.send(request).await?;
        ServerReply::parse(&body).map_err(|err| {
            RequestFailure::new(FailureKind::Decode { status }, err.to_string()).with_body(body)
        })
    }

    fn too_large(&self, actual: Option<u64>) -> RequestFailure {
        RequestFailure::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_body_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl AdminClient for ReqwestClient {
    async fn delete(&self, url: &str) -> Result<ServerReply, RequestFailure> {
        let url = parse_url(url)?;
        admin_debug!("DELETE {}", url);
        let request = self
            .client
            .request(Method::DELETE, url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);
        self.mutate(request).await
    }

    async fn bulk_delete(&self, url: &str, ids: &[String]) -> Result<ServerReply, RequestFailure> {
        let url = parse_url(url)?;
        admin_debug!("POST {} ids={}", url, ids.len());
        let body = serde_json::json!({ "ids": ids }).to_string();
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body);
        self.mutate(request).await
    }

    async fn remote_search(
        &self,
        url: &str,
        query: &RemoteSearchQuery,
    ) -> Result<Vec<DropdownOption>, RequestFailure> {
        let mut url = parse_url(url)?;
        query.apply_to(&mut url);
        let (status, body) = self.send(self.client.get(url).header(ACCEPT, JSON)).await?;
        serde_json::from_str(&body).map_err(|err| {
            admin_warn!("Lookup for {} returned an unreadable body: {}", query.name, err);
            RequestFailure::new(FailureKind::Decode { status }, err.to_string()).with_body(body)
        })
    }
}

fn parse_url(url: &str) -> Result<Url, RequestFailure> {
    Url::parse(url).map_err(|err| RequestFailure::new(FailureKind::InvalidUrl, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> RequestFailure {
    if err.is_timeout() {
        return RequestFailure::new(FailureKind::Timeout, err.to_string());
    }
    RequestFailure::new(FailureKind::Network, err.to_string())
}
