use std::time::Duration;

use abi::ApiConfig;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Error;

/// Thin JSON client for the admin backend.
///
/// Attaches the bearer token when one is set and maps the status codes the
/// callers care about (401, 404) to dedicated errors.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let resp = self.send(self.request(Method::GET, endpoint).query(query)).await?;
        Ok(resp.json().await?)
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let resp = self.send(self.request(Method::POST, endpoint).json(body)).await?;
        Ok(resp.json().await?)
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let resp = self.send(self.request(Method::PUT, endpoint).json(body)).await?;
        Ok(resp.json().await?)
    }

    pub async fn delete(&self, endpoint: &str) -> Result<(), Error> {
        self.send(self.request(Method::DELETE, endpoint)).await?;
        Ok(())
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.config.url(endpoint);
        debug!("{} {}", method, url);
        let req = self.http.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, Error> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::NOT_FOUND => Err(Error::NotFound),
            _ => {
                let message = resp
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
                if status.is_server_error() {
                    warn!("server error {}: {}", status, message);
                }
                Err(Error::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
