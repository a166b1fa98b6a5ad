use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::format::{AverageSalaryRequest, AverageSalaryResponse, FilterOptionsResponse, LookupResponse};
use crate::types::Dimension;

/// Thin HTTP client for the salary survey API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// `--server`, then SALARY_API_URL, then localhost on the configured port
    pub fn from_cli(server: Option<&str>) -> Self {
        match server {
            Some(url) => Self::new(url),
            None => match std::env::var("SALARY_API_URL") {
                Ok(url) => Self::new(url),
                Err(_) => Self::new(format!("http://127.0.0.1:{}", crate::config::config().api.port)),
            },
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Health body and status; a degraded server still answers with JSON
    pub async fn health(&self) -> Result<(StatusCode, Value)> {
        let res = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn info(&self) -> Result<Value> {
        let res = self.http.get(format!("{}/", self.base_url)).send().await?;
        Self::decode(res).await
    }

    pub async fn average_salary(&self, request: &AverageSalaryRequest) -> Result<AverageSalaryResponse> {
        let res = self
            .http
            .post(format!("{}/api/salaries/average-salary", self.base_url))
            .json(request)
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn filter_options(&self) -> Result<FilterOptionsResponse> {
        let res = self
            .http
            .get(format!("{}/api/salaries/filters", self.base_url))
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn lookup(&self, dimension: Dimension, needle: &str) -> Result<LookupResponse> {
        let res = self
            .http
            .get(format!("{}/api/salaries/lookup/{}", self.base_url, dimension))
            .query(&[("q", needle)])
            .send()
            .await?;
        Self::decode(res).await
    }

    async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T> {
        let status = res.status();
        if status.is_success() {
            return res.json::<T>().await.context("unexpected response body");
        }

        let body: Value = res.json().await.unwrap_or(Value::Null);
        let error = body.get("error").and_then(Value::as_str).unwrap_or("no error detail");
        match body.get("message").and_then(Value::as_str) {
            Some(message) => bail!("{} ({}): {}", message, status, error),
            None => bail!("request failed ({}): {}", status, error),
        }
    }
}
