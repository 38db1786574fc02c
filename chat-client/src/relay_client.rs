//! HTTP client for the study relay.
//!
//! - GET  {base}/api/health
//! - GET  {base}/api/topics
//! - POST {base}/api/ask

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_RELAY_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("relay base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),

    #[error("relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Topic as served by the relay.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TopicEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthReply {
    pub status: String,
    pub service: String,
    pub version: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct AskBody<'a> {
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AskReply {
    pub answer: String,
    #[serde(default)]
    pub topic: String,
    pub timestamp: DateTime<Utc>,
}

/// Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct RelayClient {
    http: reqwest::Client,
    base: String,
}

impl RelayClient {
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let base = base.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base.to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base: base.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub async fn health(&self) -> Result<HealthReply, ClientError> {
        let resp = self.http.get(format!("{}/api/health", self.base)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn topics(&self) -> Result<Vec<TopicEntry>, ClientError> {
        let resp = self.http.get(format!("{}/api/topics", self.base)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn ask(&self, question: &str, topic: Option<&str>) -> Result<AskReply, ClientError> {
        debug!(question_len = question.len(), topic = topic.unwrap_or(""), "POST /api/ask");
        let resp = self
            .http
            .post(format!("{}/api/ask", self.base))
            .json(&AskBody { question, topic })
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_base() {
        assert!(matches!(
            RelayClient::new("localhost:8080"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn trims_trailing_slash() {
        let c = RelayClient::new("http://localhost:8080/").unwrap();
        assert_eq!(c.base_url(), "http://localhost:8080");
    }

    #[test]
    fn ask_body_omits_missing_topic() {
        let body = serde_json::to_value(AskBody {
            question: "What is Docker?",
            topic: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"question": "What is Docker?"}));
    }
}
