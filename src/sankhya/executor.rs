use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, SankhyaError};
use crate::sankhya::session::TokenManager;

/// 带令牌的请求执行器
///
/// 401/403 时清除令牌并返回 [`SankhyaError::SessionExpired`]，不在内部重试；
/// 调用方再次调用 [`execute`](RequestExecutor::execute) 时会重新登录。
#[derive(Clone)]
pub struct RequestExecutor {
    http: reqwest::Client,
    tokens: Arc<TokenManager>,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new(http: reqwest::Client, tokens: Arc<TokenManager>, timeout: Duration) -> Self {
        Self {
            http,
            tokens,
            timeout,
        }
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        url: &str,
        method: Method,
        body: &B,
    ) -> Result<Value> {
        let token = self.tokens.get_token().await?;

        let response = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("Sankhya rejected the session ({}), clearing token", status);
            self.tokens.invalidate().await;
            return Err(SankhyaError::SessionExpired);
        }

        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.get("statusMessage"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(SankhyaError::Transport(message));
        }

        Ok(response.json().await?)
    }
}
