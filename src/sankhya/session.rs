use std::time::Duration;

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::ServiceCredentials;
use crate::error::{Result, SankhyaError};

/// 登录失败时错误消息中保留的上游响应字符数
const MAX_UPSTREAM_DETAIL: usize = 512;

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "bearerToken")]
    bearer_token: Option<String>,
    token: Option<String>,
}

/// Sankhya 令牌管理
///
/// 令牌没有本地过期时间，一直缓存到某次请求返回 401/403 后被 [`invalidate`] 清除，
/// 下一次 [`get_token`] 重新登录。锁不会跨越登录请求持有，并发的首次请求可能各自
/// 登录一次，最后写入的令牌生效。
///
/// [`invalidate`]: TokenManager::invalidate
/// [`get_token`]: TokenManager::get_token
pub struct TokenManager {
    http: reqwest::Client,
    login_url: String,
    credentials: ServiceCredentials,
    timeout: Duration,
    token: RwLock<Option<String>>,
}

impl TokenManager {
    pub fn new(
        http: reqwest::Client,
        login_url: impl Into<String>,
        credentials: ServiceCredentials,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            login_url: login_url.into(),
            credentials,
            timeout,
            token: RwLock::new(None),
        }
    }

    /// 返回缓存的令牌，没有时登录获取
    pub async fn get_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }

        match self.login().await {
            Ok(token) => {
                *self.token.write().await = Some(token.clone());
                tracing::info!("Sankhya session established");
                Ok(token)
            }
            Err(e) => {
                self.invalidate().await;
                tracing::error!("Sankhya login failed: {}", e);
                Err(e)
            }
        }
    }

    /// 清除缓存的令牌
    pub async fn invalidate(&self) {
        if self.token.write().await.take().is_some() {
            tracing::debug!("Sankhya token invalidated");
        }
    }

    pub async fn is_cached(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn login(&self) -> Result<String> {
        tracing::debug!("Logging in to Sankhya at {}", self.login_url);

        let response = self
            .http
            .post(&self.login_url)
            .header("token", &self.credentials.token)
            .header("appkey", &self.credentials.appkey)
            .header("username", &self.credentials.username)
            .header("password", &self.credentials.password)
            .json(&serde_json::json!({}))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SankhyaError::Authentication(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SankhyaError::Authentication(format!(
                "login returned {}: {}",
                status,
                upstream_detail(&body)
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| SankhyaError::Authentication(e.to_string()))?;

        body.bearer_token
            .filter(|t| !t.is_empty())
            .or(body.token.filter(|t| !t.is_empty()))
            .ok_or_else(|| {
                SankhyaError::Authentication("token not found in login response".to_string())
            })
    }
}

/// 上游错误页可能很大，只保留开头部分
fn upstream_detail(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_UPSTREAM_DETAIL {
        return body.to_string();
    }
    let mut detail: String = body.chars().take(MAX_UPSTREAM_DETAIL).collect();
    detail.push_str("...");
    detail
}
