use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Sankhya 客户端操作的结果类型
pub type Result<T> = std::result::Result<T, SankhyaError>;

/// Sankhya 客户端错误
#[derive(Error, Debug)]
pub enum SankhyaError {
    /// 登录失败或登录响应中没有令牌
    #[error("Sankhya authentication failed: {0}")]
    Authentication(String),

    /// 令牌在请求过程中被拒绝 (401/403)，调用方可以重试一次
    #[error("Session expired, try again")]
    SessionExpired,

    /// 网络错误、超时或非认证类 HTTP 错误
    #[error("Sankhya communication failed: {0}")]
    Transport(String),

    /// 写入成功但回读时找不到新记录
    #[error("Record created but could not be read back: {0}")]
    RecordNotFound(String),

    /// 保存接口返回的 statusMessage，原样抛出
    #[error("{0}")]
    Rejected(String),

    /// 响应结构无法解析
    #[error("Malformed Sankhya response: {0}")]
    Decode(String),
}

impl SankhyaError {
    /// 会话过期是唯一可以通过重新调用恢复的错误
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

impl From<reqwest::Error> for SankhyaError {
    fn from(e: reqwest::Error) -> Self {
        SankhyaError::Transport(e.to_string())
    }
}

/// HTTP 层错误
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Upstream(SankhyaError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<SankhyaError> for AppError {
    fn from(e: SankhyaError) -> Self {
        AppError::Upstream(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_verbatim() {
        let err = SankhyaError::Rejected("Campo APELIDO obrigatório".to_string());
        assert_eq!(err.to_string(), "Campo APELIDO obrigatório");
    }

    #[test]
    fn only_session_expired_is_recoverable() {
        assert!(SankhyaError::SessionExpired.is_session_expired());
        assert!(!SankhyaError::Authentication("bad".into()).is_session_expired());
        assert!(!SankhyaError::Transport("timeout".into()).is_session_expired());
    }

    #[test]
    fn upstream_errors_map_to_500() {
        let response = AppError::from(SankhyaError::RecordNotFound("X".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::BadRequest("Tipo não especificado".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
