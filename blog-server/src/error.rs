//! 服务端错误类型
//!
//! [`StoreError`] 描述文档存储的失败，[`ApiError`] 是请求处理的错误，
//! 统一转换为 `{"message": ...}` 响应体。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blog_common::models::ApiMessage;
use thiserror::Error;

/// 文档存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 读写快照文件失败，或快照内容无法解析
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 某个持有锁的线程崩溃，存储状态不再可信
    #[error("Storage lock poisoned")]
    Poisoned,

    /// 执行存储操作的阻塞任务被取消或崩溃
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// 请求处理错误
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Blog not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "请求处理失败");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "请求被拒绝");
        }
        (status, Json(ApiMessage::new(self.to_string()))).into_response()
    }
}

/// 服务启动和运行错误
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(StoreError::Poisoned).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(ApiError::NotFound.to_string(), "Blog not found");
        assert_eq!(
            ApiError::from(StoreError::Poisoned).to_string(),
            "Storage lock poisoned"
        );
    }
}
