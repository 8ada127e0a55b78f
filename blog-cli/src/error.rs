use std::path::PathBuf;
use thiserror::Error;

/// 客户端错误
#[derive(Debug, Error)]
pub enum ClientError {
    /// 无法连接服务或请求超时
    #[error("请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// 服务返回非成功状态码
    #[error("服务返回 {status}: {message}")]
    Status { status: u16, message: String },

    #[error("无效的服务地址 {0}")]
    InvalidUrl(String),

    #[error("找不到文章 {0}")]
    NotFound(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("无法解析 {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }

    /// 无法连接服务，重试可能有效
    pub fn is_transport(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}
