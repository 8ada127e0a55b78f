//! 博客文章 REST 服务
//!
//! `/blogs` 上的增删查直接映射到 [`store::BlogStore`]，不含其他业务逻辑。

use std::sync::Arc;
use tokio::net::TcpListener;

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, StoreError};
pub use routes::{router, SharedStore};
pub use store::BlogStore;

/// 按配置打开存储并开始监听
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let store = match &config.data_path {
        Some(path) => BlogStore::open(path)?,
        None => {
            tracing::warn!("未指定快照文件，数据只保存在内存中");
            BlogStore::in_memory()
        }
    };

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "服务已启动");
    serve_with_listener(listener, Arc::new(store)).await
}

/// 在已绑定的监听器上提供服务，收到 Ctrl-C 后退出
pub async fn serve_with_listener(listener: TcpListener, store: SharedStore) -> Result<(), ServerError> {
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("收到退出信号，正在关闭服务"),
        Err(e) => {
            tracing::warn!(error = %e, "无法监听退出信号");
            std::future::pending::<()>().await;
        }
    }
}
