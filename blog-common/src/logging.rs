use tracing_subscriber::EnvFilter;

/// 默认日志级别
pub const DEFAULT_FILTER: &str = "info";

/// 初始化日志输出到标准错误
///
/// `filter` 使用 `EnvFilter` 语法（如 `info`、`blog_server=debug`），
/// 无法解析时退回默认级别。重复调用只有第一次生效。
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    tracing::debug!(filter, "日志已初始化");
}
