use blog_common::logging::init_tracing;
use blog_server::{config, ServerConfig};

#[tokio::main]
async fn main() {
    let matches = config::command().get_matches();
    let config = ServerConfig::from_matches(&matches);

    init_tracing(&config.log_filter);

    if let Err(e) = blog_server::serve(config).await {
        eprintln!("错误: {}", e);
        std::process::exit(1);
    }
}
