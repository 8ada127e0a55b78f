use std::path::PathBuf;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use blog_common::logging::DEFAULT_FILTER;

/// 服务配置，来自命令行参数或环境变量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 快照文件，未指定时只保存在内存中
    pub data_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            data_path: None,
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        let verbose = matches.get_flag("verbose");
        let log_filter = matches
            .get_one::<String>("log")
            .cloned()
            .unwrap_or(defaults.log_filter);

        Self {
            host: matches.get_one::<String>("host").cloned().unwrap_or(defaults.host),
            port: matches.get_one::<u16>("port").copied().unwrap_or(defaults.port),
            data_path: matches.get_one::<PathBuf>("data").cloned(),
            log_filter: if verbose { "debug".to_string() } else { log_filter },
        }
    }

    /// 监听地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 命令行定义
pub fn command() -> Command {
    Command::new("blog-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("博客文章 REST 服务")
        .arg(Arg::new("host")
            .long("host")
            .env("BLOG_HOST")
            .value_name("HOST")
            .default_value("0.0.0.0")
            .help("监听地址"))
        .arg(Arg::new("port")
            .short('p')
            .long("port")
            .env("PORT")
            .value_name("PORT")
            .value_parser(value_parser!(u16))
            .default_value("5000")
            .help("监听端口"))
        .arg(Arg::new("data")
            .short('d')
            .long("data")
            .env("BLOG_DATA")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("快照文件路径，不指定时数据只保存在内存中"))
        .arg(Arg::new("log")
            .long("log")
            .env("BLOG_LOG")
            .value_name("FILTER")
            .default_value(DEFAULT_FILTER)
            .help("日志过滤规则，例如 info 或 blog_server=debug"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示调试日志")
            .action(ArgAction::SetTrue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let matches = command()
            .try_get_matches_from(["blog-server", "--host", "127.0.0.1", "-p", "8080", "-d", "blogs.bin", "-v"])
            .unwrap();
        let config = ServerConfig::from_matches(&matches);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.data_path, Some(PathBuf::from("blogs.bin")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(command().try_get_matches_from(["blog-server", "--port", "99999"]).is_err());
    }
}
