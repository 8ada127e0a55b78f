//! 博客命令行客户端
//!
//! 一次性获取全部文章，在本地完成搜索、排序和分页。

pub mod app;
pub mod browse;
pub mod client;
pub mod error;
pub mod import;
pub mod render;
pub mod theme;

pub use client::{BlogClient, DEFAULT_API_URL};
pub use error::ClientError;
pub use render::Renderer;
pub use theme::{Theme, ThemeSettings};
