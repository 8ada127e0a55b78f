pub mod compression;
pub mod format;
#[cfg(feature = "logging")]
pub mod logging;
pub mod models;

// 重新导出常用模块和函数，方便直接使用
pub use compression::{to_compressed, from_compressed, from_compressed_with_max_version, to_binary, from_binary};
pub use format::{excerpt, format_date, split_paragraphs, PARAGRAPH_LENGTH};
pub use models::{ApiMessage, BlogPost, NewBlogPost, StoredBlog};
