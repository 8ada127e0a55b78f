use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// 博客文章 - 服务端返回、客户端展示的完整记录
///
/// 除 `_id` 外的字段都可能缺失、为 `null` 或类型不符，解码时统一退化为
/// 空文本或空列表，无法解析的时间戳退化为缺失。
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BlogPost {
    /// 文章唯一标识符
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// 文章标题
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// 文章正文
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// 作者
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    /// 标签列表，保持原有顺序
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    /// 封面图片 URI
    #[serde(default)]
    pub image: Option<String>,
    /// 创建时间
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    /// 最后更新时间
    #[serde(rename = "updatedAt", default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 创建文章的请求体
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NewBlogPost {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewBlogPost {
    /// 分配标识符和时间戳，生成可保存的文章
    pub fn into_post(self, id: String, now: DateTime<Utc>) -> BlogPost {
        BlogPost {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
            tags: self.tags,
            image: self.image,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// 接口返回的提示信息，错误响应和删除结果都使用此结构
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 快照中的文章记录
///
/// 只使用 bincode 能直接表示的字段类型，时间戳存为毫秒。
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoredBlog {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub created_at_ms: Option<i64>,
    pub updated_at_ms: Option<i64>,
}

impl From<&BlogPost> for StoredBlog {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            tags: post.tags.clone(),
            image: post.image.clone(),
            created_at_ms: post.created_at.map(|t| t.timestamp_millis()),
            updated_at_ms: post.updated_at.map(|t| t.timestamp_millis()),
        }
    }
}

impl From<StoredBlog> for BlogPost {
    fn from(stored: StoredBlog) -> Self {
        Self {
            id: stored.id,
            title: stored.title,
            content: stored.content,
            author: stored.author,
            tags: stored.tags,
            image: stored.image,
            created_at: stored.created_at_ms.and_then(DateTime::<Utc>::from_timestamp_millis),
            updated_at: stored.updated_at_ms.and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}

/// 任意 JSON 值：字符串保留，其余类型（包括 `null`）视为缺失
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Other(IgnoredAny),
}

impl LenientText {
    fn into_text(self) -> String {
        match self {
            LenientText::Text(text) => text,
            LenientText::Other(_) => String::new(),
        }
    }
}

/// 标签字段：只有数组才被当作标签列表
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientTags {
    List(Vec<LenientText>),
    Other(IgnoredAny),
}

/// 时间字段：RFC 3339 字符串或毫秒时间戳
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientTime {
    Text(String),
    Millis(i64),
    Float(f64),
    Other(IgnoredAny),
}

/// 非字符串（包括 `null`）视为空文本
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LenientText::deserialize(deserializer)?.into_text())
}

/// 非数组视为空列表，非字符串的标签视为空文本
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientTags::deserialize(deserializer)? {
        LenientTags::List(tags) => tags.into_iter().map(LenientText::into_text).collect(),
        LenientTags::Other(_) => Vec::new(),
    })
}

/// 数字按毫秒时间戳解析，其余无法解析的值视为缺失
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientTime::deserialize(deserializer)? {
        LenientTime::Text(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        LenientTime::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms),
        LenientTime::Float(ms) if ms.is_finite() => DateTime::<Utc>::from_timestamp_millis(ms as i64),
        LenientTime::Float(_) | LenientTime::Other(_) => None,
    })
}
