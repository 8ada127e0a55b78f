use std::time::Duration;
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use blog_common::models::{ApiMessage, BlogPost, NewBlogPost};
use crate::error::ClientError;

/// 默认服务地址
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// 博客服务客户端
#[derive(Debug, Clone)]
pub struct BlogClient {
    base: Url,
    http: Client,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// 获取全部文章
    pub fn list(&self) -> Result<Vec<BlogPost>, ClientError> {
        let url = self.endpoint(&["blogs"])?;
        tracing::debug!(%url, "获取文章列表");
        decode(self.http.get(url).send()?)
    }

    pub fn get(&self, id: &str) -> Result<BlogPost, ClientError> {
        let url = self.endpoint(&["blogs", id])?;
        tracing::debug!(%url, "获取文章");
        decode(self.http.get(url).send()?)
    }

    pub fn create(&self, post: &NewBlogPost) -> Result<BlogPost, ClientError> {
        let url = self.endpoint(&["blogs"])?;
        tracing::debug!(%url, title = %post.title, "创建文章");
        decode(self.http.post(url).json(post).send()?)
    }

    /// 删除文章，返回服务端的提示信息
    pub fn delete(&self, id: &str) -> Result<String, ClientError> {
        let url = self.endpoint(&["blogs", id])?;
        tracing::debug!(%url, "删除文章");
        let message: ApiMessage = decode(self.http.delete(url).send()?)?;
        Ok(message.message)
    }

    /// 在基础地址后追加路径段，段内的特殊字符会被转义
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// 成功时解析响应体，失败时尽量取出服务端的 `message`
fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }

    let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
    let message = response
        .json::<ApiMessage>()
        .map(|m| m.message)
        .unwrap_or(fallback);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_and_escapes_segments() {
        let client = BlogClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.endpoint(&["blogs"]).unwrap().as_str(), "http://localhost:5000/blogs");
        assert_eq!(
            client.endpoint(&["blogs", "a/b"]).unwrap().as_str(),
            "http://localhost:5000/blogs/a%2Fb"
        );

        let nested = BlogClient::new("http://example.com/api").unwrap();
        assert_eq!(nested.endpoint(&["blogs", "42"]).unwrap().as_str(), "http://example.com/api/blogs/42");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(BlogClient::new("not a url"), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(BlogClient::new("mailto:someone@example.com"), Err(ClientError::InvalidUrl(_))));
    }
}
