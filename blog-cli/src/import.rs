use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use walkdir::WalkDir;
use blog_common::models::NewBlogPost;
use crate::error::ClientError;

/// 单个文件里可以是一篇文章，也可以是文章数组
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<NewBlogPost>),
    One(NewBlogPost),
}

/// 扫描结果
#[derive(Debug, Default)]
pub struct ScanResult {
    /// 成功解析的文章及其来源文件
    pub posts: Vec<(PathBuf, NewBlogPost)>,
    /// 无法读取或解析的文件
    pub failures: Vec<ClientError>,
}

/// 递归扫描目录下的 `.json` 文件，按路径排序
pub fn scan_json_files(dir: &Path) -> Result<ScanResult, ClientError> {
    let mut result = ScanResult::default();

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ClientError::Io(e.into()))?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "json") {
            files.push(entry.into_path());
        }
    }

    for path in files {
        match parse_file(&path) {
            Ok(posts) => {
                tracing::debug!(path = %path.display(), count = posts.len(), "已解析");
                result.posts.extend(posts.into_iter().map(|post| (path.clone(), post)));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "跳过文件");
                result.failures.push(e);
            }
        }
    }

    Ok(result)
}

fn parse_file(path: &Path) -> Result<Vec<NewBlogPost>, ClientError> {
    let text = fs::read_to_string(path)?;
    let parsed: ImportFile = serde_json::from_str(&text).map_err(|source| ClientError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match parsed {
        ImportFile::Many(posts) => posts,
        ImportFile::One(post) => vec![post],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_single_posts_and_arrays() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"title":"One","tags":["x"]}"#).unwrap();
        fs::create_dir(dir.path().join("more")).unwrap();
        fs::write(
            dir.path().join("more").join("b.json"),
            r#"[{"title":"Two"},{"title":"Three","author":null}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let result = scan_json_files(dir.path()).unwrap();
        let titles: Vec<&str> = result.posts.iter().map(|(_, p)| p.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn collects_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{ nope").unwrap();
        fs::write(dir.path().join("good.json"), r#"{"title":"Fine"}"#).unwrap();

        let result = scan_json_files(dir.path()).unwrap();
        assert_eq!(result.posts.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert!(matches!(result.failures[0], ClientError::Json { .. }));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_json_files(&dir.path().join("absent")).is_err());
    }
}
