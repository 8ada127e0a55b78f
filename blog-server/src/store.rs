use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use chrono::Utc;
use uuid::Uuid;
use blog_common::compression::{from_compressed, to_compressed, SNAPSHOT_VERSION};
use blog_common::models::{BlogPost, NewBlogPost, StoredBlog};
use crate::error::StoreError;

/// 文档存储 - 按插入顺序保存文章
///
/// 指定快照文件时，启动时加载快照，每次修改后整体重写快照；
/// 写入失败时撤销本次修改。
#[derive(Debug)]
pub struct BlogStore {
    posts: RwLock<Vec<BlogPost>>,
    path: Option<PathBuf>,
}

impl BlogStore {
    /// 只保存在内存中的存储
    pub fn in_memory() -> Self {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: Vec<BlogPost>) -> Self {
        Self {
            posts: RwLock::new(posts),
            path: None,
        }
    }

    /// 打开快照文件，文件不存在时从空集合开始
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let posts = if path.exists() {
            let data = fs::read(&path)?;
            let stored: Vec<StoredBlog> = from_compressed(&data)?;
            stored.into_iter().map(BlogPost::from).collect()
        } else {
            Vec::new()
        };

        tracing::info!(path = %path.display(), count = posts.len(), "已加载快照");

        Ok(Self {
            posts: RwLock::new(posts),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    /// 所有文章，按插入顺序
    pub fn find_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        Ok(self.read()?.clone())
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<BlogPost>, StoreError> {
        Ok(self.read()?.iter().find(|post| post.id == id).cloned())
    }

    /// 保存新文章，分配标识符和创建时间
    pub fn insert(&self, new_post: NewBlogPost) -> Result<BlogPost, StoreError> {
        let post = new_post.into_post(Uuid::new_v4().simple().to_string(), Utc::now());

        let mut posts = self.write()?;
        posts.push(post.clone());
        if let Err(e) = self.persist(&posts) {
            posts.pop();
            return Err(e);
        }

        Ok(post)
    }

    /// 删除文章，返回被删除的文章；不存在时返回 `None`
    pub fn delete_by_id(&self, id: &str) -> Result<Option<BlogPost>, StoreError> {
        let mut posts = self.write()?;
        let Some(index) = posts.iter().position(|post| post.id == id) else {
            return Ok(None);
        };

        let removed = posts.remove(index);
        if let Err(e) = self.persist(&posts) {
            posts.insert(index, removed);
            return Err(e);
        }

        Ok(Some(removed))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<BlogPost>>, StoreError> {
        self.posts.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<BlogPost>>, StoreError> {
        self.posts.write().map_err(|_| StoreError::Poisoned)
    }

    /// 先写临时文件再重命名，避免留下半截快照
    fn persist(&self, posts: &[BlogPost]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let stored: Vec<StoredBlog> = posts.iter().map(StoredBlog::from).collect();
        let data = to_compressed(&stored, SNAPSHOT_VERSION)?;

        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, &data)?;
        fs::rename(&tmp_path, path)?;

        tracing::debug!(path = %path.display(), count = posts.len(), bytes = data.len(), "快照已写入");
        Ok(())
    }
}

impl Default for BlogStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
