use serde::{Deserialize, Serialize};
use std::fmt;
use blog_common::models::BlogPost;

/// 排序方式
///
/// 日期标签沿用搜索页菜单的含义：`date_asc` 为"最新优先"，
/// `date_desc` 为"最早优先"。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum SortOption {
    /// 标题 A→Z
    #[default]
    NameAsc,
    /// 标题 Z→A
    NameDesc,
    /// 最新优先
    DateAsc,
    /// 最早优先
    DateDesc,
    /// 不排序，保持原有顺序
    Unsorted,
}

impl SortOption {
    /// 所有可选的排序方式（不含 `Unsorted`）
    pub const ALL: [SortOption; 4] = [
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::DateAsc,
        SortOption::DateDesc,
    ];

    /// 解析排序标签，未知值视为不排序
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "name_asc" => SortOption::NameAsc,
            "name_desc" => SortOption::NameDesc,
            "date_asc" => SortOption::DateAsc,
            "date_desc" => SortOption::DateDesc,
            _ => SortOption::Unsorted,
        }
    }

    /// 排序标签
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::DateAsc => "date_asc",
            SortOption::DateDesc => "date_desc",
            SortOption::Unsorted => "none",
        }
    }

    /// 菜单显示名称
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "Title A to Z",
            SortOption::NameDesc => "Title Z to A",
            SortOption::DateAsc => "Latest First",
            SortOption::DateDesc => "Oldest First",
            SortOption::Unsorted => "Unsorted",
        }
    }
}

impl From<&str> for SortOption {
    fn from(label: &str) -> Self {
        SortOption::parse(label)
    }
}

impl From<String> for SortOption {
    fn from(label: String) -> Self {
        SortOption::parse(&label)
    }
}

impl From<SortOption> for String {
    fn from(option: SortOption) -> Self {
        option.as_str().to_string()
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分页结果
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// 当前页可见的条目
    pub visible: Vec<T>,
    /// 总页数，无结果时为 0
    pub page_count: usize,
}

/// 搜索视图的派生结果，每次查询状态变化后重新计算
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewResult {
    /// 筛选并排序后的全部文章
    pub filtered: Vec<BlogPost>,
    /// 当前页的文章
    pub visible: Vec<BlogPost>,
    /// 总页数
    pub page_count: usize,
    /// 当前页码
    pub current_page: usize,
}

impl ViewResult {
    /// 匹配的文章总数
    pub fn total(&self) -> usize {
        self.filtered.len()
    }
}
