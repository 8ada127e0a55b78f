use std::cmp::Ordering;
use blog_common::models::BlogPost;
use icu_collator::{Collator, CollatorOptions, Strength};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use crate::models::SortOption;

/// 筛选并排序文章，不修改输入
///
/// 查询去除首尾空白并转为小写后，与标题、正文、作者和每个标签做子串匹配，
/// 任一命中即保留。空查询不做筛选。排序是稳定的。
pub fn compute_filtered(posts: &[BlogPost], search_query: &str, sort_option: SortOption) -> Vec<BlogPost> {
    let query = search_query.trim().to_lowercase();

    let mut filtered: Vec<BlogPost> = if query.is_empty() {
        posts.to_vec()
    } else {
        posts
            .iter()
            .filter(|post| matches_query(post, &query))
            .cloned()
            .collect()
    };

    apply_sorting(&mut filtered, sort_option);
    filtered
}

/// `query` 须已小写并去除空白
fn matches_query(post: &BlogPost, query: &str) -> bool {
    let surfaces = [&post.title, &post.content, &post.author];
    surfaces
        .iter()
        .any(|field| field.to_lowercase().trim().contains(query))
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

// 应用排序
fn apply_sorting(posts: &mut [BlogPost], sort_option: SortOption) {
    match sort_option {
        SortOption::NameAsc => sort_by_title(posts, false),
        SortOption::NameDesc => sort_by_title(posts, true),
        SortOption::DateAsc => {
            posts.sort_by(|a, b| created_millis(b).cmp(&created_millis(a)));
        }
        SortOption::DateDesc => {
            posts.sort_by(|a, b| created_millis(a).cmp(&created_millis(b)));
        }
        SortOption::Unsorted => {}
    }
}

/// 缺失的创建时间按 Unix 纪元处理
fn created_millis(post: &BlogPost) -> i64 {
    post.created_at.map(|t| t.timestamp_millis()).unwrap_or(0)
}

/// 按标题的语言排序规则排序
///
/// 使用 Unicode 根区域的排序规则，"Æ"、"Ø"、"ß" 等字母排在对应的拉丁字母附近。
/// 比较强度为二级：区分变音符号，不区分大小写，仅大小写不同的标题保持原有顺序。
fn sort_by_title(posts: &mut [BlogPost], descending: bool) {
    let Some(collator) = title_collator() else {
        if descending {
            posts.sort_by_cached_key(|post| std::cmp::Reverse(TitleKey::new(&post.title)));
        } else {
            posts.sort_by_cached_key(|post| TitleKey::new(&post.title));
        }
        return;
    };

    posts.sort_by(|a, b| {
        let order = collator.compare(&a.title, &b.title);
        if descending {
            order.reverse()
        } else {
            order
        }
    });
}

fn title_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(&Default::default(), options).ok()
}

/// 排序规则数据不可用时的退化排序键
///
/// 先比较去除变音符号后的小写标题，相同时再比较完整的小写标题。
#[derive(Debug, Clone, PartialEq, Eq)]
struct TitleKey {
    primary: String,
    lowered: String,
}

impl TitleKey {
    fn new(title: &str) -> Self {
        let lowered = title.to_lowercase();
        let primary = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
        Self { primary, lowered }
    }
}

impl Ord for TitleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then_with(|| self.lowered.cmp(&other.lowered))
    }
}

impl PartialOrd for TitleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
