use serde::{Deserialize, Serialize};
use blog_common::models::BlogPost;
use crate::models::{SortOption, ViewResult};
use crate::pager::{self, PAGE_SIZE};
use crate::pipeline::compute_filtered;

/// 查询状态 - 搜索词、排序方式和当前页码
///
/// 搜索词或排序方式发生变化时页码回到 1，旧页码对应的内容已无意义。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    search_query: String,
    sort_option: SortOption,
    current_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            sort_option: SortOption::NameAsc,
            current_page: 1,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// 更新搜索词，内容变化时回到第一页
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.search_query {
            self.search_query = query;
            self.current_page = 1;
        }
    }

    /// 更新排序方式，变化时回到第一页
    pub fn set_sort_option(&mut self, option: SortOption) {
        if option != self.sort_option {
            self.sort_option = option;
            self.current_page = 1;
        }
    }

    /// 清空搜索框：恢复默认搜索词与排序
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn go_previous(&mut self, page_count: usize) {
        self.current_page = pager::previous_page(self.current_page, page_count);
    }

    pub fn go_next(&mut self, page_count: usize) {
        self.current_page = pager::next_page(self.current_page, page_count);
    }

    /// 跳转到指定页，超出范围时修正
    pub fn go_to(&mut self, page: i64, page_count: usize) {
        self.current_page = pager::clamp_page(page, page_count);
    }
}

/// 搜索视图 - 持有一次性获取的全部文章和当前查询状态
///
/// 作为显式的上下文对象传给展示层，不依赖全局状态。
#[derive(Debug, Clone)]
pub struct SearchView {
    posts: Vec<BlogPost>,
    state: QueryState,
    page_size: usize,
}

impl SearchView {
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self::with_page_size(posts, PAGE_SIZE)
    }

    pub fn with_page_size(posts: Vec<BlogPost>, page_size: usize) -> Self {
        Self {
            posts,
            state: QueryState::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.set_search_query(query);
    }

    pub fn set_sort_option(&mut self, option: SortOption) {
        self.state.set_sort_option(option);
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn previous_page(&mut self) {
        let page_count = self.page_count();
        self.state.go_previous(page_count);
    }

    pub fn next_page(&mut self) {
        let page_count = self.page_count();
        self.state.go_next(page_count);
    }

    pub fn go_to_page(&mut self, page: i64) {
        let page_count = self.page_count();
        self.state.go_to(page, page_count);
    }

    /// 当前查询下的总页数
    pub fn page_count(&self) -> usize {
        let filtered = compute_filtered(&self.posts, &self.state.search_query, self.state.sort_option);
        pager::page_count(filtered.len(), self.page_size)
    }

    /// 重新计算筛选结果和当前页
    pub fn view(&self) -> ViewResult {
        let filtered = compute_filtered(&self.posts, &self.state.search_query, self.state.sort_option);
        let page = pager::compute_page(&filtered, self.page_size, self.state.current_page);
        ViewResult {
            filtered,
            visible: page.visible,
            page_count: page.page_count,
            current_page: self.state.current_page,
        }
    }
}
