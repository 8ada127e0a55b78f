use wasm_bindgen::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use web_sys::console;
use blog_common::models::BlogPost;

// 导出模块
pub mod models;
pub mod pager;
pub mod pipeline;
pub mod view;

pub use models::{PageResult, SortOption, ViewResult};
pub use pager::{clamp_page, compute_page, next_page, previous_page, PAGE_SIZE};
pub use pipeline::compute_filtered;
pub use view::{QueryState, SearchView};

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 从 JS 值解析
fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| js_error(format!("解析{}失败: {}", what, e)))
}

/// 序列化为 JS 值
fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| js_error(format!("序列化{}失败: {}", what, e)))
}

/// 记录到控制台并转换为 JS Error
fn js_error(message: String) -> JsValue {
    console::log_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

/// JS 传入的页码为浮点数，NaN 视为 0，其余向零截断
fn page_from_js(page: f64) -> i64 {
    if page.is_nan() {
        0
    } else {
        page as i64
    }
}

/// 博客筛选器JS接口 - 无状态的筛选、分页和页码修正
#[wasm_bindgen]
pub struct BlogFilterJS;

#[wasm_bindgen]
impl BlogFilterJS {
    /// 筛选并排序文章
    #[wasm_bindgen(js_name = computeFiltered)]
    pub fn compute_filtered(posts: JsValue, search_query: &str, sort_option: &str) -> Result<JsValue, JsValue> {
        let posts: Vec<BlogPost> = from_js(posts, "文章列表")?;
        let filtered = pipeline::compute_filtered(&posts, search_query, SortOption::parse(sort_option));
        to_js(&filtered, "筛选结果")
    }

    /// 切出指定页，返回 `{ visible, pageCount }`
    #[wasm_bindgen(js_name = computePage)]
    pub fn compute_page(filtered: JsValue, page_size: usize, current_page: usize) -> Result<JsValue, JsValue> {
        let filtered: Vec<BlogPost> = from_js(filtered, "筛选结果")?;
        let page = pager::compute_page(&filtered, page_size, current_page);
        to_js(&page, "分页结果")
    }

    /// 修正页码到有效范围
    #[wasm_bindgen(js_name = clampPage)]
    pub fn clamp_page(page: f64, page_count: usize) -> usize {
        pager::clamp_page(page_from_js(page), page_count)
    }
}

/// 搜索视图JS接口 - 持有文章集合与查询状态的对象
#[wasm_bindgen]
pub struct SearchViewJS {
    inner: SearchView,
}

#[wasm_bindgen]
impl SearchViewJS {
    #[wasm_bindgen(constructor)]
    pub fn new(posts: JsValue) -> Result<SearchViewJS, JsValue> {
        let posts: Vec<BlogPost> = from_js(posts, "文章列表")?;
        Ok(SearchViewJS {
            inner: SearchView::new(posts),
        })
    }

    #[wasm_bindgen(js_name = setSearchQuery)]
    pub fn set_search_query(&mut self, query: &str) {
        self.inner.set_search_query(query);
    }

    #[wasm_bindgen(js_name = setSortOption)]
    pub fn set_sort_option(&mut self, sort_option: &str) {
        self.inner.set_sort_option(SortOption::parse(sort_option));
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(js_name = previousPage)]
    pub fn previous_page(&mut self) {
        self.inner.previous_page();
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) {
        self.inner.next_page();
    }

    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&mut self, page: f64) {
        self.inner.go_to_page(page_from_js(page));
    }

    /// 当前查询状态
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.state(), "查询状态")
    }

    /// 当前视图：`{ filtered, visible, pageCount, currentPage }`
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.view(), "视图")
    }
}
