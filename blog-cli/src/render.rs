use colored::Colorize;
use blog_common::format::{excerpt, format_date, split_paragraphs, PARAGRAPH_LENGTH};
use blog_common::models::BlogPost;
use blog_filter::{QueryState, ViewResult};
use crate::theme::{Palette, Theme};

/// 卡片摘要的最大字符数，约等于三行
pub const EXCERPT_CHARS: usize = 240;

/// 终端渲染器，主题由调用方传入
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            palette: theme.palette(),
        }
    }

    /// 搜索结果页：查询条件、页码和当前页的卡片
    pub fn page(&self, view: &ViewResult, state: &QueryState) -> String {
        let mut lines = Vec::new();

        let sort = state.sort_option().label();
        let criteria = if state.search_query().trim().is_empty() {
            format!("排序: {}", sort)
        } else {
            format!("搜索: \"{}\"  排序: {}", state.search_query(), sort)
        };
        lines.push(self.palette.text(&criteria).to_string());

        let pages = format!(
            "第 {} 页，共 {} 页（{} 篇）",
            view.current_page,
            view.page_count,
            view.total()
        );
        lines.push(self.palette.accent(&pages).bold().to_string());
        lines.push(String::new());

        if view.visible.is_empty() {
            lines.push(self.palette.text("没有找到文章，请调整筛选条件。").to_string());
        } else {
            for (i, post) in view.visible.iter().enumerate() {
                lines.push(self.card(i + 1, post));
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }

    /// 单篇文章的摘要卡片
    pub fn card(&self, index: usize, post: &BlogPost) -> String {
        let title = format!("{:>2}. {}", index, post.title.trim().to_uppercase());
        let mut lines = vec![self.palette.accent(&title).bold().to_string()];

        let summary = excerpt(post.content.trim(), EXCERPT_CHARS);
        if !summary.is_empty() {
            lines.push(format!("    {}", self.palette.text(&summary).italic()));
        }

        let byline = format!("由 {} 发布于 {}", display_author(post), published(post));
        lines.push(format!("    {}", self.palette.text(&byline)));
        lines.join("\n")
    }

    /// 文章详情：标题、作者和日期、图片、分段正文、标签
    pub fn post(&self, post: &BlogPost) -> String {
        let mut lines = vec![
            self.palette.accent(post.title.trim()).bold().to_string(),
            self.palette
                .text(&format!("{}, {}", display_author(post), published(post)))
                .to_string(),
        ];

        if let Some(image) = post.image.as_deref().filter(|uri| !uri.trim().is_empty()) {
            lines.push(self.palette.text(&format!("图片: {}", image)).to_string());
        }

        for paragraph in split_paragraphs(&post.content, PARAGRAPH_LENGTH) {
            lines.push(String::new());
            lines.push(self.palette.text(&paragraph).to_string());
        }

        if !post.tags.is_empty() {
            let tags = post
                .tags
                .iter()
                .map(|tag| format!("[{}]", tag))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(String::new());
            lines.push(format!("{} {}", self.palette.text("标签:"), self.palette.accent(&tags)));
        }

        lines.join("\n")
    }

    /// 获取失败时的提示
    pub fn fetch_error(&self, error: &dyn std::fmt::Display, base_url: &str) -> String {
        format!(
            "{}\n{}",
            format!("获取文章失败: {}", error).red(),
            self.palette.text(&format!("请确认服务 {} 可用后重试。", base_url))
        )
    }
}

fn display_author(post: &BlogPost) -> &str {
    let author = post.author.trim();
    if author.is_empty() {
        "匿名"
    } else {
        author
    }
}

fn published(post: &BlogPost) -> String {
    post.created_at
        .as_ref()
        .map(format_date)
        .unwrap_or_else(|| "日期未知".to_string())
}
