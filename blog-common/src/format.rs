use chrono::{DateTime, Datelike, Utc};

/// 文章详情页每段的最大字符数
pub const PARAGRAPH_LENGTH: usize = 1200;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// 格式化发布日期，例如 `March 1st, 2024`
pub fn format_date(date: &DateTime<Utc>) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {}, {}", month, ordinal(date.day()), date.year())
}

/// 日期序数后缀，11/12/13 例外
fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day) {
        (1, d) if d != 11 => "st",
        (2, d) if d != 12 => "nd",
        (3, d) if d != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

/// 按字符数切分正文
pub fn split_paragraphs(content: &str, length: usize) -> Vec<String> {
    let length = length.max(1);
    let chars: Vec<char> = content.chars().collect();
    chars.chunks(length).map(|chunk| chunk.iter().collect()).collect()
}

/// 摘要：超出部分用省略号代替
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}
