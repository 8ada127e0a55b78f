use std::io::{self, BufRead, Write};
use blog_filter::{SearchView, SortOption};
use crate::render::Renderer;

const HELP: &str = "\
命令:
  n            下一页
  p            上一页
  g <页码>     跳转到指定页
  /<关键词>    搜索（单独的 / 清空搜索词）
  s <排序>     排序: name_asc, name_desc, date_asc, date_desc
  c            清空搜索并恢复默认排序
  o <序号>     打开当前页的第 N 篇
  h            帮助
  q            退出";

/// 交互命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    GoTo(i64),
    Search(String),
    Sort(SortOption),
    Clear,
    Open(usize),
    Help,
    Quit,
}

impl BrowseCommand {
    /// 解析一行输入，无法识别时返回 `None`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Some(query) = line.strip_prefix('/') {
            return Some(BrowseCommand::Search(query.trim().to_string()));
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "n" | "next" => Some(BrowseCommand::Next),
            "p" | "prev" => Some(BrowseCommand::Previous),
            "g" | "go" => rest.parse().ok().map(BrowseCommand::GoTo),
            "s" | "sort" if !rest.is_empty() => Some(BrowseCommand::Sort(SortOption::parse(rest))),
            "c" | "clear" => Some(BrowseCommand::Clear),
            "o" | "open" => rest.parse().ok().map(BrowseCommand::Open),
            "h" | "help" | "?" => Some(BrowseCommand::Help),
            "q" | "quit" | "exit" => Some(BrowseCommand::Quit),
            _ => None,
        }
    }
}

/// 交互式浏览，读到 `q` 或输入结束时返回
pub fn run<R: BufRead, W: Write>(
    view: &mut SearchView,
    renderer: &Renderer,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "{}\n", renderer.page(&view.view(), view.state()))?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(output, "> ")?;
            output.flush()?;
            continue;
        }

        let Some(command) = BrowseCommand::parse(&line) else {
            writeln!(output, "无法识别的命令: {}（输入 h 查看帮助）", line.trim())?;
            write!(output, "> ")?;
            output.flush()?;
            continue;
        };
        tracing::debug!(?command, "浏览命令");

        match command {
            BrowseCommand::Quit => return Ok(()),
            BrowseCommand::Help => writeln!(output, "{}", HELP)?,
            BrowseCommand::Open(index) => {
                let current = view.view();
                match index.checked_sub(1).and_then(|i| current.visible.get(i)) {
                    Some(post) => writeln!(output, "{}\n", renderer.post(post))?,
                    None => writeln!(output, "当前页没有第 {} 篇", index)?,
                }
            }
            other => {
                apply(view, other);
                writeln!(output, "{}\n", renderer.page(&view.view(), view.state()))?;
            }
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    Ok(())
}

/// 修改视图状态的命令
fn apply(view: &mut SearchView, command: BrowseCommand) {
    match command {
        BrowseCommand::Next => view.next_page(),
        BrowseCommand::Previous => view.previous_page(),
        BrowseCommand::GoTo(page) => view.go_to_page(page),
        BrowseCommand::Search(query) => view.set_search_query(query),
        BrowseCommand::Sort(option) => view.set_sort_option(option),
        BrowseCommand::Clear => view.clear(),
        BrowseCommand::Open(_) | BrowseCommand::Help | BrowseCommand::Quit => {}
    }
}
