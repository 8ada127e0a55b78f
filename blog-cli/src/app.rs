use std::io;
use std::path::PathBuf;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use blog_common::models::NewBlogPost;
use blog_filter::{compute_filtered, compute_page, QueryState, SearchView, SortOption, ViewResult, PAGE_SIZE};
use crate::browse;
use crate::client::{BlogClient, DEFAULT_API_URL};
use crate::error::ClientError;
use crate::import::scan_json_files;
use crate::render::Renderer;
use crate::theme::{Theme, ThemeSettings};

/// 命令行定义
pub fn command() -> Command {
    Command::new("blog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("博客文章命令行客户端")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(Arg::new("api_url")
            .long("api-url")
            .env("BLOG_API_URL")
            .value_name("URL")
            .default_value(DEFAULT_API_URL)
            .global(true)
            .help("服务地址"))
        .arg(Arg::new("theme")
            .long("theme")
            .value_name("THEME")
            .value_parser(["dark", "light"])
            .global(true)
            .help("本次使用的主题，不修改已保存的设置"))
        .arg(Arg::new("log")
            .long("log")
            .env("BLOG_LOG")
            .value_name("FILTER")
            .default_value("warn")
            .global(true)
            .help("日志过滤规则"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .global(true)
            .help("显示调试日志"))
        .subcommand(Command::new("list")
            .about("搜索、排序并分页列出文章")
            .arg(Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .default_value("")
                .help("匹配标题、正文、作者或标签"))
            .arg(Arg::new("sort")
                .short('s')
                .long("sort")
                .value_name("SORT")
                .default_value("name_asc")
                .help("name_asc, name_desc, date_asc（最新优先）, date_desc（最早优先）"))
            .arg(Arg::new("page")
                .short('p')
                .long("page")
                .value_name("PAGE")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("1")
                .help("页码，超出范围时自动修正")))
        .subcommand(Command::new("show")
            .about("查看文章详情")
            .arg(Arg::new("id").required(true).value_name("ID")))
        .subcommand(Command::new("create")
            .about("发布新文章")
            .arg(Arg::new("title").long("title").required(true).value_name("TITLE"))
            .arg(Arg::new("content").long("content").required(true).value_name("TEXT"))
            .arg(Arg::new("author").long("author").required(true).value_name("NAME"))
            .arg(Arg::new("tag")
                .short('t')
                .long("tag")
                .value_name("TAG")
                .action(ArgAction::Append)
                .help("可重复指定"))
            .arg(Arg::new("image").long("image").value_name("URI")))
        .subcommand(Command::new("delete")
            .about("删除文章")
            .arg(Arg::new("id").required(true).value_name("ID")))
        .subcommand(Command::new("import")
            .about("从目录中的 JSON 文件批量导入文章")
            .arg(Arg::new("source")
                .short('s')
                .long("source")
                .value_name("SOURCE_DIR")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("文章源目录路径"))
            .arg(Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("只解析，不上传")))
        .subcommand(Command::new("browse").about("交互式浏览文章"))
        .subcommand(Command::new("theme")
            .about("查看或修改配色主题")
            .arg(Arg::new("mode")
                .value_name("MODE")
                .value_parser(["dark", "light", "toggle"])))
}

/// 日志过滤规则，`--verbose` 优先
pub fn log_filter(matches: &ArgMatches) -> String {
    if matches.get_flag("verbose") {
        "debug".to_string()
    } else {
        matches
            .get_one::<String>("log")
            .cloned()
            .unwrap_or_else(|| "warn".to_string())
    }
}

/// 执行命令并返回进程退出码
pub fn run(matches: &ArgMatches) -> i32 {
    let renderer = Renderer::new(resolve_theme(matches));
    let api_url = matches
        .get_one::<String>("api_url")
        .map(String::as_str)
        .unwrap_or(DEFAULT_API_URL);

    match dispatch(matches, &renderer, api_url) {
        Ok(()) => 0,
        Err(e) if e.is_transport() => {
            eprintln!("{}", renderer.fetch_error(&e, api_url));
            1
        }
        Err(e) => {
            eprintln!("{} {}", "错误:".red(), e);
            1
        }
    }
}

fn dispatch(matches: &ArgMatches, renderer: &Renderer, api_url: &str) -> Result<(), ClientError> {
    match matches.subcommand() {
        Some(("list", sub)) => {
            let client = BlogClient::new(api_url)?;
            let query = sub.get_one::<String>("query").map(String::as_str).unwrap_or("");
            let sort = SortOption::parse(sub.get_one::<String>("sort").map(String::as_str).unwrap_or("name_asc"));
            let page = sub.get_one::<i64>("page").copied().unwrap_or(1);

            // 获取失败时直接返回，不在残缺数据上计算视图
            let posts = client.list()?;
            let (view, state) = list_view(&posts, query, sort, page);
            println!("{}", renderer.page(&view, &state));
            Ok(())
        }
        Some(("show", sub)) => {
            let client = BlogClient::new(api_url)?;
            let id = required(sub, "id")?;
            match client.get(id) {
                Ok(post) => {
                    println!("{}", renderer.post(&post));
                    Ok(())
                }
                Err(e) if e.is_not_found() => Err(ClientError::NotFound(id.to_string())),
                Err(e) => Err(e),
            }
        }
        Some(("create", sub)) => {
            let client = BlogClient::new(api_url)?;
            let post = NewBlogPost {
                title: required(sub, "title")?.to_string(),
                content: required(sub, "content")?.to_string(),
                author: required(sub, "author")?.to_string(),
                tags: sub
                    .get_many::<String>("tag")
                    .map(|tags| tags.cloned().collect())
                    .unwrap_or_default(),
                image: sub.get_one::<String>("image").cloned(),
            };
            let created = client.create(&post)?;
            println!("已发布: {} ({})", created.title, created.id);
            Ok(())
        }
        Some(("delete", sub)) => {
            let client = BlogClient::new(api_url)?;
            let message = client.delete(required(sub, "id")?)?;
            println!("{}", message);
            Ok(())
        }
        Some(("import", sub)) => {
            let source = sub
                .get_one::<PathBuf>("source")
                .ok_or_else(|| ClientError::Config("缺少 --source".to_string()))?;
            run_import(api_url, source, sub.get_flag("dry_run"))
        }
        Some(("browse", _)) => {
            let client = BlogClient::new(api_url)?;
            let mut view = SearchView::new(client.list()?);
            let stdin = io::stdin();
            browse::run(&mut view, renderer, stdin.lock(), &mut io::stdout())?;
            Ok(())
        }
        Some(("theme", sub)) => run_theme(sub.get_one::<String>("mode").map(String::as_str)),
        _ => Err(ClientError::Config("未知命令".to_string())),
    }
}

/// 由查询参数计算列表视图，页码先修正到有效范围
pub fn list_view(
    posts: &[blog_common::models::BlogPost],
    query: &str,
    sort: SortOption,
    page: i64,
) -> (ViewResult, QueryState) {
    let filtered = compute_filtered(posts, query, sort);
    let page_count = compute_page(&filtered, PAGE_SIZE, 1).page_count;

    let mut state = QueryState::new();
    state.set_search_query(query);
    state.set_sort_option(sort);
    state.go_to(page, page_count);

    let page = compute_page(&filtered, PAGE_SIZE, state.current_page());
    let view = ViewResult {
        filtered,
        visible: page.visible,
        page_count: page.page_count,
        current_page: state.current_page(),
    };
    (view, state)
}

fn run_import(api_url: &str, source: &std::path::Path, dry_run: bool) -> Result<(), ClientError> {
    if !source.is_dir() {
        return Err(ClientError::Config(format!("源目录不存在或不是有效目录 '{}'", source.display())));
    }

    println!("扫描目录: {}", source.display());
    let scan = scan_json_files(source)?;
    for failure in &scan.failures {
        eprintln!("{} {}", "跳过:".yellow(), failure);
    }
    println!("找到 {} 篇文章，{} 个文件无法解析", scan.posts.len(), scan.failures.len());

    if dry_run {
        return Ok(());
    }

    let client = BlogClient::new(api_url)?;
    let mut imported = 0;
    for (path, post) in &scan.posts {
        let created = client.create(post)?;
        tracing::info!(path = %path.display(), id = %created.id, "已导入");
        imported += 1;
    }
    println!("已导入 {} 篇文章", imported);
    Ok(())
}

fn run_theme(mode: Option<&str>) -> Result<(), ClientError> {
    let path = ThemeSettings::default_path()
        .ok_or_else(|| ClientError::Config("无法确定配置目录".to_string()))?;
    let mut settings = ThemeSettings::load_from(&path);

    let next = match mode {
        None => {
            println!("当前主题: {}", settings.theme.as_str());
            return Ok(());
        }
        Some("toggle") => settings.theme.toggled(),
        Some(other) => other.parse::<Theme>().map_err(ClientError::Config)?,
    };

    settings.theme = next;
    settings.save_to(&path)?;
    println!("主题已切换为 {}", next.as_str());
    Ok(())
}

/// `--theme` 优先，否则读取已保存的设置
fn resolve_theme(matches: &ArgMatches) -> Theme {
    if let Some(theme) = matches.get_one::<String>("theme").and_then(|t| t.parse().ok()) {
        return theme;
    }
    ThemeSettings::default_path()
        .map(|path| ThemeSettings::load_from(&path).theme)
        .unwrap_or_default()
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, ClientError> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| ClientError::Config(format!("缺少参数 {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_common::models::BlogPost;

    fn posts(n: usize) -> Vec<BlogPost> {
        (0..n)
            .map(|i| BlogPost {
                id: i.to_string(),
                title: format!("Post {:02}", i),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn parses_list_options() {
        let matches = command()
            .try_get_matches_from(["blog", "list", "-q", "rust", "-s", "date_asc", "-p", "-3", "--theme", "light"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "list");
        assert_eq!(sub.get_one::<String>("query").unwrap(), "rust");
        assert_eq!(sub.get_one::<i64>("page"), Some(&-3));
        assert_eq!(resolve_theme(&matches), Theme::Light);
    }

    #[test]
    fn create_collects_repeated_tags() {
        let matches = command()
            .try_get_matches_from([
                "blog", "create", "--title", "T", "--content", "C", "--author", "A", "-t", "x", "-t", "y",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let tags: Vec<&String> = sub.get_many::<String>("tag").unwrap().collect();
        assert_eq!(tags, vec!["x", "y"]);
    }

    #[test]
    fn verbose_overrides_log_filter() {
        let matches = command().try_get_matches_from(["blog", "browse", "-v"]).unwrap();
        assert_eq!(log_filter(&matches), "debug");
    }

    #[test]
    fn list_view_clamps_requested_page() {
        let all = posts(12);
        let (view, state) = list_view(&all, "", SortOption::NameAsc, 9);
        assert_eq!(state.current_page(), 3);
        assert_eq!(view.visible.len(), 2);

        let (view, state) = list_view(&all, "", SortOption::NameAsc, -1);
        assert_eq!(state.current_page(), 1);
        assert_eq!(view.visible[0].title, "Post 00");

        let (view, state) = list_view(&all, "post 1", SortOption::NameDesc, 1);
        assert_eq!(state.current_page(), 1);
        assert_eq!(view.total(), 2);
        assert_eq!(view.visible[0].title, "Post 11");
    }
}
