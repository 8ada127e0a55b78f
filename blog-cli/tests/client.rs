use std::net::{SocketAddr, TcpListener as StdListener};
use std::sync::{mpsc, Arc};
use std::thread;
use blog_cli::{BlogClient, ClientError};
use blog_common::models::NewBlogPost;
use blog_filter::{SearchView, SortOption};
use blog_server::{serve_with_listener, BlogStore};

/// 在独立线程的运行时中启动服务，阻塞客户端不能运行在 tokio 运行时内
fn spawn_server() -> SocketAddr {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            serve_with_listener(listener, Arc::new(BlogStore::in_memory())).await.unwrap();
        });
    });
    rx.recv().unwrap()
}

fn new_post(title: &str, author: &str, tags: &[&str]) -> NewBlogPost {
    NewBlogPost {
        title: title.into(),
        content: format!("{} body", title),
        author: author.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image: None,
    }
}

#[test]
fn create_list_filter_and_delete() {
    let addr = spawn_server();
    let client = BlogClient::new(&format!("http://{}", addr)).unwrap();

    assert!(client.list().unwrap().is_empty());

    let rust = client.create(&new_post("Learning Rust", "Ferris", &["rust"])).unwrap();
    client.create(&new_post("Gardening", "Alice", &["outdoors"])).unwrap();
    client.create(&new_post("Async Rust", "Bob", &[])).unwrap();
    assert!(!rust.id.is_empty());
    assert!(rust.created_at.is_some());

    let posts = client.list().unwrap();
    assert_eq!(posts.len(), 3);

    let mut view = SearchView::new(posts);
    view.set_search_query("rust");
    view.set_sort_option(SortOption::NameAsc);
    let titles: Vec<String> = view.view().filtered.into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["Async Rust", "Learning Rust"]);

    let fetched = client.get(&rust.id).unwrap();
    assert_eq!(fetched.title, "Learning Rust");
    assert_eq!(fetched.tags, vec!["rust"]);

    assert_eq!(client.delete(&rust.id).unwrap(), "Blog deleted successfully");
    let missing = client.get(&rust.id).unwrap_err();
    assert!(missing.is_not_found());
    assert!(client.delete(&rust.id).unwrap_err().is_not_found());
    assert_eq!(client.list().unwrap().len(), 2);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // 绑定后立即释放，得到一个没有监听者的端口
    let port = StdListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let client = BlogClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();

    let err = client.list().unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(err.is_transport());
}
