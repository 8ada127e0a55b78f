use std::sync::Arc;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use blog_common::models::{ApiMessage, BlogPost, NewBlogPost};
use crate::error::{ApiError, StoreError};
use crate::store::BlogStore;

pub type SharedStore = Arc<BlogStore>;

/// 路由表：`/blogs` 上的增删查
pub fn router(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/{id}", get(get_blog).delete(delete_blog))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(store)
}

pub async fn root() -> &'static str {
    "API is running..."
}

/// 在阻塞线程池中访问存储：写操作持锁同步写快照，不能占用异步工作线程
async fn with_store<T, F>(store: SharedStore, op: F) -> Result<T, StoreError>
where
    F: FnOnce(&BlogStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&store)).await?
}

pub async fn list_blogs(State(store): State<SharedStore>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = with_store(store, |store| store.find_all()).await?;
    tracing::debug!(count = posts.len(), "列出文章");
    Ok(Json(posts))
}

pub async fn get_blog(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    with_store(store, move |store| store.find_by_id(&id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_blog(
    State(store): State<SharedStore>,
    payload: Result<Json<NewBlogPost>, JsonRejection>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let Json(new_post) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let post = with_store(store, move |store| store.insert(new_post)).await?;
    tracing::info!(id = %post.id, title = %post.title, "已创建文章");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn delete_blog(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiMessage>, ApiError> {
    let lookup = id.clone();
    match with_store(store, move |store| store.delete_by_id(&lookup)).await? {
        Some(_) => {
            tracing::info!(%id, "已删除文章");
            Ok(Json(ApiMessage::new("Blog deleted successfully")))
        }
        None => Err(ApiError::NotFound),
    }
}
