use axum::{
    Router,
    extract::{State},
    http::StatusCode,
    routing::delete,
};

use super::{DBPool, Path, Querier, Result};
use crate::state::AppState;

/// 配置评论相关路由。
///
/// - `DELETE /comments/{comment_id}`：删除评论，成功返回 204
pub fn setup_route() -> Router<AppState> {
    Router::new().route("/comments/{comment_id}", delete(comment_delete))
}

async fn comment_delete(
    Path(comment_id): Path<String>,
    State(pool): State<DBPool>,
) -> Result<StatusCode> {
    pool.delete_comment(&comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
