use axum::{
    Json, Router,
    extract::{State},
    routing::get,
};
use serde::Serialize;

use super::{DBPool, Path, Querier, Result};
use crate::{state::AppState, storage::User};

/// 配置用户相关路由。
///
/// - `GET /users`：用户列表
/// - `GET /users/{username}`：单个用户
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/users", get(user_list))
        .route("/users/{username}", get(user))
}

#[derive(Debug, Serialize)]
pub struct UserList {
    users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserDetail {
    user: User,
}

async fn user_list(State(pool): State<DBPool>) -> Result<Json<UserList>> {
    let users = pool.users().await?;
    Ok(Json(UserList { users }))
}

async fn user(
    Path(username): Path<String>,
    State(pool): State<DBPool>,
) -> Result<Json<UserDetail>> {
    let user = pool.user(&username).await?;
    Ok(Json(UserDetail { user }))
}
