use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::{DBPool, Querier, Result};
use crate::{state::AppState, storage::Topic};

/// 配置话题相关路由。
///
/// - `GET /topics`：话题列表
pub fn setup_route() -> Router<AppState> {
    Router::new().route("/topics", get(topic_list))
}

#[derive(Debug, Serialize)]
pub struct TopicList {
    topics: Vec<Topic>,
}

async fn topic_list(State(pool): State<DBPool>) -> Result<Json<TopicList>> {
    let topics = pool.topics().await?;
    Ok(Json(TopicList { topics }))
}
