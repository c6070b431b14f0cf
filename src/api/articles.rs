use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Serialize;

use super::{ApiError, DBPool, Path, Querier, Result};
use crate::{
    state::AppState,
    storage::{ArticleDetail, ArticleListParams, ArticleSummary, Comment, NewComment},
};

/// 配置文章相关路由。
///
/// 路由包括：
/// - `GET /articles`：文章列表，支持 `sort_by`、`order`、`topic`
/// - `GET /articles/{article_id}`：获取单篇文章
/// - `GET /articles/{article_id}/comments`：文章及其评论
/// - `POST /articles/{article_id}/comments`：发表评论
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/articles", get(article_list))
        .route("/articles/{article_id}", get(article))
        .route(
            "/articles/{article_id}/comments",
            get(article_comments).post(comment_create),
        )
}

#[derive(Debug, Serialize)]
pub struct ArticleOne {
    article: ArticleDetail,
}

#[derive(Debug, Serialize)]
pub struct ArticleList {
    articles: Vec<ArticleSummary>,
}

#[derive(Debug, Serialize)]
pub struct ArticleComments {
    article: ArticleDetail,
    comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct CommentCreated {
    comment: Comment,
}

/// 根据 id 获取单篇文章。
async fn article(
    Path(article_id): Path<String>,
    State(pool): State<DBPool>,
) -> Result<Json<ArticleOne>> {
    let article = pool.article(&article_id).await?;
    Ok(Json(ArticleOne { article }))
}

/// 获取文章列表。
async fn article_list(
    params: std::result::Result<Query<ArticleListParams>, QueryRejection>,
    State(pool): State<DBPool>,
) -> Result<Json<ArticleList>> {
    let Query(params) = params.map_err(|e| {
        tracing::debug!(%e, "invalid article query");
        ApiError::BadRequest
    })?;

    let articles = pool.articles(&params).await?;
    Ok(Json(ArticleList { articles }))
}

/// 获取文章及其评论。
///
/// 两次查询并发执行，任一失败即返回该错误，文章不存在时为 404。
async fn article_comments(
    Path(article_id): Path<String>,
    State(pool): State<DBPool>,
) -> Result<Json<ArticleComments>> {
    let (article, comments) = tokio::try_join!(
        pool.article(&article_id),
        pool.comments_by_article(&article_id)
    )?;

    Ok(Json(ArticleComments { article, comments }))
}

/// 发表评论，成功返回 201。
async fn comment_create(
    Path(article_id): Path<String>,
    State(pool): State<DBPool>,
    payload: std::result::Result<Json<NewComment>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentCreated>)> {
    let Json(comment) = payload.map_err(|e| {
        tracing::debug!(%e, "invalid comment payload");
        ApiError::BadRequest
    })?;

    let comment = pool.insert_comment(&article_id, &comment).await?;
    Ok((StatusCode::CREATED, Json(CommentCreated { comment })))
}
