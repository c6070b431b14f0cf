use chrono::{DateTime, Utc};
use serde::Serialize;

/// 话题
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Topic {
    /// 唯一标识
    pub slug: String,
    pub description: String,
}

/// 文章详情
///
/// 包含正文以及读取时统计出的评论数。
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ArticleDetail {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub body: String,
    /// 所属话题的 slug
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    /// 评论数，不落库
    pub comment_count: i64,
}

/// 文章列表项
///
/// 与 [`ArticleDetail`] 相同但不包含正文。
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ArticleSummary {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i64,
}

/// 评论
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub article_id: i32,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

/// 用户
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}
