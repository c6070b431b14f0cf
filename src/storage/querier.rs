use std::future::Future;

use super::{
    ArticleDetail, ArticleListParams, ArticleListQuery, ArticleSummary, Comment, DBPool,
    NewComment, SortBy, Topic, User, parse_id,
};
use crate::error::{ApiError, Error, Result};

/// 讨论区的数据访问接口
///
/// 所有参数校验（id 转换、排序白名单、必填字段）都在这一层完成，
/// 数据库错误码也在这里被归类为 [`ApiError`]。
pub trait Querier: Send + Sync {
    /// 查询全部话题
    fn topics(&self) -> impl Future<Output = Result<Vec<Topic>>> + Send;

    /// 查询单篇文章，附带评论数
    ///
    /// `id` 无法转换为整数时返回 [`ApiError::BadRequest`]，
    /// 不存在时返回 [`ApiError::NotFound`]。
    fn article(&self, id: &str) -> impl Future<Output = Result<ArticleDetail>> + Send;

    /// 查询文章列表
    ///
    /// 排序字段必须在 [`SortBy`] 白名单内，方向只能是 asc/desc，默认 `created_at DESC`。
    /// 指定了不存在的话题时返回 [`ApiError::NotFound`]。
    fn articles(
        &self,
        params: &ArticleListParams,
    ) -> impl Future<Output = Result<Vec<ArticleSummary>>> + Send;

    /// 查询某篇文章下的评论，最新的在前
    ///
    /// 不检查文章是否存在，没有评论时返回空列表。
    fn comments_by_article(
        &self,
        article_id: &str,
    ) -> impl Future<Output = Result<Vec<Comment>>> + Send;

    /// 新增评论
    ///
    /// 文章或用户不存在时返回 [`ApiError::NotFound`]。
    fn insert_comment(
        &self,
        article_id: &str,
        comment: &NewComment,
    ) -> impl Future<Output = Result<Comment>> + Send;

    /// 删除评论
    fn delete_comment(&self, comment_id: &str) -> impl Future<Output = Result<()>> + Send;

    /// 查询全部用户
    fn users(&self) -> impl Future<Output = Result<Vec<User>>> + Send;

    /// 按用户名查询用户
    fn user(&self, username: &str) -> impl Future<Output = Result<User>> + Send;
}

impl Querier for DBPool {
    async fn topics(&self) -> Result<Vec<Topic>> {
        sqlx::query_as::<_, Topic>(
            r#"
            SELECT slug, description
            FROM topics
            ORDER BY slug
            "#,
        )
        .fetch_all(self)
        .await
        .map_err(classify)
    }

    async fn article(&self, id: &str) -> Result<ArticleDetail> {
        let id = parse_id(id)?;

        sqlx::query_as::<_, ArticleDetail>(
            r#"
            SELECT a.article_id, a.author, a.title, a.body, a.topic, a.created_at,
                   a.votes, a.article_img_url,
                   COUNT(c.comment_id) AS comment_count
            FROM articles a
            LEFT JOIN comments c ON c.article_id = a.article_id
            WHERE a.article_id = $1
            GROUP BY a.article_id
            "#,
        )
        .bind(id)
        .fetch_optional(self)
        .await
        .map_err(classify)?
        .ok_or_else(|| ApiError::NotFound.into())
    }

    async fn articles(&self, params: &ArticleListParams) -> Result<Vec<ArticleSummary>> {
        let query = ArticleListQuery::try_from(params)?;

        let mut builder = sqlx::QueryBuilder::new(
            r#"
            SELECT a.article_id, a.author, a.title, a.topic, a.created_at,
                   a.votes, a.article_img_url,
                   COUNT(c.comment_id) AS comment_count
            FROM articles a
            LEFT JOIN comments c ON c.article_id = a.article_id
            "#,
        );

        if let Some(topic) = &query.topic {
            builder.push(" WHERE a.topic = ").push_bind(topic.clone());
        }

        // 列名与方向都来自白名单枚举，不拼接客户端输入
        let order = query.order.keyword();
        builder.push(" GROUP BY a.article_id");
        builder.push(format_args!(
            " ORDER BY a.{} {order}",
            query.sort_by.column()
        ));
        if query.sort_by != SortBy::ArticleId {
            builder.push(format_args!(", a.article_id {order}"));
        }

        let articles = builder
            .build_query_as::<ArticleSummary>()
            .fetch_all(self)
            .await
            .map_err(classify)?;

        // 话题不存在与话题下没有文章要区分开
        if let (true, Some(topic)) = (articles.is_empty(), &query.topic) {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM topics WHERE slug = $1)")
                    .bind(topic)
                    .fetch_one(self)
                    .await
                    .map_err(classify)?;
            if !exists {
                return Err(ApiError::NotFound.into());
            }
        }

        Ok(articles)
    }

    async fn comments_by_article(&self, article_id: &str) -> Result<Vec<Comment>> {
        let article_id = parse_id(article_id)?;

        sqlx::query_as::<_, Comment>(
            r#"
            SELECT comment_id, body, article_id, author, votes, created_at
            FROM comments
            WHERE article_id = $1
            ORDER BY created_at DESC, comment_id DESC
            "#,
        )
        .bind(article_id)
        .fetch_all(self)
        .await
        .map_err(classify)
    }

    async fn insert_comment(&self, article_id: &str, comment: &NewComment) -> Result<Comment> {
        let article_id = parse_id(article_id)?;
        let (username, body) = comment.fields()?;

        let created = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (body, article_id, author)
            VALUES ($1, $2, $3)
            RETURNING comment_id, body, article_id, author, votes, created_at
            "#,
        )
        .bind(body)
        .bind(article_id)
        .bind(username)
        .fetch_one(self)
        .await
        .map_err(classify)?;

        tracing::info!(comment_id = created.comment_id, article_id, "comment created");
        Ok(created)
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let comment_id = parse_id(comment_id)?;

        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(self)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound.into());
        }

        tracing::info!(comment_id, "comment deleted");
        Ok(())
    }

    async fn users(&self) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT username, name, avatar_url
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(self)
        .await
        .map_err(classify)
    }

    async fn user(&self, username: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT username, name, avatar_url
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self)
        .await
        .map_err(classify)?
        .ok_or_else(|| ApiError::NotFound.into())
    }
}

/// 将数据库错误归类
///
/// 能识别的错误码转换为 [`ApiError`]，其余保留为 [`Error::Sqlx`]。
pub(crate) fn classify(err: sqlx::Error) -> Error {
    let api_error = err
        .as_database_error()
        .and_then(|db| db.code())
        .and_then(|code| classify_code(&code));

    match api_error {
        Some(e) => {
            tracing::debug!(%err, "classified store error");
            e.into()
        }
        None => err.into(),
    }
}

/// Postgres SQLSTATE 到 [`ApiError`] 的映射
fn classify_code(code: &str) -> Option<ApiError> {
    match code {
        // foreign_key_violation
        "23503" => Some(ApiError::NotFound),
        // invalid_text_representation, not_null_violation, check_violation,
        // string_data_right_truncation, character_not_in_repertoire
        "22P02" | "23502" | "23514" | "22001" | "22021" => Some(ApiError::BadRequest),
        _ => None,
    }
}
