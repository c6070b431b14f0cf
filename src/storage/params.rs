use std::str::FromStr;

use serde::Deserialize;

use crate::error::ApiError;

/// 将路径中的 id 转换为数据库的整数主键
///
/// 无法转换时返回 [`ApiError::BadRequest`]。
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::BadRequest)
}

/// 文章列表允许的排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    CreatedAt,
    Votes,
    Title,
    Author,
    ArticleId,
    Topic,
}

impl SortBy {
    /// 对应的列名，只会是固定的几个字面量
    pub fn column(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "created_at",
            SortBy::Votes => "votes",
            SortBy::Title => "title",
            SortBy::Author => "author",
            SortBy::ArticleId => "article_id",
            SortBy::Topic => "topic",
        }
    }
}

impl FromStr for SortBy {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(SortBy::CreatedAt),
            "votes" => Ok(SortBy::Votes),
            "title" => Ok(SortBy::Title),
            "author" => Ok(SortBy::Author),
            "article_id" => Ok(SortBy::ArticleId),
            "topic" => Ok(SortBy::Topic),
            _ => Err(ApiError::BadRequest),
        }
    }
}

/// 排序方向，大小写不敏感
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Order::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Order::Desc)
        } else {
            Err(ApiError::BadRequest)
        }
    }
}

/// 文章列表的原始查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ArticleListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
}

/// 校验后的文章列表查询
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    pub sort_by: SortBy,
    pub order: Order,
    pub topic: Option<String>,
}

impl TryFrom<&ArticleListParams> for ArticleListQuery {
    type Error = ApiError;

    fn try_from(params: &ArticleListParams) -> Result<Self, Self::Error> {
        let sort_by = match params.sort_by.as_deref() {
            Some(s) => s.parse()?,
            None => SortBy::default(),
        };
        let order = match params.order.as_deref() {
            Some(o) => o.parse()?,
            None => Order::default(),
        };

        Ok(Self {
            sort_by,
            order,
            topic: params.topic.clone(),
        })
    }
}

/// 新评论的请求体
#[derive(Debug, Default, Deserialize)]
pub struct NewComment {
    pub username: Option<String>,
    pub body: Option<String>,
}

impl NewComment {
    /// 返回 `(username, body)`，任一缺失或为空时返回 [`ApiError::BadRequest`]
    pub fn fields(&self) -> Result<(&str, &str), ApiError> {
        let username = self
            .username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ApiError::BadRequest)?;
        let body = self
            .body
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .ok_or(ApiError::BadRequest)?;
        Ok((username, body))
    }
}
