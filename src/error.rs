use std::io;

use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub type Result<T> = core::result::Result<T, Error>;

/// 已分类的客户端错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// 参数无法转换、不在白名单内或缺少必填字段
    #[error("Bad Request")]
    BadRequest,

    /// 引用合法但记录不存在
    #[error("Not Found")]
    NotFound,

    /// 没有匹配的路由
    #[error("Route Non Found")]
    RouteNotFound,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ApiError(#[from] ApiError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<PathRejection> for Error {
    fn from(e: PathRejection) -> Self {
        tracing::debug!(%e, "invalid path parameter");
        ApiError::BadRequest.into()
    }
}

/// 错误响应体，只有一个 `msg` 字段
#[derive(Debug, Serialize)]
struct ErrorBody {
    msg: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            Error::ApiError(e) => {
                tracing::debug!(%e, "client error");
                (e.status(), e.to_string())
            }
            Error::Sqlx(e) => {
                tracing::error!(%e, "sqlx error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            Error::Io(e) => {
                tracing::error!(%e, "io error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { msg })).into_response()
    }
}
