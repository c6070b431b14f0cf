use axum::{http::header, response::IntoResponse};

/// 接口说明文档，原样返回
pub(super) const ENDPOINTS: &str = include_str!("../../endpoints.json");

pub(super) async fn endpoints() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], ENDPOINTS)
}
