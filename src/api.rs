mod articles;
mod comments;
mod endpoints;
mod topics;
mod users;

use axum::{Router, extract::FromRequestParts, routing::get};
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::{
    error::{ApiError, Error, Result},
    state::AppState,
    storage::{DBPool, Querier},
};

/// 设置应用的路由。
///
/// 各资源的路由组合后挂载在 `/api` 下，`GET /api` 返回接口说明文档。
/// 路径或方法都无法匹配时统一返回 [`ApiError::RouteNotFound`]。
pub fn setup_route(app: AppState) -> Router {
    Router::new()
        .route("/api", get(endpoints::endpoints))
        .nest(
            "/api",
            topics::setup_route()
                .merge(articles::setup_route())
                .merge(comments::setup_route())
                .merge(users::setup_route()),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(app)
}

/// 路径参数提取器，提取失败时返回 JSON 格式的 [`ApiError::BadRequest`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
struct Path<T>(T);

async fn route_not_found() -> Error {
    ApiError::RouteNotFound.into()
}

/// 启动 HTTP 服务，并使用给定的路由处理请求。
///
/// 收到 Ctrl-C 后停止接收新连接，等待进行中的请求结束后返回。
#[instrument(name = "http server", skip(router))]
pub async fn run_server_with_router(router: Router, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("listening on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("http server stopped");
    Ok(())
}

/// 启动 HTTP 服务，自动设置路由和中间件。
///
/// 1. 生成路由
/// 2. 添加日志和追踪中间件
/// 3. 启动服务器
pub async fn run_server(app: AppState, addr: &str) -> Result<()> {
    let router = setup_route(app);
    let router = add_middlewares(router);
    run_server_with_router(router, addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(%e, "failed to listen for shutdown signal");
    }
}

/// 为路由添加中间件，包括请求追踪和失败日志记录。
///
/// 日志记录会在请求失败时输出错误信息。
fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        _latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .on_failure(log_failure)
            .on_request(|_req: &_, _span: &tracing::Span| {
                // 空实现，关闭请求日志
            }),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        extract::Request,
        http::StatusCode,
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::util::ServiceExt;

    use super::*;

    /// 不会真正建立连接的路由，只能覆盖在访问数据库之前就结束的请求
    fn router() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://newsboard@localhost/newsboard_unreachable")
            .expect("无效的连接串");
        setup_route(AppState::new(pool))
    }

    async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = router().oneshot(req).await.expect("oneshot fail");
        let status = resp.status();
        let data = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("读取数据失败");
        (status, serde_json::from_slice(&data).expect("反序列化失败"))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("请求失败")
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(get("/api/stories")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Route Non Found");

        let (status, body) = send(get("/nothing/here")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Route Non Found");
    }

    #[tokio::test]
    async fn test_unsupported_method_is_route_not_found() {
        let req = Request::patch("/api/articles/1")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"inc_votes":1}"#))
            .expect("请求失败");
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Route Non Found");

        let req = Request::delete("/api/topics")
            .body(Body::empty())
            .expect("请求失败");
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_endpoints_document() {
        let (status, body) = send(get("/api")).await;
        assert_eq!(status, StatusCode::OK);

        let expected: serde_json::Value =
            serde_json::from_str(endpoints::ENDPOINTS).expect("endpoints.json 无效");
        assert_eq!(body, expected);
        assert!(body.get("GET /api/topics").is_some());
    }

    #[tokio::test]
    async fn test_bad_requests_never_reach_the_store() {
        for uri in [
            "/api/articles/notAnID",
            "/api/articles/notAnID/comments",
            "/api/articles?sort_by=strawberry",
            "/api/articles?sort_by=votes&order=sideways",
        ] {
            let (status, body) = send(get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, serde_json::json!({ "msg": "Bad Request" }), "{uri}");
        }

        for uri in ["/api/comments/abc", "/api/comments/%FF"] {
            let req = Request::delete(uri).body(Body::empty()).expect("请求失败");
            let (status, body) = send(req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["msg"], "Bad Request");
        }
    }

    #[tokio::test]
    async fn test_undecodable_path_segment() {
        for uri in [
            "/api/articles/%FF",
            "/api/articles/%FF/comments",
            "/api/users/%FF",
        ] {
            let (status, body) = send(get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, serde_json::json!({ "msg": "Bad Request" }), "{uri}");
        }

        let req = Request::post("/api/articles/%FF/comments")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"username":"lurker","body":"hi"}"#))
            .expect("请求失败");
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request");
    }

    #[tokio::test]
    async fn test_invalid_comment_payload() {
        for payload in [r#"{"username":"butter_bridge"}"#, r#"{"body":"hi"}"#, "not json", "{}"] {
            let req = Request::post("/api/articles/1/comments")
                .header("Content-Type", "application/json")
                .body(Body::from(payload))
                .expect("请求失败");
            let (status, body) = send(req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
            assert_eq!(body["msg"], "Bad Request");
        }
    }
}
