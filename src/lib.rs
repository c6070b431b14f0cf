pub mod api;
pub mod error;
pub mod state;
pub mod storage;

use std::env;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use error::Result;
use state::AppState;

/// 未设置 `NEWSBOARD_ADDR` 时的监听地址
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// 初始化日志、连接池并启动服务，服务停止后关闭连接池
pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("NEWSBOARD_LOG"))
        .init();

    let app = AppState::new(storage::init_db_from_env().await?);

    let served = api::run_server(app.clone(), &listen_addr()).await;
    storage::close_db(app.querier()).await;
    served
}

fn listen_addr() -> String {
    env::var("NEWSBOARD_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string())
}
