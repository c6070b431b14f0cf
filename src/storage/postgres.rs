use std::{env, time::Duration};

use sqlx::postgres::PgPoolOptions;

/// 数据库连接池类型
pub type DBPool = sqlx::PgPool;

/// 从环境变量 `DATABASE_URL` 初始化数据库连接池
pub async fn init_db_from_env() -> Result<DBPool, sqlx::Error> {
    let conn_url = env::var("DATABASE_URL").map_err(|e| {
        sqlx::Error::Configuration(format!("环境变量: `DATABASE_URL`: {e}").into())
    })?;
    new_db_pool(&conn_url).await
}

/// 根据连接 URL 创建新的数据库连接池
///
/// 连接池配置：
///
/// - 最大空闲时间 60 秒
/// - 最大生存时间 1500 秒（约 25 分钟）
/// - 最大连接数 10
/// - 获取连接超时 2 秒
/// - 获取前测试连接
/// - 最小连接数 2
pub async fn new_db_pool(conn_url: &str) -> Result<DBPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(1500))
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(2))
        .test_before_acquire(true)
        .min_connections(2)
        .connect(conn_url)
        .await?;

    tracing::info!("database pool ready");
    Ok(pool)
}

/// 关闭连接池，等待已借出的连接归还
pub async fn close_db(pool: &DBPool) {
    pool.close().await;
    tracing::info!("database pool closed");
}

/// 执行 SQL 文件
///
/// 整个文件作为一次多语句请求发送，文本中的 `;` 不会被拆开。
pub async fn migrate(db: &DBPool, file: &str) -> Result<(), sqlx::Error> {
    let content = std::fs::read_to_string(file)?;
    sqlx::raw_sql(&content).execute(db).await?;
    Ok(())
}
