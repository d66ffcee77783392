//! 数据库连接提供者
//!
//! 持有驱动层连接池，并为每个请求创建一个 [`DbSession`]。

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use super::executor::DbSession;
use crate::config::DatabaseConfig;
use crate::errors::{CodetaError, Result};

#[derive(Clone)]
pub struct ConnectionProvider {
    db: DatabaseConnection,
}

impl ConnectionProvider {
    /// 根据配置建立连接池
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        info!("Database connected: {}", db_url);

        Ok(Self { db })
    }

    /// 连接并执行迁移
    pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<Self> {
        let provider = Self::connect(config).await?;
        provider.migrate().await?;
        Ok(provider)
    }

    /// 创建表结构
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| CodetaError::database_operation(format!("Migration failed: {e}")))
    }

    /// 为一个请求打开会话，事务在第一次查询时才开启
    pub fn open_session(&self) -> DbSession {
        DbSession::new(self.db.clone())
    }

    /// 关闭连接池
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(CodetaError::from)
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CodetaError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库每个连接都是独立的数据库，只能用单连接且不能回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| CodetaError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// PostgreSQL 连接
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            CodetaError::database_connection(format!("Could not connect to database: {e}"))
        })
    }

    /// 从 URL 推断数据库类型并构建连接 URL
    pub(crate) fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(url.to_string())
        } else {
            Err(CodetaError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite:, postgres://, or a .db/.sqlite file path"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            ConnectionProvider::build_database_url("codeta.db").unwrap(),
            "sqlite://codeta.db?mode=rwc"
        );
        assert_eq!(
            ConnectionProvider::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            ConnectionProvider::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            ConnectionProvider::build_database_url("postgres://codeta@localhost/codeta").unwrap(),
            "postgres://codeta@localhost/codeta"
        );
    }

    #[test]
    fn test_unsupported_database_url() {
        let err = ConnectionProvider::build_database_url("mysql://root@localhost/codeta")
            .unwrap_err();
        assert_eq!(err.code(), "E001");
    }
}
