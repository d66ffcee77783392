//! 查询执行器
//!
//! 每个请求持有一个 [`DbSession`]：第一次访问数据库时才开启事务，
//! 之后同一请求内的所有语句都复用这一事务。未显式 `commit` 的修改在
//! 会话关闭时回滚。
//!
//! 按访问模式提供类型化的查询函数：
//! - [`DbSession::execute`] 仅执行，返回受影响行数
//! - [`DbSession::fetch_one`] / [`DbSession::fetch_optional`] 单行
//! - [`DbSession::fetch_many`] 多行（类型化）
//! - [`DbSession::fetch_mapped`] 多行（按列名映射，保持列顺序）
//! - [`DbSession::insert_returning_id`] 返回生成的主键
//! - [`DbSession::commit`] / [`DbSession::execute_and_commit`] 显式提交
//!
//! 任何数据库错误都会回滚当前事务，并以 [`QueryError`] 返回给调用方。

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, FromQueryResult,
    JsonValue, QueryResult, SqlErr, Statement, TransactionTrait, Value,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// 以列名为键的行，键顺序与查询列顺序一致
pub type Row = serde_json::Map<String, JsonValue>;

type TxFuture<'t, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 't>>;

/// 查询错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// 单行查询没有结果
    NoRows,
    /// 违反唯一约束或外键约束
    ConstraintViolation(String),
    /// 无法获取连接或连接中断
    ConnectionFailure(String),
    /// 其他语句错误
    Statement(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::NoRows => write!(f, "query returned no rows"),
            QueryError::ConstraintViolation(msg) => write!(f, "constraint violation: {msg}"),
            QueryError::ConnectionFailure(msg) => write!(f, "connection failure: {msg}"),
            QueryError::Statement(msg) => write!(f, "statement failed: {msg}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<DbErr> for QueryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                return QueryError::ConstraintViolation(msg);
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return QueryError::ConstraintViolation(msg);
            }
            _ => {}
        }

        match err {
            DbErr::ConnectionAcquire(e) => QueryError::ConnectionFailure(e.to_string()),
            DbErr::Conn(e) => QueryError::ConnectionFailure(e.to_string()),
            DbErr::RecordNotFound(_) => QueryError::NoRows,
            other => QueryError::Statement(other.to_string()),
        }
    }
}

/// 请求级数据库会话
pub struct DbSession {
    pool: DatabaseConnection,
    backend: DbBackend,
    tx: Mutex<Option<DatabaseTransaction>>,
}

impl DbSession {
    pub(crate) fn new(pool: DatabaseConnection) -> Self {
        let backend = pool.get_database_backend();
        Self {
            pool,
            backend,
            tx: Mutex::new(None),
        }
    }

    /// 当前连接的数据库类型
    pub fn backend(&self) -> DbBackend {
        self.backend
    }

    /// 是否存在尚未提交或回滚的事务
    pub async fn is_open(&self) -> bool {
        self.tx.lock().await.is_some()
    }

    fn statement(&self, sql: &str, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.backend, sql, values)
    }

    /// 懒加载事务：同一会话内重复调用返回同一事务
    async fn open<'g>(
        &self,
        slot: &'g mut Option<DatabaseTransaction>,
    ) -> Result<&'g DatabaseTransaction, QueryError> {
        if slot.is_none() {
            let tx = self.pool.begin().await.map_err(|e| {
                let err = QueryError::from(e);
                warn!("Failed to open database session: {}", err);
                err
            })?;
            debug!("Database session opened");
            *slot = Some(tx);
        }

        slot.as_ref()
            .ok_or_else(|| QueryError::ConnectionFailure("session transaction missing".into()))
    }

    /// 在会话事务上执行一次操作，失败时回滚
    async fn run<T, F>(&self, sql: &str, op: F) -> Result<T, QueryError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t DatabaseTransaction) -> TxFuture<'t, T> + Send,
    {
        debug!(sql = %sql.split_whitespace().collect::<Vec<_>>().join(" "), "Executing statement");

        let mut slot = self.tx.lock().await;
        let outcome = {
            let tx = self.open(&mut *slot).await?;
            op(tx).await
        };

        match outcome {
            Ok(value) => Ok(value),
            Err(e) => {
                let err = QueryError::from(e);
                warn!("Query failed: {}", err);
                if let Some(tx) = slot.take() {
                    if let Err(rollback_err) = tx.rollback().await {
                        warn!("Rollback after failed query also failed: {}", rollback_err);
                    }
                }
                Err(err)
            }
        }
    }

    /// 仅执行语句，返回受影响行数（未提交）
    pub async fn execute(&self, sql: &str, values: Vec<Value>) -> Result<u64, QueryError> {
        let stmt = self.statement(sql, values);
        self.run(sql, move |tx| {
            Box::pin(async move { tx.execute(stmt).await.map(|r| r.rows_affected()) })
        })
        .await
    }

    /// 执行语句并立即提交
    pub async fn execute_and_commit(
        &self,
        sql: &str,
        values: Vec<Value>,
    ) -> Result<u64, QueryError> {
        let affected = self.execute(sql, values).await?;
        self.commit().await?;
        Ok(affected)
    }

    /// 查询单行，没有结果时返回 [`QueryError::NoRows`]
    pub async fn fetch_one<T>(&self, sql: &str, values: Vec<Value>) -> Result<T, QueryError>
    where
        T: FromQueryResult + Send + 'static,
    {
        self.fetch_optional(sql, values)
            .await?
            .ok_or(QueryError::NoRows)
    }

    /// 查询单行，没有结果时返回 `None`
    pub async fn fetch_optional<T>(
        &self,
        sql: &str,
        values: Vec<Value>,
    ) -> Result<Option<T>, QueryError>
    where
        T: FromQueryResult + Send + 'static,
    {
        let stmt = self.statement(sql, values);
        self.run(sql, move |tx| {
            Box::pin(async move { T::find_by_statement(stmt).one(tx).await })
        })
        .await
    }

    /// 查询多行
    pub async fn fetch_many<T>(&self, sql: &str, values: Vec<Value>) -> Result<Vec<T>, QueryError>
    where
        T: FromQueryResult + Send + 'static,
    {
        let stmt = self.statement(sql, values);
        self.run(sql, move |tx| {
            Box::pin(async move { T::find_by_statement(stmt).all(tx).await })
        })
        .await
    }

    /// 查询多行，每行映射为 列名 → 值
    pub async fn fetch_mapped(&self, sql: &str, values: Vec<Value>) -> Result<Vec<Row>, QueryError> {
        let rows: Vec<JsonValue> = self.fetch_many(sql, values).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match row {
                JsonValue::Object(map) => Some(map),
                _ => None,
            })
            .collect())
    }

    /// 判断查询是否至少返回一行
    pub async fn exists(&self, sql: &str, values: Vec<Value>) -> Result<bool, QueryError> {
        let stmt = self.statement(sql, values);
        let row: Option<QueryResult> = self
            .run(sql, move |tx| Box::pin(async move { tx.query_one(stmt).await }))
            .await?;
        Ok(row.is_some())
    }

    /// 执行 `INSERT ... RETURNING`，返回第一行第一列（未提交）
    pub async fn insert_returning_id(
        &self,
        sql: &str,
        values: Vec<Value>,
    ) -> Result<i64, QueryError> {
        let stmt = self.statement(sql, values);
        let row: Option<QueryResult> = self
            .run(sql, move |tx| Box::pin(async move { tx.query_one(stmt).await }))
            .await?;

        let row = row.ok_or(QueryError::NoRows)?;
        row.try_get_by_index::<i64>(0)
            .map_err(|e| QueryError::Statement(format!("generated key is not an integer: {e}")))
    }

    /// 提交当前事务；没有事务时什么也不做
    pub async fn commit(&self) -> Result<(), QueryError> {
        let mut slot = self.tx.lock().await;
        match slot.take() {
            Some(tx) => tx.commit().await.map_err(|e| {
                let err = QueryError::from(e);
                warn!("Commit failed: {}", err);
                err
            }),
            None => Ok(()),
        }
    }

    /// 回滚当前事务
    pub async fn rollback(&self) -> Result<(), QueryError> {
        let mut slot = self.tx.lock().await;
        match slot.take() {
            Some(tx) => tx.rollback().await.map_err(QueryError::from),
            None => Ok(()),
        }
    }

    /// 请求结束时关闭会话，丢弃所有未提交的修改
    pub async fn close(&self) {
        if let Err(e) = self.rollback().await {
            warn!("Failed to close database session cleanly: {}", e);
        } else {
            debug!("Database session closed");
        }
    }
}
