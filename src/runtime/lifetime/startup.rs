use std::fs;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::{CodetaError, Result};
use crate::storage::{ConnectionProvider, create_storage};

pub struct StartupContext {
    pub provider: ConnectionProvider,
}

/// 确保上传目录存在
fn prepare_upload_dir() -> Result<()> {
    let config = AppConfig::get();
    for sub in ["archives", "submissions"] {
        let dir = std::path::Path::new(&config.upload.dir).join(sub);
        fs::create_dir_all(&dir).map_err(|e| {
            CodetaError::file_operation(format!("Failed to create {}: {e}", dir.display()))
        })?;
    }
    debug!("Upload directory ready: {}", config.upload.dir);
    Ok(())
}

/// 统计已有用户，空库时提示先注册
async fn report_users(provider: &ConnectionProvider) {
    let session = Arc::new(provider.open_session());
    match create_storage(session.clone()).count_users().await {
        Ok(0) => info!("No users found in database, visit /join to create an account"),
        Ok(count) => debug!("Database already has {} user(s)", count),
        Err(e) => warn!("Failed to count users: {}", e),
    }
    session.close().await;
}

/// 准备服务器启动的上下文
/// 包括数据库连接、迁移和上传目录
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let provider = ConnectionProvider::connect_and_migrate(&config.database).await?;
    warn!("Database initialized and migrations completed");

    report_users(&provider).await;
    prepare_upload_dir()?;

    Ok(StartupContext { provider })
}
