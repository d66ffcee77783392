use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // 内置默认值，保证没有配置文件时也能启动
            .set_default("app.system_name", "CodeTA")?
            .set_default("app.environment", environment.as_str())?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.workers", 0)?
            .set_default("server.max_workers", 8)?
            .set_default("server.timeouts.client_request", 5000)?
            .set_default("server.timeouts.client_disconnect", 1000)?
            .set_default("server.timeouts.keep_alive", 30)?
            .set_default("server.limits.max_payload_size", 16 * 1024 * 1024)?
            .set_default("database.url", "codeta.db")?
            .set_default("database.pool_size", 8)?
            .set_default("database.timeout", 10)?
            .set_default("session.secret", "")?
            .set_default("session.expiry_hours", 24)?
            .set_default("argon2.memory_cost", 19456)?
            .set_default("argon2.time_cost", 2)?
            .set_default("argon2.parallelism", 1)?
            .set_default("courses.title_scope", "instructor")?
            .set_default("upload.dir", "uploads")?
            .set_default("upload.max_size", 10 * 1024 * 1024)?
            .set_default("testing.user", "test_instructor")?
            .set_default("testing.password", "test_password")?
            .set_default("testing.course_name", "test_course")?
            .set_default("testing.course_ident", "CSET")?
            .set_default("testing.course_section", "001")?
            .set_default(
                "testing.course_description",
                "Test course description text",
            )?
            .set_default("testing.assignment_name", "test_asn")?
            .set_default("testing.assignment_description", "This is a test course")?
            .set_default("testing.assignment_due", "2014-5-4 23:59:59")?
            .set_default("testing.assignment_points", "100")?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("CODETA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("session.secret", std::env::var("SESSION_SECRET").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        if app_config.session.secret.is_empty() {
            if app_config.is_production() {
                return Err(ConfigError::Message(
                    "session.secret must be set in production".to_string(),
                ));
            }
            app_config.session.secret = format!("codeta-{}-insecure", app_config.app.environment);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 检查是否为测试环境
    pub fn is_testing(&self) -> bool {
        self.app.environment == "testing"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TitleScope;

    #[test]
    fn test_defaults_load_without_files() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert_eq!(config.app.system_name, "CodeTA");
        assert_eq!(config.courses.title_scope, TitleScope::Instructor);
        assert!(config.server.workers >= 1);
        assert!(!config.session.secret.is_empty());
    }

    #[test]
    fn test_testing_fixtures() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert_eq!(config.testing.course_ident, "CSET");
        assert_eq!(config.testing.course_section, "001");
    }
}
