use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值
            .set_default("app.system_name", "仲元小天才作业系统")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0)?
            .set_default("server.max_workers", 8)?
            .set_default("server.timeouts.client_request", 5000)?
            .set_default("server.timeouts.client_disconnect", 1000)?
            .set_default("server.timeouts.keep_alive", 30)?
            .set_default("server.limits.max_payload_size", 10 * 1024 * 1024)?
            .set_default("cors.max_age", 3600)?
            .set_default("store.data_dir", "data")?
            .set_default("store.classes_file", "classes.json")?
            .set_default("store.teachers_file", "teachers.json")?
            .set_default("store.students_file", "students.json")?
            .set_default("store.seed_on_startup", true)?
            .set_default("store.seed_file", "")?
            .set_default("store.prune_students_on_delete", false)?
            .set_default("upload.dir", "uploads")?
            .set_default("upload.max_size", 2 * 1024 * 1024)?
            .set_default("upload.allowed_types", vec![".py"])?
            // 然后加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("ROSTER")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("store.data_dir", std::env::var("DATA_DIR").ok())?
            .set_override_option("upload.dir", std::env::var("UPLOAD_DIR").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
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

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_config_files() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.store.classes_file, "classes.json");
        assert_eq!(config.store.teachers_file, "teachers.json");
        assert_eq!(config.store.students_file, "students.json");
        assert!(!config.store.prune_students_on_delete);
        assert_eq!(config.upload.allowed_types, vec![".py".to_string()]);
        assert!(config.server.workers >= 1);
    }
}
