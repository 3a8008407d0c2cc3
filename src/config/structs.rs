use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub store: StoreConfig,
    pub upload: UploadConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub max_age: usize,
}

/// JSON 记录存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_dir: String,               // JSON 文件所在目录
    pub classes_file: String,           // 班级表文件名
    pub teachers_file: String,          // 教师表文件名
    pub students_file: String,          // 学生名录文件名
    pub seed_on_startup: bool,          // 启动时为缺失的存储写入种子数据
    pub seed_file: String,              // 自定义种子文件，留空使用内置数据
    pub prune_students_on_delete: bool, // 删除班级时同时删除学生名录条目
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,                // 上传目录
    pub max_size: usize,            // 单文件最大字节数
    pub allowed_types: Vec<String>, // 允许的扩展名
}
