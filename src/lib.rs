//! HWSystem Roster - 班级名册与作业上传服务
//!
//! 基于 Actix Web 构建，所有数据保存在 JSON 文件中。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `middlewares`: 教师身份中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理与种子数据
//! - `services`: 业务逻辑层
//! - `storage`: JSON 记录存储与上传文件存储
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
