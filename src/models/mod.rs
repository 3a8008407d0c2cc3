pub mod classes;
pub mod common;
pub mod files;
pub mod students;
pub mod system;
pub mod teachers;

pub use common::response::ApiResponse;

use serde::Serialize;
use ts_rs::TS;

/// 班级标识符（数字字符串，如 "4"）
pub type ClassId = String;

/// 教师标识符（如 "T1"）
pub type TeacherId = String;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    PermissionDenied = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    StoreInvariantViolated = 1009,

    // 教师 2xxx
    TeacherIdentityInvalid = 2000,
    TeacherNotFound = 2001,

    // 班级 3xxx
    ClassNotFound = 3000,
    ClassPermissionDenied = 3001,

    // 文件 4xxx
    FileTypeNotAllowed = 4001,
    FileSizeExceeded = 4002,
    FileNotFound = 4003,
    MultifileUploadNotAllowed = 4004,
    FileOperationFailed = 4005,
}
