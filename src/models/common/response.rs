use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::RosterError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 将服务层错误渲染为用户可见的 HTTP 响应
    pub fn from_error(err: &RosterError) -> HttpResponse {
        Self::from_error_with_code(err, err.api_code())
    }

    /// 同上，但使用调用方指定的业务错误码
    pub fn from_error_with_code(err: &RosterError, code: ErrorCode) -> HttpResponse {
        HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(code, err.message()))
    }
}
