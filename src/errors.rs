//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::http::StatusCode;

use crate::models::ErrorCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_roster_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum RosterError {
            $($variant(String),)*
        }

        impl RosterError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RosterError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RosterError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RosterError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl RosterError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RosterError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_roster_errors! {
    Unauthorized("E001", "Unauthorized Error"),
    NotFound("E002", "Not Found Error"),
    Configuration("E003", "Configuration Error"),
    FileOperation("E004", "IO Error"),
    Serialization("E005", "Serialization Error"),
    Validation("E006", "Validation Error"),
    StorageConfig("E007", "Storage Configuration Error"),
}

impl RosterError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 映射到 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            RosterError::Unauthorized(_) => StatusCode::FORBIDDEN,
            RosterError::NotFound(_) => StatusCode::NOT_FOUND,
            RosterError::Validation(_) => StatusCode::BAD_REQUEST,
            RosterError::Configuration(_) => StatusCode::CONFLICT,
            RosterError::FileOperation(_)
            | RosterError::Serialization(_)
            | RosterError::StorageConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 映射到 API 响应中的业务错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            RosterError::Unauthorized(_) => ErrorCode::PermissionDenied,
            RosterError::NotFound(_) => ErrorCode::NotFound,
            RosterError::Validation(_) => ErrorCode::BadRequest,
            RosterError::Configuration(_) => ErrorCode::StoreInvariantViolated,
            RosterError::FileOperation(_) => ErrorCode::FileOperationFailed,
            RosterError::Serialization(_) | RosterError::StorageConfig(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

impl RosterError {
    /// 班级相关接口使用的业务错误码
    pub fn class_api_code(&self) -> ErrorCode {
        match self {
            RosterError::Unauthorized(_) => ErrorCode::ClassPermissionDenied,
            RosterError::NotFound(_) => ErrorCode::ClassNotFound,
            other => other.api_code(),
        }
    }
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RosterError {}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        RosterError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RosterError::unauthorized("test").code(), "E001");
        assert_eq!(RosterError::not_found("test").code(), "E002");
        assert_eq!(RosterError::configuration("test").code(), "E003");
        assert_eq!(RosterError::file_operation("test").code(), "E004");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            RosterError::unauthorized("test").error_type(),
            "Unauthorized Error"
        );
        assert_eq!(RosterError::file_operation("test").error_type(), "IO Error");
    }

    #[test]
    fn test_error_message() {
        let err = RosterError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = RosterError::not_found("class 4班级");
        let formatted = err.format_simple();
        assert!(formatted.contains("Not Found Error"));
        assert!(formatted.contains("4班级"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RosterError::unauthorized("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            RosterError::configuration("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RosterError::from(std::io::Error::other("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_class_api_code() {
        assert_eq!(
            RosterError::unauthorized("x").class_api_code(),
            ErrorCode::ClassPermissionDenied
        );
        assert_eq!(
            RosterError::not_found("x").class_api_code(),
            ErrorCode::ClassNotFound
        );
        assert_eq!(
            RosterError::validation("x").class_api_code(),
            ErrorCode::BadRequest
        );
        assert_eq!(
            RosterError::unauthorized("x").api_code(),
            ErrorCode::PermissionDenied
        );
    }
}
