pub mod require_teacher;

pub use require_teacher::RequireTeacher;

use actix_web::{HttpResponse, http::StatusCode, http::header::CONTENT_TYPE};

use crate::models::{ApiResponse, ErrorCode};

// 辅助函数：创建错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::<()>::error_empty(code, message)),
    }
}
