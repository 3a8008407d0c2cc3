pub mod classes;
pub mod files;
pub mod students;
pub mod system;
pub mod teachers;

pub use classes::ClassService;
pub use files::FileService;
pub use students::StudentService;
pub use system::SystemService;
pub use teachers::TeacherService;

use actix_web::HttpResponse;

use crate::models::{ApiResponse, ErrorCode};

// 缺少教师身份时的响应（正常情况下已被 RequireTeacher 拦截）
pub(crate) fn missing_identity_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized: missing teacher identity",
    ))
}
