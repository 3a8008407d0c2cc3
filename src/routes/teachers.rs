use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::TeacherService;

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_profile(&req).await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireTeacher)
            .route("/me", web::get().to(get_profile)),
    );
}
