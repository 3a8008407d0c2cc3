use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::CreateClassRequest;
use crate::services::{ClassService, StudentService};

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// HTTP处理程序
pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn delete_class(
    req: HttpRequest,
    class_name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .delete_class(&req, class_name.into_inner())
        .await
}

pub async fn list_students(
    req: HttpRequest,
    class_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(&req, class_id.into_inner())
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireTeacher)
            .service(
                // 教师查询、创建自己负责的班级
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            .service(
                // 按班级名称删除，仅限自己负责的班级
                web::resource("/{class_name}").route(web::delete().to(delete_class)),
            )
            .service(
                // 查看自己负责班级的学生名单
                web::resource("/{class_id}/students").route(web::get().to(list_students)),
            ),
    );
}
