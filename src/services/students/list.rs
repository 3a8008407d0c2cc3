use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::{Result, RosterError};
use crate::middlewares::RequireTeacher;
use crate::models::ApiResponse;
use crate::models::students::entities::StudentMap;
use crate::models::students::responses::StudentListResponse;
use crate::services::{classes, missing_identity_response};
use crate::storage::{RecordStore, RecordStoreExt, StoreName};

/// 班级学生名单；班级不存在时返回空列表
pub async fn list_students(storage: &dyn RecordStore, class_id: &str) -> Result<Vec<String>> {
    let mut students: StudentMap = storage.load_as(StoreName::Students).await?;
    Ok(students.swap_remove(class_id).unwrap_or_default())
}

// 教师只能查看自己负责班级的学生名单
async fn list_owned_class_students(
    storage: &dyn RecordStore,
    teacher_id: &str,
    class_id: &str,
) -> Result<Vec<String>> {
    let owned = classes::get_teacher_classes(storage, teacher_id).await?;
    if !owned.iter().any(|id| id == class_id) {
        return Err(RosterError::unauthorized(format!(
            "You can only view students of classes you are responsible for: {class_id}"
        )));
    }
    list_students(storage, class_id).await
}

pub(super) async fn handle_list_students(
    service: &StudentService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let Some(identity) = RequireTeacher::extract_identity(request) else {
        return Ok(missing_identity_response());
    };
    let storage = service.get_storage(request);

    match list_owned_class_students(storage.as_ref(), &identity.teacher_id, &class_id).await {
        Ok(students) => {
            let message = if students.is_empty() {
                "This class has no student list yet"
            } else {
                "Student list retrieved successfully"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentListResponse { class_id, students },
                message,
            )))
        }
        Err(e) => Ok(ApiResponse::from_error_with_code(&e, e.class_api_code())),
    }
}
