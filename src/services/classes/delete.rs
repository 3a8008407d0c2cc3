use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ClassService, resolve_owned_class};
use crate::config::AppConfig;
use crate::errors::{Result, RosterError};
use crate::middlewares::RequireTeacher;
use crate::models::classes::entities::ClassMap;
use crate::models::classes::responses::ClassDeletedResponse;
use crate::models::teachers::entities::TeacherMap;
use crate::models::{ApiResponse, ClassId};
use crate::services::{missing_identity_response, students};
use crate::storage::{RecordStore, RecordStoreExt, StoreName};

/// 按名称删除教师名下的班级
///
/// 学生名录中的对应条目默认保留，`prune_students` 为 true 时一并删除。
pub async fn delete_class(
    storage: &dyn RecordStore,
    teacher_id: &str,
    class_display_name: &str,
    prune_students: bool,
) -> Result<ClassId> {
    let mut classes: ClassMap = storage.load_as(StoreName::Classes).await?;
    let mut teachers: TeacherMap = storage.load_as(StoreName::Teachers).await?;

    let Some(teacher) = teachers.get_mut(teacher_id) else {
        warn!("Rejected class deletion by unknown teacher {}", teacher_id);
        return Err(RosterError::unauthorized(format!(
            "Unknown teacher {teacher_id}: you can only delete classes you are responsible for"
        )));
    };

    let class_id = resolve_owned_class(&classes, teacher, class_display_name).inspect_err(|e| {
        warn!(
            "Teacher {} failed to delete class {}: {}",
            teacher_id, class_display_name, e
        );
    })?;

    classes.shift_remove(&class_id);
    teacher.classes.retain(|id| id != &class_id);

    storage.save_as(StoreName::Classes, &classes).await?;
    storage.save_as(StoreName::Teachers, &teachers).await?;

    if prune_students {
        students::remove_class(storage, &class_id).await?;
    }

    info!(
        "Class {} ({}) deleted by teacher {}",
        class_id, class_display_name, teacher_id
    );
    Ok(class_id)
}

pub(super) async fn handle_delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_name: String,
) -> ActixResult<HttpResponse> {
    let Some(identity) = RequireTeacher::extract_identity(request) else {
        return Ok(missing_identity_response());
    };
    let storage = service.get_storage(request);
    let prune_students = AppConfig::get().store.prune_students_on_delete;

    match delete_class(
        storage.as_ref(),
        &identity.teacher_id,
        &class_name,
        prune_students,
    )
    .await
    {
        Ok(id) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassDeletedResponse {
                id,
                name: class_name.clone(),
            },
            format!("Class deleted successfully: {class_name}"),
        ))),
        Err(e) => Ok(ApiResponse::from_error_with_code(&e, e.class_api_code())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::StudentMap;
    use crate::services::classes::test_support::{seeded_store, snapshot};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_delete_class_keeps_student_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        let class_id = delete_class(&store, "T1", "4班级", false).await.unwrap();
        assert_eq!(class_id, "4");

        let classes: ClassMap = store.load_as(StoreName::Classes).await.unwrap();
        assert!(!classes.contains_key("4"));
        assert!(classes.contains_key("7"));

        let teachers: TeacherMap = store.load_as(StoreName::Teachers).await.unwrap();
        assert_eq!(teachers["T1"].classes, vec!["7"]);

        let students: StudentMap = store.load_as(StoreName::Students).await.unwrap();
        assert!(students.contains_key("4"));
    }

    #[tokio::test]
    async fn test_delete_class_with_prune_removes_student_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        delete_class(&store, "T1", "7班级", true).await.unwrap();

        let students: StudentMap = store.load_as(StoreName::Students).await.unwrap();
        assert!(!students.contains_key("7"));
        assert!(students.contains_key("4"));
    }

    #[tokio::test]
    async fn test_delete_class_owned_by_other_teacher_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;
        let before = snapshot(&store);

        let err = delete_class(&store, "T1", "3班", false).await.unwrap_err();
        assert!(matches!(err, RosterError::Unauthorized(_)));
        assert_eq!(snapshot(&store), before);
    }

    #[tokio::test]
    async fn test_delete_class_unknown_teacher() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;
        let before = snapshot(&store);

        let err = delete_class(&store, "T99", "4班级", false).await.unwrap_err();
        assert!(matches!(err, RosterError::Unauthorized(_)));
        assert_eq!(snapshot(&store), before);
    }

    #[tokio::test]
    async fn test_delete_class_unknown_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        let err = delete_class(&store, "T1", "不存在", false).await.unwrap_err();
        assert!(matches!(err, RosterError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_class_removes_every_owned_occurrence() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        let mut teachers: TeacherMap = store.load_as(StoreName::Teachers).await.unwrap();
        teachers["T1"].classes.push("4".into());
        store.save_as(StoreName::Teachers, &teachers).await.unwrap();

        delete_class(&store, "T1", "4班级", false).await.unwrap();

        let teachers: TeacherMap = store.load_as(StoreName::Teachers).await.unwrap();
        assert_eq!(teachers["T1"].classes, vec!["7"]);
    }
}
