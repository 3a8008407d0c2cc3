use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::Result;
use crate::middlewares::RequireTeacher;
use crate::models::classes::entities::ClassMap;
use crate::models::classes::responses::{ClassListResponse, ClassSummary};
use crate::models::teachers::entities::TeacherMap;
use crate::models::{ApiResponse, ClassId};
use crate::services::missing_identity_response;
use crate::storage::{RecordStore, RecordStoreExt, StoreName};

/// 教师负责的班级 ID；未知教师返回空列表
pub async fn get_teacher_classes(
    storage: &dyn RecordStore,
    teacher_id: &str,
) -> Result<Vec<ClassId>> {
    let mut teachers: TeacherMap = storage.load_as(StoreName::Teachers).await?;
    Ok(teachers
        .swap_remove(teacher_id)
        .map(|teacher| teacher.classes)
        .unwrap_or_default())
}

/// 教师负责的班级及名称
pub async fn list_teacher_class_summaries(
    storage: &dyn RecordStore,
    teacher_id: &str,
) -> Result<Vec<ClassSummary>> {
    let class_ids = get_teacher_classes(storage, teacher_id).await?;
    let classes: ClassMap = storage.load_as(StoreName::Classes).await?;

    Ok(class_ids
        .into_iter()
        .map(|id| ClassSummary {
            name: classes.get(&id).cloned(),
            id,
        })
        .collect())
}

pub(super) async fn handle_list_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(identity) = RequireTeacher::extract_identity(request) else {
        return Ok(missing_identity_response());
    };
    let storage = service.get_storage(request);

    match list_teacher_class_summaries(storage.as_ref(), &identity.teacher_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassListResponse {
                teacher_id: identity.teacher_id,
                items,
            },
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classes::test_support::seeded_store;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_teacher_classes() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        assert_eq!(get_teacher_classes(&store, "T1").await.unwrap(), vec!["4", "7"]);
    }

    #[tokio::test]
    async fn test_get_teacher_classes_unknown_teacher_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        assert!(get_teacher_classes(&store, "T99").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summaries_mark_dangling_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        let mut classes: ClassMap = store.load_as(StoreName::Classes).await.unwrap();
        classes.shift_remove("7");
        store.save_as(StoreName::Classes, &classes).await.unwrap();

        let summaries = list_teacher_class_summaries(&store, "T1").await.unwrap();
        assert_eq!(
            summaries,
            vec![
                ClassSummary {
                    id: "4".into(),
                    name: Some("4班级".into()),
                },
                ClassSummary {
                    id: "7".into(),
                    name: None,
                },
            ]
        );
    }
}
