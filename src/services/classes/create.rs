use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ClassService;
use crate::errors::{Result, RosterError};
use crate::middlewares::RequireTeacher;
use crate::models::classes::entities::ClassMap;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::classes::responses::ClassCreatedResponse;
use crate::models::teachers::entities::TeacherMap;
use crate::models::{ApiResponse, ClassId};
use crate::services::{missing_identity_response, students};
use crate::storage::{RecordStore, RecordStoreExt, StoreName};

/// 创建班级并分配给教师
///
/// 新班级 ID 为现有最大数字 ID 加一，不复用已删除班级留下的空缺。
/// 教师未知时返回 Unauthorized，且不会写入任何存储。
pub async fn create_class(
    storage: &dyn RecordStore,
    teacher_id: &str,
    new_class_name: &str,
) -> Result<ClassId> {
    let mut classes: ClassMap = storage.load_as(StoreName::Classes).await?;
    let mut teachers: TeacherMap = storage.load_as(StoreName::Teachers).await?;

    let Some(teacher) = teachers.get_mut(teacher_id) else {
        warn!("Rejected class creation by unknown teacher {}", teacher_id);
        return Err(RosterError::unauthorized(format!(
            "Unknown teacher {teacher_id}: you can only create classes you are responsible for"
        )));
    };

    let class_name = new_class_name.trim();
    if class_name.is_empty() {
        return Err(RosterError::validation("Class name must not be empty"));
    }

    let class_id = next_class_id(&classes)?;
    classes.insert(class_id.clone(), class_name.to_string());
    teacher.classes.push(class_id.clone());

    storage.save_as(StoreName::Classes, &classes).await?;
    storage.save_as(StoreName::Teachers, &teachers).await?;
    students::initialize_class(storage, &class_id).await?;

    info!(
        "Class {} ({}) created by teacher {}",
        class_id, class_name, teacher_id
    );
    Ok(class_id)
}

/// 计算下一个班级 ID
pub fn next_class_id(classes: &ClassMap) -> Result<ClassId> {
    let mut max_id: Option<i64> = None;
    for class_id in classes.keys() {
        let value = class_id.trim().parse::<i64>().map_err(|_| {
            RosterError::configuration(format!("Class id {class_id:?} is not numeric"))
        })?;
        max_id = Some(max_id.map_or(value, |current| current.max(value)));
    }

    let max_id = max_id.ok_or_else(|| {
        RosterError::configuration("Class store is empty, cannot derive the next class id")
    })?;

    max_id
        .checked_add(1)
        .map(|id| id.to_string())
        .ok_or_else(|| RosterError::configuration("Class id overflow"))
}

pub(super) async fn handle_create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let Some(identity) = RequireTeacher::extract_identity(request) else {
        return Ok(missing_identity_response());
    };
    let storage = service.get_storage(request);

    match create_class(storage.as_ref(), &identity.teacher_id, &class_data.name).await {
        Ok(id) => Ok(HttpResponse::Created().json(ApiResponse::success(
            ClassCreatedResponse {
                id,
                name: class_data.name.trim().to_string(),
            },
            format!("Class created successfully: {}", class_data.name.trim()),
        ))),
        Err(e) => Ok(ApiResponse::from_error_with_code(&e, e.class_api_code())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::StudentMap;
    use crate::services::classes::test_support::{seeded_store, snapshot};
    use crate::storage::JsonFileStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_class_assigns_max_plus_one() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        let class_id = create_class(&store, "T1", "新班").await.unwrap();
        assert_eq!(class_id, "8");

        let classes: ClassMap = store.load_as(StoreName::Classes).await.unwrap();
        let ids: Vec<&str> = classes.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["3", "4", "7", "8"]);
        assert_eq!(classes["8"], "新班");

        let teachers: TeacherMap = store.load_as(StoreName::Teachers).await.unwrap();
        assert_eq!(teachers["T1"].classes, vec!["4", "7", "8"]);
        assert_eq!(teachers["T2"].classes, vec!["3"]);

        let students: StudentMap = store.load_as(StoreName::Students).await.unwrap();
        assert_eq!(students["8"], Vec::<String>::new());
        assert_eq!(students["4"].len(), 2);
    }

    #[tokio::test]
    async fn test_create_class_unknown_teacher_leaves_stores_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;
        let before = snapshot(&store);

        let err = create_class(&store, "T99", "新班").await.unwrap_err();
        assert!(matches!(err, RosterError::Unauthorized(_)));
        assert_eq!(snapshot(&store), before);
    }

    #[tokio::test]
    async fn test_create_class_does_not_reuse_deleted_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        let first = create_class(&store, "T1", "甲").await.unwrap();
        assert_eq!(first, "8");
        let second = create_class(&store, "T1", "乙").await.unwrap();
        assert_eq!(second, "9");

        crate::services::classes::delete_class(&store, "T1", "甲", false)
            .await
            .unwrap();
        let third = create_class(&store, "T2", "丙").await.unwrap();
        assert_eq!(third, "10");
    }

    #[tokio::test]
    async fn test_create_class_on_empty_store_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;
        store
            .save_as(StoreName::Classes, &ClassMap::new())
            .await
            .unwrap();
        let before = snapshot(&store);

        let err = create_class(&store, "T1", "新班").await.unwrap_err();
        assert_eq!(err.code(), "E003");
        assert_eq!(snapshot(&store), before);
    }

    #[tokio::test]
    async fn test_create_class_rejects_blank_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;
        let before = snapshot(&store);

        let err = create_class(&store, "T1", "   ").await.unwrap_err();
        assert_eq!(err.code(), "E006");
        assert_eq!(snapshot(&store), before);
    }

    #[tokio::test]
    async fn test_create_class_without_any_store_is_unauthorized() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());

        let err = create_class(&store, "T1", "新班").await.unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_next_class_id() {
        let classes: ClassMap = [("10", "a"), ("2", "b"), ("7", "c")]
            .into_iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect();
        assert_eq!(next_class_id(&classes).unwrap(), "11");

        let mut bad = classes.clone();
        bad.insert("x1".into(), "d".into());
        assert_eq!(next_class_id(&bad).unwrap_err().code(), "E003");

        assert_eq!(next_class_id(&ClassMap::new()).unwrap_err().code(), "E003");
    }
}
