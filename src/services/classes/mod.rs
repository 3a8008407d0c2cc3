pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{Result, RosterError};
use crate::models::classes::entities::{ClassMap, find_ids_by_name};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::teachers::entities::TeacherRecord;
use crate::models::ClassId;
use crate::storage::RecordStore;

pub use create::{create_class, next_class_id};
pub use delete::delete_class;
pub use list::{get_teacher_classes, list_teacher_class_summaries};

pub struct ClassService {
    storage: Option<Arc<dyn RecordStore>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn RecordStore> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn RecordStore>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取当前教师负责的班级列表
    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list_classes(self, request).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_class(self, request, class_data).await
    }

    // 根据班级名称删除班级
    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_name: String,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_class(self, request, class_name).await
    }
}

/// 按名称解析教师名下的班级
///
/// 名称不保证唯一：按插入顺序取第一个属于该教师的同名班级。
/// 同名班级存在但都不属于该教师时返回 Unauthorized。
pub(crate) fn resolve_owned_class(
    classes: &ClassMap,
    teacher: &TeacherRecord,
    class_name: &str,
) -> Result<ClassId> {
    let mut found_any = false;
    for class_id in find_ids_by_name(classes, class_name) {
        if teacher.owns(class_id) {
            return Ok(class_id.clone());
        }
        found_any = true;
    }

    if found_any {
        Err(RosterError::unauthorized(format!(
            "You can only delete classes you are responsible for: {class_name}"
        )))
    } else {
        Err(RosterError::not_found(format!("Class not found: {class_name}")))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> ClassMap {
        [("4", "数学"), ("7", "数学"), ("9", "语文")]
            .into_iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect()
    }

    fn teacher(owned: &[&str]) -> TeacherRecord {
        TeacherRecord {
            name: "付".into(),
            classes: owned.iter().map(|id| id.to_string()).collect(),
        }
    }

    #[test]
    fn test_resolve_first_owned_duplicate() {
        let resolved = resolve_owned_class(&classes(), &teacher(&["7"]), "数学").unwrap();
        assert_eq!(resolved, "7");

        let resolved = resolve_owned_class(&classes(), &teacher(&["4", "7"]), "数学").unwrap();
        assert_eq!(resolved, "4");
    }

    #[test]
    fn test_resolve_not_owned() {
        let err = resolve_owned_class(&classes(), &teacher(&["4"]), "语文").unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = resolve_owned_class(&classes(), &teacher(&["4"]), "英语").unwrap_err();
        assert_eq!(err.code(), "E002");
    }
}
