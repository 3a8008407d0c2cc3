pub mod profile;
pub mod verify;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::RecordStore;

pub use profile::teacher_profile;
pub use verify::verify_teacher;

pub struct TeacherService {
    storage: Option<Arc<dyn RecordStore>>,
}

impl TeacherService {
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

    // 获取当前教师信息
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_get_profile(self, request).await
    }
}
