pub mod init;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::RecordStore;

pub use init::{initialize_class, remove_class};
pub use list::list_students;

pub struct StudentService {
    storage: Option<Arc<dyn RecordStore>>,
}

impl StudentService {
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

    // 查看班级学生名单
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        class_id: String,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_students(self, request, class_id).await
    }
}
