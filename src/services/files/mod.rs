pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::storage::UploadStore;

pub use upload::process_upload;

pub struct FileService {
    upload_store: Option<UploadStore>,
}

impl FileService {
    pub fn new_lazy() -> Self {
        Self { upload_store: None }
    }

    pub(crate) fn get_upload_store(&self, request: &HttpRequest) -> UploadStore {
        if let Some(store) = &self.upload_store {
            store.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<UploadStore>>()
                .expect("Upload store not found in app data")
                .get_ref()
                .clone()
        }
    }

    // Handle file upload
    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }
}
