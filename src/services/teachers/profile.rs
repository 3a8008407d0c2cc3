use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, verify_teacher};
use crate::errors::Result;
use crate::middlewares::RequireTeacher;
use crate::models::ApiResponse;
use crate::models::teachers::entities::TeacherIdentity;
use crate::models::teachers::responses::TeacherProfileResponse;
use crate::services::missing_identity_response;
use crate::storage::RecordStore;

/// 教师欢迎页信息：声明的姓名、登记的姓名以及负责的班级
pub async fn teacher_profile(
    storage: &dyn RecordStore,
    identity: &TeacherIdentity,
) -> Result<TeacherProfileResponse> {
    let record = verify_teacher(storage, identity).await?;
    Ok(TeacherProfileResponse {
        teacher_id: identity.teacher_id.clone(),
        display_name: identity.display_name.clone(),
        stored_name: record.name,
        classes: record.classes,
    })
}

pub(super) async fn handle_get_profile(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(identity) = RequireTeacher::extract_identity(request) else {
        return Ok(missing_identity_response());
    };
    let storage = service.get_storage(request);

    match teacher_profile(storage.as_ref(), &identity).await {
        Ok(profile) => {
            let message = format!("Welcome, {}!", profile.display_name);
            Ok(HttpResponse::Ok().json(ApiResponse::success(profile, message)))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classes::test_support::seeded_store;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_teacher_profile() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(temp_dir.path()).await;

        let identity: TeacherIdentity = "T1:付老师".parse().unwrap();
        let profile = teacher_profile(&store, &identity).await.unwrap();
        assert_eq!(profile.teacher_id, "T1");
        assert_eq!(profile.display_name, "付老师");
        assert_eq!(profile.stored_name, "付");
        assert_eq!(profile.classes, vec!["4", "7"]);
    }
}
