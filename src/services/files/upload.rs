use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::path::Path;
use tracing::{error, info};

use super::FileService;
use crate::config::{AppConfig, UploadConfig};
use crate::errors::{Result, RosterError};
use crate::models::files::responses::FileUploadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::UploadStore;

/// 文件扩展名（小写，带点号）
fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

fn is_allowed_type(policy: &UploadConfig, file_name: &str) -> bool {
    let extension = file_extension(file_name);
    policy
        .allowed_types
        .iter()
        .any(|t| t.to_lowercase() == extension)
}

/// 校验扩展名与大小
pub fn check_upload_policy(policy: &UploadConfig, file_name: &str, size: usize) -> Result<()> {
    if !is_allowed_type(policy, file_name) {
        return Err(RosterError::validation(format!(
            "File type not allowed, expected one of: {}",
            policy.allowed_types.join(", ")
        )));
    }
    if size > policy.max_size {
        return Err(RosterError::validation(format!(
            "File size {size} exceeds the limit of {} bytes",
            policy.max_size
        )));
    }
    Ok(())
}

/// 保存上传文件并回读内容用于展示
pub async fn process_upload(
    store: &UploadStore,
    policy: &UploadConfig,
    file_name: &str,
    content: &[u8],
) -> Result<FileUploadResponse> {
    check_upload_policy(policy, file_name, content.len())?;

    let stored_path = store.store_upload(file_name, content).await?;
    let echoed = store.read_back(&stored_path).await?;

    info!(
        "Stored upload {} ({} bytes) at {}",
        file_name,
        echoed.len(),
        stored_path.display()
    );

    Ok(FileUploadResponse {
        stored_path: stored_path.to_string_lossy().into_owned(),
        file_name: file_name.to_string(),
        size: echoed.len() as u64,
        content: String::from_utf8_lossy(&echoed).into_owned(),
        uploaded_at: chrono::Utc::now(),
    })
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let policy = &AppConfig::get().upload;
    let store = service.get_upload_store(req);

    // 文件相关信息
    let mut original_name = String::new();
    let mut content: Vec<u8> = Vec::new();
    let mut file_uploaded = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if file_uploaded {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }
        file_uploaded = true;

        original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        if !is_allowed_type(policy, &original_name) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                format!(
                    "File type not allowed, expected one of: {}",
                    policy.allowed_types.join(", ")
                ),
            )));
        }

        while let Some(chunk) = field.next().await {
            let data = chunk?;
            // 校验大小
            if content.len() + data.len() > policy.max_size {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            content.extend_from_slice(&data);
        }
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    }

    match process_upload(&store, policy, &original_name, &content).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "File uploaded successfully",
        ))),
        Err(e) => {
            error!("Upload of {} failed: {}", original_name, e);
            Ok(ApiResponse::from_error(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn policy() -> UploadConfig {
        UploadConfig {
            dir: String::new(),
            max_size: 16,
            allowed_types: vec![".py".to_string()],
        }
    }

    #[tokio::test]
    async fn test_process_upload_echoes_content() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());

        let response = process_upload(&store, &policy(), "a.py", b"print(1)\n")
            .await
            .unwrap();
        assert_eq!(response.file_name, "a.py");
        assert_eq!(response.size, 9);
        assert_eq!(response.content, "print(1)\n");
        assert!(response.stored_path.ends_with("a.py"));
    }

    #[tokio::test]
    async fn test_process_upload_rejects_other_types() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());

        let err = process_upload(&store, &policy(), "a.exe", b"MZ")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
        assert!(!temp_dir.path().join("a.exe").exists());
    }

    #[tokio::test]
    async fn test_process_upload_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path().join("uploads"));

        let err = process_upload(&store, &policy(), "../escape.py", b"x")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
        assert!(!temp_dir.path().join("escape.py").exists());
    }

    #[test]
    fn test_check_upload_policy() {
        assert!(check_upload_policy(&policy(), "HW.PY", 16).is_ok());
        assert!(check_upload_policy(&policy(), "hw.py", 17).is_err());
        assert!(check_upload_policy(&policy(), "hw", 1).is_err());
    }
}
