//! 上传文件存储
//!
//! 文件以提交时的原始文件名保存在上传目录下，同名文件直接覆盖。

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, error};

use crate::errors::{Result, RosterError};

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 确保上传目录存在
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            error!("Failed to create upload directory {}: {}", self.dir.display(), e);
            RosterError::file_operation(format!("Failed to create upload directory: {e}"))
        })
    }

    /// 保存上传内容，返回存储路径
    pub async fn store_upload(&self, file_name: &str, content: &[u8]) -> Result<PathBuf> {
        validate_file_name(file_name)?;
        self.ensure_dir().await?;

        let path = self.dir.join(file_name);
        fs::write(&path, content).await.map_err(|e| {
            error!("Failed to write upload {}: {}", path.display(), e);
            RosterError::file_operation(format!("Failed to write {file_name}: {e}"))
        })?;

        debug!("Stored upload {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }

    /// 从存储中重新读取文件内容
    pub async fn read_back(&self, stored_path: &Path) -> Result<Vec<u8>> {
        fs::read(stored_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RosterError::not_found(format!("{} does not exist", stored_path.display()))
            } else {
                RosterError::file_operation(format!(
                    "Failed to read {}: {e}",
                    stored_path.display()
                ))
            }
        })
    }
}

/// 文件名必须是单个普通路径分量，不能跳出上传目录
pub fn validate_file_name(file_name: &str) -> Result<()> {
    if file_name.contains(['/', '\\']) {
        return Err(RosterError::validation(
            "File name must not contain path separators",
        ));
    }

    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(RosterError::validation(format!(
            "Invalid file name: {file_name:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_then_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path().join("uploads"));

        let content = b"print('hello')\n\xff\x00";
        let path = store.store_upload("a.py", content).await.unwrap();

        assert_eq!(path, temp_dir.path().join("uploads").join("a.py"));
        assert_eq!(store.read_back(&path).await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_same_name_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());

        store.store_upload("hw.py", b"first").await.unwrap();
        let path = store.store_upload("hw.py", b"second").await.unwrap();
        assert_eq!(store.read_back(&path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_read_back_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());

        let err = store
            .read_back(&temp_dir.path().join("missing.py"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[tokio::test]
    async fn test_unusable_upload_dir_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let occupied = temp_dir.path().join("uploads");
        std::fs::write(&occupied, b"not a directory").unwrap();
        let store = UploadStore::new(&occupied);

        let err = store.store_upload("a.py", b"print(1)").await.unwrap_err();
        assert_eq!(err.code(), "E004");
        assert_eq!(std::fs::read(&occupied).unwrap(), b"not a directory");
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("作业1.py").is_ok());
        assert!(validate_file_name("a b.py").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name(".").is_err());
        assert!(validate_file_name("../x.py").is_err());
        assert!(validate_file_name("dir/x.py").is_err());
        assert!(validate_file_name("dir\\x.py").is_err());
        assert!(validate_file_name("/etc/passwd").is_err());
    }
}
