//! JSON 文件存储实现
//!
//! 每个存储对应数据目录下的一个 JSON 文件。写入先落到同目录的临时文件，
//! 再重命名覆盖目标文件，失败时磁盘上保留的仍是上一份完整文档。

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::{debug, error};
use uuid::Uuid;

use super::{Document, RecordStore, StoreName};
use crate::config::StoreConfig;
use crate::errors::{Result, RosterError};

/// JSON 文件存储实现
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    classes_file: String,
    teachers_file: String,
    students_file: String,
}

impl JsonFileStore {
    /// 使用默认文件名在指定目录下创建存储
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            classes_file: "classes.json".to_string(),
            teachers_file: "teachers.json".to_string(),
            students_file: "students.json".to_string(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            classes_file: config.classes_file.clone(),
            teachers_file: config.teachers_file.clone(),
            students_file: config.students_file.clone(),
        }
    }

    /// 存储对应的文件路径
    pub fn path_for(&self, store: StoreName) -> PathBuf {
        let file_name = match store {
            StoreName::Classes => &self.classes_file,
            StoreName::Teachers => &self.teachers_file,
            StoreName::Students => &self.students_file,
        };
        self.data_dir.join(file_name)
    }

    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("store");
        let tmp = self
            .data_dir
            .join(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

        if let Err(e) = fs::write(&tmp, bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self, store: StoreName) -> Result<Document> {
        let path = self.path_for(store);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} store not found at {}, using empty mapping", store, path.display());
                return Ok(Document::new());
            }
            Err(e) => {
                error!("Failed to read {} store: {}", store, e);
                return Err(e.into());
            }
        };

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(document) => Ok(document),
            _ => Err(RosterError::serialization(format!(
                "{} is not a JSON object",
                path.display()
            ))),
        }
    }

    async fn save(&self, store: StoreName, document: &Document) -> Result<()> {
        let path = self.path_for(store);
        let bytes = serde_json::to_vec(document)?;
        self.write_atomic(&path, &bytes).await.inspect_err(|e| {
            error!("Failed to save {} store: {}", store, e);
        })?;
        debug!("Saved {} store ({} entries)", store, document.len());
        Ok(())
    }

    async fn exists(&self, store: StoreName) -> Result<bool> {
        Ok(fs::try_exists(self.path_for(store)).await?)
    }
}
