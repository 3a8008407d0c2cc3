//! 记录存储层
//!
//! 每个存储（班级、教师、学生）对应一份 JSON 文档，内容是一个对象映射。
//! 每次操作都完整读取、修改、整体写回；不加锁，并发写入时后写者覆盖先写者。

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::StoreConfig;
use crate::errors::{Result, RosterError};

pub mod json_file_storage;
pub mod upload_store;

pub use json_file_storage::JsonFileStore;
pub use upload_store::UploadStore;

/// JSON 对象文档，键顺序即插入顺序
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreName {
    Classes,
    Teachers,
    Students,
}

impl StoreName {
    pub const ALL: [StoreName; 3] = [StoreName::Classes, StoreName::Teachers, StoreName::Students];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreName::Classes => "classes",
            StoreName::Teachers => "teachers",
            StoreName::Students => "students",
        }
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// 读取整个文档；存储不存在时返回空映射
    async fn load(&self, store: StoreName) -> Result<Document>;
    /// 整体覆盖写入文档
    async fn save(&self, store: StoreName, document: &Document) -> Result<()>;
    /// 存储是否已经存在
    async fn exists(&self, store: StoreName) -> Result<bool>;
}

/// 带类型的读写辅助方法
#[async_trait::async_trait]
pub trait RecordStoreExt: RecordStore {
    async fn load_as<T>(&self, store: StoreName) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let document = self.load(store).await?;
        serde_json::from_value(Value::Object(document)).map_err(|e| {
            RosterError::serialization(format!("Malformed {store} store: {e}"))
        })
    }

    async fn save_as<T>(&self, store: StoreName, value: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        match serde_json::to_value(value)? {
            Value::Object(document) => self.save(store, &document).await,
            other => Err(RosterError::serialization(format!(
                "{store} store must be a JSON object, got {other}"
            ))),
        }
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}

/// 根据配置创建存储实例
pub fn create_storage(config: &StoreConfig) -> Result<Arc<dyn RecordStore>> {
    std::fs::create_dir_all(&config.data_dir).map_err(|e| {
        RosterError::storage_config(format!(
            "Failed to create data directory {}: {e}",
            config.data_dir
        ))
    })?;
    Ok(Arc::new(JsonFileStore::from_config(config)))
}
