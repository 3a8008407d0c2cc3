//! 种子数据与一次性初始化
//!
//! 种子数据与业务逻辑分离，默认使用编译期嵌入的 `seed/default.json`。
//! 只为尚不存在的存储写入种子数据，已有数据永远不会被覆盖。

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::{Result, RosterError};
use crate::models::classes::entities::ClassMap;
use crate::models::students::entities::StudentMap;
use crate::models::teachers::entities::TeacherMap;
use crate::storage::{RecordStore, RecordStoreExt, StoreName};

const DEFAULT_SEED: &str = include_str!("../../seed/default.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub classes: ClassMap,
    #[serde(default)]
    pub teachers: TeacherMap,
    #[serde(default)]
    pub students: StudentMap,
}

impl SeedData {
    /// 内置种子数据
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_SEED)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RosterError::serialization(format!("Invalid seed data: {e}")))
    }

    /// 从文件读取；路径为空时使用内置数据
    pub async fn load(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Self::builtin();
        }
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            RosterError::storage_config(format!("Failed to read seed file {path}: {e}"))
        })?;
        Self::from_json(&json)
    }
}

/// 为缺失的存储写入种子数据，返回被初始化的存储
pub async fn bootstrap_stores(
    storage: &dyn RecordStore,
    seed: &SeedData,
) -> Result<Vec<StoreName>> {
    let mut seeded = Vec::new();

    for store in StoreName::ALL {
        if storage.exists(store).await? {
            continue;
        }
        match store {
            StoreName::Classes => storage.save_as(store, &seed.classes).await?,
            StoreName::Teachers => storage.save_as(store, &seed.teachers).await?,
            StoreName::Students => storage.save_as(store, &seed.students).await?,
        }
        info!("Seeded {} store", store);
        seeded.push(store);
    }

    if seeded.is_empty() {
        info!("All stores already exist, skipping seed");
    } else if seeded.len() < StoreName::ALL.len() {
        warn!(
            "Only some stores were missing and have been seeded: {:?}",
            seeded
        );
    }

    Ok(seeded)
}
