use crate::config::AppConfig;
use crate::errors::Result;
use crate::runtime::seed::{SeedData, bootstrap_stores};
use crate::storage::{RecordStore, UploadStore};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn RecordStore>,
    pub upload_store: UploadStore,
}

/// 首次启动时写入种子数据
async fn seed_stores(storage: &Arc<dyn RecordStore>, config: &AppConfig) -> Result<()> {
    if !config.store.seed_on_startup {
        debug!("Seeding disabled, skipping bootstrap");
        return Ok(());
    }

    let seed = SeedData::load(&config.store.seed_file).await?;
    let seeded = bootstrap_stores(storage.as_ref(), &seed).await?;
    if !seeded.is_empty() {
        warn!("Initialized missing stores with seed data: {:?}", seeded);
    }
    Ok(())
}

/// 准备服务器启动的上下文
/// 包括记录存储、种子数据和上传目录
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage(&config.store)?;
    warn!(
        "Record store initialized in directory {}",
        config.store.data_dir
    );

    seed_stores(&storage, config).await?;

    let upload_store = UploadStore::new(&config.upload.dir);
    upload_store.ensure_dir().await?;
    warn!("Upload directory ready: {}", config.upload.dir);

    Ok(StartupContext {
        storage,
        upload_store,
    })
}
