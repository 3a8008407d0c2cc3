use tracing::debug;

use crate::errors::Result;
use crate::models::students::entities::StudentMap;
use crate::storage::{RecordStore, RecordStoreExt, StoreName};

/// 将班级的学生名单重置为空列表
pub async fn initialize_class(storage: &dyn RecordStore, class_id: &str) -> Result<()> {
    let mut students: StudentMap = storage.load_as(StoreName::Students).await?;
    students.insert(class_id.to_string(), Vec::new());
    storage.save_as(StoreName::Students, &students).await?;
    debug!("Initialized empty student list for class {}", class_id);
    Ok(())
}

/// 删除班级的学生名单条目，返回条目是否存在
pub async fn remove_class(storage: &dyn RecordStore, class_id: &str) -> Result<bool> {
    let mut students: StudentMap = storage.load_as(StoreName::Students).await?;
    if students.shift_remove(class_id).is_none() {
        return Ok(false);
    }
    storage.save_as(StoreName::Students, &students).await?;
    debug!("Removed student list for class {}", class_id);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_class_creates_store_and_resets_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());

        let mut students = StudentMap::new();
        students.insert("5".into(), vec!["学生501".into()]);
        store.save_as(StoreName::Students, &students).await.unwrap();

        initialize_class(&store, "5").await.unwrap();
        initialize_class(&store, "21").await.unwrap();

        let students: StudentMap = store.load_as(StoreName::Students).await.unwrap();
        assert!(students["5"].is_empty());
        assert!(students["21"].is_empty());
    }

    #[tokio::test]
    async fn test_remove_class() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        initialize_class(&store, "5").await.unwrap();

        assert!(remove_class(&store, "5").await.unwrap());
        assert!(!remove_class(&store, "5").await.unwrap());

        let students: StudentMap = store.load_as(StoreName::Students).await.unwrap();
        assert!(students.is_empty());
    }
}
