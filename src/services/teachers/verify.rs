use tracing::debug;

use crate::errors::{Result, RosterError};
use crate::models::teachers::entities::{TeacherIdentity, TeacherMap, TeacherRecord};
use crate::storage::{RecordStore, RecordStoreExt, StoreName};

/// 校验身份声明中的教师 ID 是否存在于教师表
///
/// 只检查 ID，不校验声明中的姓名。
pub async fn verify_teacher(
    storage: &dyn RecordStore,
    identity: &TeacherIdentity,
) -> Result<TeacherRecord> {
    let mut teachers: TeacherMap = storage.load_as(StoreName::Teachers).await?;
    let record = teachers.swap_remove(&identity.teacher_id).ok_or_else(|| {
        RosterError::unauthorized(format!("Unknown teacher {}", identity.teacher_id))
    })?;
    debug!("Verified teacher identity {}", identity);
    Ok(record)
}
