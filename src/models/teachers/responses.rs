use serde::Serialize;
use ts_rs::TS;

use crate::models::ClassId;

// 教师欢迎页信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherProfileResponse {
    pub teacher_id: String,
    // 登录时声明的姓名
    pub display_name: String,
    // 教师表中登记的姓名
    pub stored_name: String,
    pub classes: Vec<ClassId>,
}
