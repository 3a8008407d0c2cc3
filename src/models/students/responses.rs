use serde::Serialize;
use ts_rs::TS;

use crate::models::ClassId;

// 班级学生名单响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListResponse {
    pub class_id: ClassId,
    pub students: Vec<String>,
}
