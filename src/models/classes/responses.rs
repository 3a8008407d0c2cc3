use serde::Serialize;
use ts_rs::TS;

use crate::models::ClassId;

// 教师名下的班级条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassSummary {
    pub id: ClassId,
    // 班级已被删除但仍挂在教师名下时为空
    pub name: Option<String>,
}

// 教师班级列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassListResponse {
    pub teacher_id: String,
    pub items: Vec<ClassSummary>,
}

// 创建班级响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassCreatedResponse {
    pub id: ClassId,
    pub name: String,
}

// 删除班级响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassDeletedResponse {
    pub id: ClassId,
    pub name: String,
}
