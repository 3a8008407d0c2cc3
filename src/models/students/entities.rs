use indexmap::IndexMap;

use crate::models::ClassId;

/// 学生名录：班级 ID -> 学生姓名（有序）
pub type StudentMap = IndexMap<ClassId, Vec<String>>;
