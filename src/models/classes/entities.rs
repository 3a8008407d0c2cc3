use indexmap::IndexMap;

use crate::models::ClassId;

/// 班级表：班级 ID -> 班级名称，保持插入顺序
pub type ClassMap = IndexMap<ClassId, String>;

/// 按插入顺序查找所有名称匹配的班级 ID
pub fn find_ids_by_name<'a>(classes: &'a ClassMap, name: &'a str) -> impl Iterator<Item = &'a ClassId> {
    classes
        .iter()
        .filter(move |(_, class_name)| class_name.as_str() == name)
        .map(|(id, _)| id)
}
