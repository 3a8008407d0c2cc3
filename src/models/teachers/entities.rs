use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::RosterError;
use crate::models::{ClassId, TeacherId};

/// 教师表：教师 ID -> 教师记录
pub type TeacherMap = IndexMap<TeacherId, TeacherRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRecord {
    // 教师姓名
    pub name: String,
    // 负责的班级 ID（有序）
    #[serde(default)]
    pub classes: Vec<ClassId>,
}

impl TeacherRecord {
    pub fn owns(&self, class_id: &str) -> bool {
        self.classes.iter().any(|id| id == class_id)
    }
}

/// 教师身份声明
///
/// 由客户端提交的 `"<teacherId>:<displayName>"` 文本解析而来，
/// 仅代表一个未经验证的声明。真实部署需要接入真正的认证机制。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherIdentity {
    pub teacher_id: TeacherId,
    pub display_name: String,
}

impl FromStr for TeacherIdentity {
    type Err = RosterError;

    fn from_str(claim: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = claim.trim().split(':').collect();
        let [teacher_id, display_name] = parts.as_slice() else {
            return Err(RosterError::validation(
                "Teacher identity must be formatted as <teacherId>:<name>",
            ));
        };

        let teacher_id = teacher_id.trim();
        let display_name = display_name.trim();
        if teacher_id.is_empty() || display_name.is_empty() {
            return Err(RosterError::validation(
                "Teacher identity requires both an id and a name",
            ));
        }

        Ok(Self {
            teacher_id: teacher_id.to_string(),
            display_name: display_name.to_string(),
        })
    }
}

impl fmt::Display for TeacherIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.teacher_id, self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity() {
        let identity: TeacherIdentity = "T1:付".parse().unwrap();
        assert_eq!(identity.teacher_id, "T1");
        assert_eq!(identity.display_name, "付");
        assert_eq!(identity.to_string(), "T1:付");
    }

    #[test]
    fn test_parse_identity_trims_whitespace() {
        let identity: TeacherIdentity = "  T2 : 温 \n".parse().unwrap();
        assert_eq!(identity.teacher_id, "T2");
        assert_eq!(identity.display_name, "温");
    }

    #[test]
    fn test_parse_identity_rejects_malformed_claims() {
        for claim in ["T1", "T1:", ":付", "a:b:c", ""] {
            let err = claim.parse::<TeacherIdentity>().unwrap_err();
            assert_eq!(err.code(), "E006", "claim {claim:?} should be rejected");
        }
    }

    #[test]
    fn test_owns() {
        let record = TeacherRecord {
            name: "付".into(),
            classes: vec!["4".into(), "7".into()],
        };
        assert!(record.owns("7"));
        assert!(!record.owns("8"));
    }
}
