use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求
//
// 班级归属于发起请求的教师（来自 X-Teacher-Identity 头），
// 班级 ID 由服务端按 "最大 ID + 1" 分配。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub name: String,
}
