use serde::Serialize;
use ts_rs::TS;

/// 上传结果，附带回读的文件内容用于展示
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "file.ts")]
pub struct FileUploadResponse {
    /// 存储路径
    pub stored_path: String,
    /// 原始文件名
    pub file_name: String,
    /// 文件大小(字节)
    pub size: u64,
    /// 回读的文件内容（按 UTF-8 解码，非法字节被替换）
    pub content: String,
    /// 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
