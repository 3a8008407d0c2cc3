use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct HealthResponse {
    pub system_name: String,
    pub version: String,
    pub uptime_seconds: i64,
}
