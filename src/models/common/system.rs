use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 系统状态响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/system.ts")]
pub struct SystemStatusResponse {
    pub version: String,
    pub uptime_seconds: i64,
    pub server_time: chrono::DateTime<chrono::Utc>,
}
