use serde::Deserialize;
use ts_rs::TS;

use super::entities::HackathonStatus;

// 创建活动请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/hackathon.ts")]
pub struct CreateHackathonRequest {
    pub name: String,
    pub description: Option<String>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub ends_at: chrono::DateTime<chrono::Utc>,
}

// 更新活动请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/hackathon.ts")]
pub struct UpdateHackathonRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<HackathonStatus>,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 活动列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "frontend/hackathon.ts")]
pub struct HackathonListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<HackathonStatus>,
    pub search: Option<String>,
}
