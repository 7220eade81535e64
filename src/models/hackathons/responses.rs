use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Hackathon;
use crate::models::PaginationInfo;

// 活动列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/hackathon.ts")]
pub struct HackathonListResponse {
    pub items: Vec<Hackathon>,
    pub pagination: PaginationInfo,
}
