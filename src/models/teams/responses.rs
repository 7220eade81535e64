use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Team;
use crate::models::PaginationInfo;

// 团队列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/team.ts")]
pub struct TeamListResponse {
    pub items: Vec<Team>,
    pub pagination: PaginationInfo,
}
