use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 团队成员
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/team.ts")]
pub struct TeamMember {
    pub user_id: i64,
    pub username: String,
    pub profile_name: Option<String>,
    pub ordinal: i32,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 团队实体
//
// guide_id 可随时变更，与提交状态无关。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/team.ts")]
pub struct Team {
    pub id: i64,
    pub hackathon_id: i64,
    pub name: String,
    pub guide_id: Option<i64>,
    pub members: Vec<TeamMember>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Team {
    pub fn has_member(&self, user_id: i64) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }
}
