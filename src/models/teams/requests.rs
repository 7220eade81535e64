use serde::Deserialize;
use ts_rs::TS;

// 创建团队请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/team.ts")]
pub struct CreateTeamRequest {
    pub hackathon_id: i64,
    pub name: String,
}

// 指派指导教师请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/team.ts")]
pub struct AssignGuideRequest {
    pub guide_id: Option<i64>,
}

// 团队列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "frontend/team.ts")]
pub struct TeamListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub hackathon_id: Option<i64>,
    pub guide_id: Option<i64>,
    pub search: Option<String>,
}
