use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;

// 创建提交时的单个点子
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct CreateIdeaRequest {
    pub title: String,
    pub description: String,
    pub r#abstract: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub github_url: Option<String>,
}

// 创建提交请求（一次提交可携带多个候选点子）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct CreateSubmissionRequest {
    pub team_id: i64,
    pub hackathon_id: i64,
    pub ideas: Vec<CreateIdeaRequest>,
}

// 驳回请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct RejectSubmissionRequest {
    pub remarks: String,
}

// 评分请求
//
// 不携带阶段：评分总是记录在提交当前所处的评审阶段上。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct RecordScoreRequest {
    pub criteria: String,
    pub value: f64,
    pub comment: Option<String>,
    pub member_id: Option<i64>,
}

// 评分项统计查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct CriteriaStatsQuery {
    pub stage: super::entities::ReviewStage,
}

// 提交列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub hackathon_id: Option<i64>,
    pub team_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}
