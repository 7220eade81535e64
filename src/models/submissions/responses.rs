use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{ProjectSubmission, ReviewStage};
use crate::models::PaginationInfo;
use crate::review::aggregate::{CriteriaAverage, StageSummary};

// 提交列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<ProjectSubmission>,
    pub pagination: PaginationInfo,
}

// 提交详情响应：附带各阶段评分汇总
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct SubmissionDetailResponse {
    pub submission: ProjectSubmission,
    pub stage_summaries: Vec<StageSummary>,
}

// 全场评分项统计响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct CriteriaStatsResponse {
    pub hackathon_id: i64,
    pub stage: ReviewStage,
    /// 参与统计的提交数
    pub submission_count: i64,
    pub items: Vec<CriteriaAverage>,
}
