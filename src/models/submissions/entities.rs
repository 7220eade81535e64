//! 项目提交领域模型
//!
//! 提交的 status/review_stage/scores 只能通过 review::transition
//! 中的状态机操作变更，存储层和路由层不得绕过。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交审批状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "frontend/submission.ts")]
pub enum SubmissionStatus {
    PendingGuide, // 待指导教师审核
    PendingRnd,   // 待研发部门审核
    PendingHod,   // 待系主任审核
    Approved,     // 已立项，进入评分阶段
    Rejected,     // 已驳回（终态）
}

impl SubmissionStatus {
    pub const PENDING_GUIDE: &'static str = "pending_guide";
    pub const PENDING_RND: &'static str = "pending_rnd";
    pub const PENDING_HOD: &'static str = "pending_hod";
    pub const APPROVED: &'static str = "approved";
    pub const REJECTED: &'static str = "rejected";

    /// 是否为终态（驳回后不可恢复）
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Rejected)
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::PendingGuide => write!(f, "{}", Self::PENDING_GUIDE),
            SubmissionStatus::PendingRnd => write!(f, "{}", Self::PENDING_RND),
            SubmissionStatus::PendingHod => write!(f, "{}", Self::PENDING_HOD),
            SubmissionStatus::Approved => write!(f, "{}", Self::APPROVED),
            SubmissionStatus::Rejected => write!(f, "{}", Self::REJECTED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING_GUIDE => Ok(SubmissionStatus::PendingGuide),
            Self::PENDING_RND => Ok(SubmissionStatus::PendingRnd),
            Self::PENDING_HOD => Ok(SubmissionStatus::PendingHod),
            Self::APPROVED => Ok(SubmissionStatus::Approved),
            Self::REJECTED => Ok(SubmissionStatus::Rejected),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 评审阶段
//
// 仅当 status = Approved 时存在；声明顺序即推进顺序，
// 派生的 Ord 用于保证阶段只会单调前进。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "frontend/submission.ts")]
pub enum ReviewStage {
    Stage1,
    Stage2,
    InternalFinal,
    ExternalFinal,
    Completed,
}

impl ReviewStage {
    pub const STAGE1: &'static str = "stage1";
    pub const STAGE2: &'static str = "stage2";
    pub const INTERNAL_FINAL: &'static str = "internal_final";
    pub const EXTERNAL_FINAL: &'static str = "external_final";
    pub const COMPLETED: &'static str = "completed";

    /// 下一阶段；Completed 为终态
    pub fn next(&self) -> Option<ReviewStage> {
        match self {
            ReviewStage::Stage1 => Some(ReviewStage::Stage2),
            ReviewStage::Stage2 => Some(ReviewStage::InternalFinal),
            ReviewStage::InternalFinal => Some(ReviewStage::ExternalFinal),
            ReviewStage::ExternalFinal => Some(ReviewStage::Completed),
            ReviewStage::Completed => None,
        }
    }

    /// 是否为可打分的阶段（Completed 不可打分）
    pub fn is_scorable(&self) -> bool {
        !matches!(self, ReviewStage::Completed)
    }

    /// 是否为校外评审阶段
    pub fn is_external(&self) -> bool {
        matches!(self, ReviewStage::ExternalFinal)
    }
}

impl<'de> Deserialize<'de> for ReviewStage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ReviewStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStage::Stage1 => write!(f, "{}", Self::STAGE1),
            ReviewStage::Stage2 => write!(f, "{}", Self::STAGE2),
            ReviewStage::InternalFinal => write!(f, "{}", Self::INTERNAL_FINAL),
            ReviewStage::ExternalFinal => write!(f, "{}", Self::EXTERNAL_FINAL),
            ReviewStage::Completed => write!(f, "{}", Self::COMPLETED),
        }
    }
}

impl std::str::FromStr for ReviewStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::STAGE1 => Ok(ReviewStage::Stage1),
            Self::STAGE2 => Ok(ReviewStage::Stage2),
            Self::INTERNAL_FINAL => Ok(ReviewStage::InternalFinal),
            Self::EXTERNAL_FINAL => Ok(ReviewStage::ExternalFinal),
            Self::COMPLETED => Ok(ReviewStage::Completed),
            _ => Err(format!("Invalid review stage: {s}")),
        }
    }
}

// 点子状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "frontend/submission.ts")]
pub enum IdeaStatus {
    Pending,
    Accepted,
    Discarded,
}

impl IdeaStatus {
    pub const PENDING: &'static str = "pending";
    pub const ACCEPTED: &'static str = "accepted";
    pub const DISCARDED: &'static str = "discarded";
}

impl<'de> Deserialize<'de> for IdeaStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdeaStatus::Pending => write!(f, "{}", Self::PENDING),
            IdeaStatus::Accepted => write!(f, "{}", Self::ACCEPTED),
            IdeaStatus::Discarded => write!(f, "{}", Self::DISCARDED),
        }
    }
}

impl std::str::FromStr for IdeaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(IdeaStatus::Pending),
            Self::ACCEPTED => Ok(IdeaStatus::Accepted),
            Self::DISCARDED => Ok(IdeaStatus::Discarded),
            _ => Err(format!("Invalid idea status: {s}")),
        }
    }
}

// 项目点子
//
// 被淘汰的点子永久保留，作为团队的历史记录。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct ProjectIdea {
    pub id: i64,
    pub ordinal: i32,
    pub title: String,
    pub description: String,
    pub r#abstract: Option<String>,
    pub keywords: Vec<String>,
    pub github_url: Option<String>,
    pub status: IdeaStatus,
}

// 评分条目
//
// 唯一键为 (evaluator_id, criteria, review_type, member_id)，
// 同一评审重复提交时覆盖旧值而不是追加。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct ScoreEntry {
    pub evaluator_id: i64,
    pub criteria: String,
    pub value: f64,
    pub comment: Option<String>,
    pub review_type: ReviewStage,
    /// Some(_) 表示对单个成员的个人贡献评分，None 表示团队评分
    pub member_id: Option<i64>,
}

impl ScoreEntry {
    /// 是否团队级评分（个人贡献分不计入团队平均分）
    pub fn is_team_level(&self) -> bool {
        self.member_id.is_none()
    }

    /// upsert 唯一键
    pub fn upsert_key(&self) -> (i64, &str, ReviewStage, Option<i64>) {
        (
            self.evaluator_id,
            self.criteria.as_str(),
            self.review_type,
            self.member_id,
        )
    }
}

// 项目提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/submission.ts")]
pub struct ProjectSubmission {
    pub id: i64,
    pub team_id: i64,
    pub hackathon_id: i64,
    pub ideas: Vec<ProjectIdea>,
    pub status: SubmissionStatus,
    /// 仅当 status = Approved 时为 Some
    pub review_stage: Option<ReviewStage>,
    pub scores: Vec<ScoreEntry>,
    /// 派生字段：每次评分变更后由聚合器重算，不允许直接赋值
    pub average_score: f64,
    pub reject_reason: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ProjectSubmission {
    /// 提交是否已走到终态（驳回或完成评审）
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal() || self.review_stage == Some(ReviewStage::Completed)
    }

    pub fn accepted_idea(&self) -> Option<&ProjectIdea> {
        self.ideas.iter().find(|i| i.status == IdeaStatus::Accepted)
    }
}

// 状态机产生的待持久化变更
//
// 每个评审操作恰好产生一个变更，由存储层在单个事务中落库，
// 保证外部观察不到 scores 与 average_score 不一致的中间态。
#[derive(Debug, Clone)]
pub enum ReviewMutation {
    /// 点子审批：一个被采纳、其余淘汰，状态推进到下一关
    IdeaDecision {
        idea_statuses: Vec<(i64, IdeaStatus)>,
        status: SubmissionStatus,
        review_stage: Option<ReviewStage>,
    },
    /// 驳回（终态）
    Rejected { remarks: String },
    /// 记录/覆盖一条评分；平均分由存储层按落库后的全量评分重算
    ScoreRecorded { entry: ScoreEntry },
    /// 管理员显式推进评审阶段
    StageAdvanced { stage: ReviewStage },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_stage_order_matches_progression() {
        let mut stage = ReviewStage::Stage1;
        while let Some(next) = stage.next() {
            assert!(stage < next, "next() 必须严格前进");
            stage = next;
        }
        assert_eq!(stage, ReviewStage::Completed);
    }

    #[test]
    fn test_completed_is_not_scorable() {
        assert!(!ReviewStage::Completed.is_scorable());
        assert!(ReviewStage::ExternalFinal.is_scorable());
        assert!(ReviewStage::ExternalFinal.is_external());
        assert!(!ReviewStage::InternalFinal.is_external());
    }

    #[test]
    fn test_submission_status_round_trip() {
        for status in [
            SubmissionStatus::PendingGuide,
            SubmissionStatus::PendingRnd,
            SubmissionStatus::PendingHod,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
        ] {
            let parsed: SubmissionStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("frozen".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_only_rejected_is_terminal_status() {
        assert!(SubmissionStatus::Rejected.is_terminal());
        assert!(!SubmissionStatus::Approved.is_terminal());
        assert!(!SubmissionStatus::PendingGuide.is_terminal());
    }
}
