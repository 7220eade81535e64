//! 审批与评分状态机
//!
//! 所有评审操作的守卫逻辑集中在这里：谁能在什么状态下做什么。
//! 每个操作在校验通过后原地修改提交并返回对应的 ReviewMutation，
//! 由服务层交给存储层在单个事务中落库。

use crate::models::submissions::entities::{
    IdeaStatus, ProjectSubmission, ReviewMutation, ReviewStage, ScoreEntry, SubmissionStatus,
};
use crate::models::submissions::requests::RecordScoreRequest;
use crate::models::users::entities::UserRole;
use crate::review::rubric::{Granularity, RubricRegistry};

/// 评审操作的发起者
///
/// guided_team_ids 由服务层从存储加载，指导教师只对自己带的团队有审批权。
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
    pub guided_team_ids: Vec<i64>,
}

impl Actor {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self {
            id,
            role,
            guided_team_ids: Vec::new(),
        }
    }

    pub fn with_guided_teams(id: i64, role: UserRole, guided_team_ids: Vec<i64>) -> Self {
        Self {
            id,
            role,
            guided_team_ids,
        }
    }

    fn guides(&self, team_id: i64) -> bool {
        self.guided_team_ids.contains(&team_id)
    }
}

/// 评审操作被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// 角色无权执行该操作
    PermissionDenied(String),
    /// 操作在当前状态/阶段下不可用
    InvalidStageForAction(String),
    /// 评分内容不合法（评分项不存在、分值越界）
    Validation(String),
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewError::PermissionDenied(msg) => write!(f, "permission denied: {msg}"),
            ReviewError::InvalidStageForAction(msg) => write!(f, "invalid stage: {msg}"),
            ReviewError::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for ReviewError {}

/// 待审状态对应的放行角色
fn may_pass_gate(status: SubmissionStatus, actor: &Actor, team_id: i64) -> bool {
    match status {
        SubmissionStatus::PendingGuide => {
            actor.role == UserRole::Admin
                || (actor.role == UserRole::Guide && actor.guides(team_id))
        }
        SubmissionStatus::PendingRnd => matches!(
            actor.role,
            UserRole::Admin | UserRole::Rnd | UserRole::Hod
        ),
        SubmissionStatus::PendingHod => matches!(actor.role, UserRole::Admin | UserRole::Hod),
        _ => false,
    }
}

/// 审批通过后的下一个状态
fn gate_advance(status: SubmissionStatus) -> Option<(SubmissionStatus, Option<ReviewStage>)> {
    match status {
        SubmissionStatus::PendingGuide => Some((SubmissionStatus::PendingRnd, None)),
        SubmissionStatus::PendingRnd => Some((SubmissionStatus::PendingHod, None)),
        SubmissionStatus::PendingHod => {
            Some((SubmissionStatus::Approved, Some(ReviewStage::Stage1)))
        }
        _ => None,
    }
}

/// 点子审批：采纳指定点子、淘汰其余，状态推进到下一关
///
/// 最后一关（系主任）通过后提交立项，进入一阶段评审。
pub fn approve_idea(
    submission: &mut ProjectSubmission,
    idea_id: i64,
    actor: &Actor,
) -> Result<ReviewMutation, ReviewError> {
    if submission.is_terminal() {
        return Err(ReviewError::InvalidStageForAction(
            "提交已处于终态，不能再审批".to_string(),
        ));
    }
    let Some((next_status, next_stage)) = gate_advance(submission.status) else {
        return Err(ReviewError::InvalidStageForAction(
            "提交已立项，点子审批不再可用".to_string(),
        ));
    };
    if !may_pass_gate(submission.status, actor, submission.team_id) {
        return Err(ReviewError::PermissionDenied(format!(
            "角色 {} 无权审批处于 {} 状态的提交",
            actor.role, submission.status
        )));
    }
    if !submission.ideas.iter().any(|i| i.id == idea_id) {
        return Err(ReviewError::Validation(format!(
            "点子 {idea_id} 不属于该提交"
        )));
    }

    for idea in &mut submission.ideas {
        idea.status = if idea.id == idea_id {
            IdeaStatus::Accepted
        } else {
            IdeaStatus::Discarded
        };
    }
    submission.status = next_status;
    submission.review_stage = next_stage;

    Ok(ReviewMutation::IdeaDecision {
        idea_statuses: submission
            .ideas
            .iter()
            .map(|i| (i.id, i.status))
            .collect(),
        status: next_status,
        review_stage: next_stage,
    })
}

/// 驳回提交（终态）
///
/// 待审阶段由对应关卡的角色驳回；已立项的提交只有管理员能驳回。
pub fn reject(
    submission: &mut ProjectSubmission,
    actor: &Actor,
    remarks: &str,
) -> Result<ReviewMutation, ReviewError> {
    if submission.is_terminal() {
        return Err(ReviewError::InvalidStageForAction(
            "提交已处于终态，不能驳回".to_string(),
        ));
    }
    let allowed = match submission.status {
        SubmissionStatus::Approved => actor.role == UserRole::Admin,
        status => may_pass_gate(status, actor, submission.team_id),
    };
    if !allowed {
        return Err(ReviewError::PermissionDenied(format!(
            "角色 {} 无权驳回处于 {} 状态的提交",
            actor.role, submission.status
        )));
    }

    submission.status = SubmissionStatus::Rejected;
    submission.review_stage = None;
    submission.reject_reason = Some(remarks.to_string());

    Ok(ReviewMutation::Rejected {
        remarks: remarks.to_string(),
    })
}

fn may_score(stage: ReviewStage, actor: &Actor, team_id: i64) -> bool {
    if stage.is_external() {
        return matches!(actor.role, UserRole::External | UserRole::Admin);
    }
    match actor.role {
        UserRole::Admin | UserRole::ClassMentor | UserRole::Rnd | UserRole::Hod => true,
        UserRole::Guide => actor.guides(team_id),
        _ => false,
    }
}

/// 记录一条评分
///
/// 评分总是落在提交当前所处的阶段上；同一评委对同一评分项重复提交
/// 时覆盖旧值。每次评分后同步重算团队平均分。
pub fn record_score(
    submission: &mut ProjectSubmission,
    request: &RecordScoreRequest,
    actor: &Actor,
    registry: &RubricRegistry,
) -> Result<ReviewMutation, ReviewError> {
    if submission.status == SubmissionStatus::Rejected {
        return Err(ReviewError::InvalidStageForAction(
            "提交已被驳回，不能评分".to_string(),
        ));
    }
    let stage = match (submission.status, submission.review_stage) {
        (SubmissionStatus::Approved, Some(stage)) if stage.is_scorable() => stage,
        (SubmissionStatus::Approved, _) => {
            return Err(ReviewError::InvalidStageForAction(
                "评审已结束，不能再评分".to_string(),
            ));
        }
        _ => {
            return Err(ReviewError::InvalidStageForAction(
                "提交尚未立项，不能评分".to_string(),
            ));
        }
    };
    if !may_score(stage, actor, submission.team_id) {
        return Err(ReviewError::PermissionDenied(format!(
            "角色 {} 无权在 {} 阶段评分",
            actor.role, stage
        )));
    }

    let granularity = if request.member_id.is_some() {
        Granularity::Individual
    } else {
        Granularity::Team
    };
    let Some(max) = registry.criterion_max(stage, granularity, &request.criteria) else {
        return Err(ReviewError::Validation(format!(
            "评分项 {} 不在 {} 阶段的评分表中",
            request.criteria, stage
        )));
    };
    if !request.value.is_finite() || request.value < 0.0 || request.value > max {
        return Err(ReviewError::Validation(format!(
            "分值 {} 超出范围 [0, {max}]",
            request.value
        )));
    }

    let entry = ScoreEntry {
        evaluator_id: actor.id,
        criteria: request.criteria.clone(),
        value: request.value,
        comment: request.comment.clone(),
        review_type: stage,
        member_id: request.member_id,
    };

    // 同键覆盖，不同键追加
    match submission
        .scores
        .iter_mut()
        .find(|s| s.upsert_key() == entry.upsert_key())
    {
        Some(existing) => *existing = entry.clone(),
        None => submission.scores.push(entry.clone()),
    }
    submission.average_score = crate::review::aggregate::compute_average(&submission.scores, registry);

    Ok(ReviewMutation::ScoreRecorded { entry })
}

/// 推进评审阶段（仅管理员）
///
/// 阶段只会单调前进；Completed 之后不可再推进。
pub fn advance_stage(
    submission: &mut ProjectSubmission,
    actor: &Actor,
) -> Result<ReviewMutation, ReviewError> {
    if actor.role != UserRole::Admin {
        return Err(ReviewError::PermissionDenied(
            "只有管理员能推进评审阶段".to_string(),
        ));
    }
    let stage = match (submission.status, submission.review_stage) {
        (SubmissionStatus::Approved, Some(stage)) => stage,
        _ => {
            return Err(ReviewError::InvalidStageForAction(
                "提交未处于评审中，不能推进阶段".to_string(),
            ));
        }
    };
    let Some(next) = stage.next() else {
        return Err(ReviewError::InvalidStageForAction(
            "评审已完成，不能再推进阶段".to_string(),
        ));
    };

    submission.review_stage = Some(next);
    Ok(ReviewMutation::StageAdvanced { stage: next })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::ProjectIdea;

    const TEAM_ID: i64 = 7;

    fn idea(id: i64, ordinal: i32) -> ProjectIdea {
        ProjectIdea {
            id,
            ordinal,
            title: format!("idea-{id}"),
            description: "描述".to_string(),
            r#abstract: None,
            keywords: vec!["ai".to_string()],
            github_url: None,
            status: IdeaStatus::Pending,
        }
    }

    fn pending_submission() -> ProjectSubmission {
        let now = chrono::Utc::now();
        ProjectSubmission {
            id: 1,
            team_id: TEAM_ID,
            hackathon_id: 1,
            ideas: vec![idea(1, 1), idea(2, 2), idea(3, 3)],
            status: SubmissionStatus::PendingGuide,
            review_stage: None,
            scores: Vec::new(),
            average_score: 0.0,
            reject_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn approved_submission(stage: ReviewStage) -> ProjectSubmission {
        let mut s = pending_submission();
        s.ideas[0].status = IdeaStatus::Accepted;
        s.ideas[1].status = IdeaStatus::Discarded;
        s.ideas[2].status = IdeaStatus::Discarded;
        s.status = SubmissionStatus::Approved;
        s.review_stage = Some(stage);
        s
    }

    fn guide() -> Actor {
        Actor::with_guided_teams(10, UserRole::Guide, vec![TEAM_ID])
    }

    fn admin() -> Actor {
        Actor::new(1, UserRole::Admin)
    }

    fn score_request(criteria: &str, value: f64) -> RecordScoreRequest {
        RecordScoreRequest {
            criteria: criteria.to_string(),
            value,
            comment: None,
            member_id: None,
        }
    }

    #[test]
    fn test_approve_idea_marks_siblings_discarded() {
        let mut s = pending_submission();
        approve_idea(&mut s, 2, &guide()).unwrap();
        assert_eq!(s.ideas[0].status, IdeaStatus::Discarded);
        assert_eq!(s.ideas[1].status, IdeaStatus::Accepted);
        assert_eq!(s.ideas[2].status, IdeaStatus::Discarded);
        assert_eq!(s.status, SubmissionStatus::PendingRnd);
        assert_eq!(s.review_stage, None);
    }

    #[test]
    fn test_full_approval_chain_reaches_stage1() {
        let mut s = pending_submission();
        approve_idea(&mut s, 1, &guide()).unwrap();
        approve_idea(&mut s, 1, &Actor::new(20, UserRole::Rnd)).unwrap();
        let mutation = approve_idea(&mut s, 1, &Actor::new(30, UserRole::Hod)).unwrap();
        assert_eq!(s.status, SubmissionStatus::Approved);
        assert_eq!(s.review_stage, Some(ReviewStage::Stage1));
        match mutation {
            ReviewMutation::IdeaDecision {
                status,
                review_stage,
                ..
            } => {
                assert_eq!(status, SubmissionStatus::Approved);
                assert_eq!(review_stage, Some(ReviewStage::Stage1));
            }
            other => panic!("unexpected mutation: {other:?}"),
        }
    }

    #[test]
    fn test_student_cannot_approve() {
        let mut s = pending_submission();
        let err = approve_idea(&mut s, 1, &Actor::new(99, UserRole::Student)).unwrap_err();
        assert!(matches!(err, ReviewError::PermissionDenied(_)));
        // 被拒的操作不得留下任何改动
        assert_eq!(s.status, SubmissionStatus::PendingGuide);
        assert_eq!(s.ideas[0].status, IdeaStatus::Pending);
    }

    #[test]
    fn test_guide_cannot_approve_other_team() {
        let mut s = pending_submission();
        let stranger = Actor::with_guided_teams(11, UserRole::Guide, vec![999]);
        let err = approve_idea(&mut s, 1, &stranger).unwrap_err();
        assert!(matches!(err, ReviewError::PermissionDenied(_)));
    }

    #[test]
    fn test_guide_cannot_pass_hod_gate() {
        let mut s = pending_submission();
        s.status = SubmissionStatus::PendingHod;
        let err = approve_idea(&mut s, 1, &guide()).unwrap_err();
        assert!(matches!(err, ReviewError::PermissionDenied(_)));
    }

    #[test]
    fn test_hod_may_pass_rnd_gate() {
        let mut s = pending_submission();
        s.status = SubmissionStatus::PendingRnd;
        approve_idea(&mut s, 1, &Actor::new(30, UserRole::Hod)).unwrap();
        assert_eq!(s.status, SubmissionStatus::PendingHod);
    }

    #[test]
    fn test_approve_unknown_idea() {
        let mut s = pending_submission();
        let err = approve_idea(&mut s, 404, &guide()).unwrap_err();
        assert!(matches!(err, ReviewError::Validation(_)));
    }

    #[test]
    fn test_approve_after_approval_rejected() {
        let mut s = approved_submission(ReviewStage::Stage1);
        let err = approve_idea(&mut s, 1, &admin()).unwrap_err();
        assert!(matches!(err, ReviewError::InvalidStageForAction(_)));
    }

    #[test]
    fn test_reject_clears_stage_and_keeps_remarks() {
        let mut s = pending_submission();
        reject(&mut s, &guide(), "方向与赛题无关").unwrap();
        assert_eq!(s.status, SubmissionStatus::Rejected);
        assert_eq!(s.review_stage, None);
        assert_eq!(s.reject_reason.as_deref(), Some("方向与赛题无关"));
    }

    #[test]
    fn test_reject_approved_requires_admin() {
        let mut s = approved_submission(ReviewStage::Stage2);
        let err = reject(&mut s, &Actor::new(30, UserRole::Hod), "x").unwrap_err();
        assert!(matches!(err, ReviewError::PermissionDenied(_)));
        reject(&mut s, &admin(), "数据造假").unwrap();
        assert_eq!(s.status, SubmissionStatus::Rejected);
    }

    #[test]
    fn test_reject_is_terminal() {
        let mut s = pending_submission();
        reject(&mut s, &guide(), "first").unwrap();
        let err = reject(&mut s, &admin(), "second").unwrap_err();
        assert!(matches!(err, ReviewError::InvalidStageForAction(_)));
        let err = approve_idea(&mut s, 1, &admin()).unwrap_err();
        assert!(matches!(err, ReviewError::InvalidStageForAction(_)));
        let err =
            record_score(&mut s, &score_request("innovation", 5.0), &admin(), RubricRegistry::builtin())
                .unwrap_err();
        assert!(matches!(err, ReviewError::InvalidStageForAction(_)));
    }

    #[test]
    fn test_score_stamped_with_current_stage() {
        let mut s = approved_submission(ReviewStage::Stage2);
        record_score(
            &mut s,
            &score_request("technical_depth", 8.0),
            &Actor::new(40, UserRole::ClassMentor),
            RubricRegistry::builtin(),
        )
        .unwrap();
        assert_eq!(s.scores.len(), 1);
        assert_eq!(s.scores[0].review_type, ReviewStage::Stage2);
        assert_eq!(s.scores[0].evaluator_id, 40);
    }

    #[test]
    fn test_score_upsert_and_average() {
        // 两位评委打 8 分，平均 8.0；随后一位改成 5 分，平均 6.5
        let registry = RubricRegistry::new().with_rubric(
            ReviewStage::Stage1,
            Granularity::Team,
            crate::review::rubric::Rubric::new("single", vec![crate::review::rubric::Criterion {
                id: "overall".to_string(),
                name: "总体".to_string(),
                max: 10.0,
            }]),
        );
        let mut s = approved_submission(ReviewStage::Stage1);
        let first = Actor::new(41, UserRole::Rnd);
        let second = Actor::new(42, UserRole::Hod);

        record_score(&mut s, &score_request("overall", 8.0), &first, &registry).unwrap();
        record_score(&mut s, &score_request("overall", 8.0), &second, &registry).unwrap();
        assert_eq!(s.scores.len(), 2);
        assert_eq!(s.average_score, 8.0);

        let mutation =
            record_score(&mut s, &score_request("overall", 5.0), &second, &registry).unwrap();
        assert_eq!(s.scores.len(), 2);
        assert_eq!(s.average_score, 6.5);
        match mutation {
            ReviewMutation::ScoreRecorded { entry } => {
                assert_eq!(entry.value, 5.0);
            }
            other => panic!("unexpected mutation: {other:?}"),
        }
    }

    #[test]
    fn test_score_before_approval_rejected() {
        let mut s = pending_submission();
        s.status = SubmissionStatus::PendingHod;
        let err = record_score(
            &mut s,
            &score_request("innovation", 5.0),
            &admin(),
            RubricRegistry::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, ReviewError::InvalidStageForAction(_)));
    }

    #[test]
    fn test_external_stage_locks_out_internal_evaluators() {
        let mut s = approved_submission(ReviewStage::ExternalFinal);
        let err = record_score(
            &mut s,
            &score_request("innovation", 5.0),
            &Actor::new(30, UserRole::Hod),
            RubricRegistry::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, ReviewError::PermissionDenied(_)));

        record_score(
            &mut s,
            &score_request("innovation", 5.0),
            &Actor::new(50, UserRole::External),
            RubricRegistry::builtin(),
        )
        .unwrap();
    }

    #[test]
    fn test_internal_stage_locks_out_external_evaluators() {
        let mut s = approved_submission(ReviewStage::Stage1);
        let err = record_score(
            &mut s,
            &score_request("innovation", 5.0),
            &Actor::new(50, UserRole::External),
            RubricRegistry::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, ReviewError::PermissionDenied(_)));
    }

    #[test]
    fn test_score_value_out_of_bounds() {
        let mut s = approved_submission(ReviewStage::Stage1);
        for value in [-1.0, 10.5, f64::NAN] {
            let err = record_score(
                &mut s,
                &score_request("innovation", value),
                &admin(),
                RubricRegistry::builtin(),
            )
            .unwrap_err();
            assert!(matches!(err, ReviewError::Validation(_)), "value {value}");
        }
        assert!(s.scores.is_empty());
    }

    #[test]
    fn test_individual_score_uses_individual_rubric() {
        let mut s = approved_submission(ReviewStage::Stage1);
        let request = RecordScoreRequest {
            criteria: "contribution".to_string(),
            value: 9.0,
            comment: Some("核心开发".to_string()),
            member_id: Some(77),
        };
        record_score(&mut s, &request, &guide(), RubricRegistry::builtin()).unwrap();
        assert_eq!(s.scores[0].member_id, Some(77));
        // 个人评分不影响团队平均分
        assert_eq!(s.average_score, 0.0);
    }

    #[test]
    fn test_advance_stage_admin_only_and_monotonic() {
        let mut s = approved_submission(ReviewStage::Stage1);
        let err = advance_stage(&mut s, &Actor::new(30, UserRole::Hod)).unwrap_err();
        assert!(matches!(err, ReviewError::PermissionDenied(_)));

        advance_stage(&mut s, &admin()).unwrap();
        assert_eq!(s.review_stage, Some(ReviewStage::Stage2));
        advance_stage(&mut s, &admin()).unwrap();
        advance_stage(&mut s, &admin()).unwrap();
        advance_stage(&mut s, &admin()).unwrap();
        assert_eq!(s.review_stage, Some(ReviewStage::Completed));

        let err = advance_stage(&mut s, &admin()).unwrap_err();
        assert!(matches!(err, ReviewError::InvalidStageForAction(_)));
    }

    #[test]
    fn test_completed_submission_not_scorable() {
        let mut s = approved_submission(ReviewStage::Completed);
        let err = record_score(
            &mut s,
            &score_request("innovation", 5.0),
            &admin(),
            RubricRegistry::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, ReviewError::InvalidStageForAction(_)));
    }
}
