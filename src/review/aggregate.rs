//! 评分聚合
//!
//! 团队平均分的计算口径：
//! - 只统计团队级评分（member_id 为空）
//! - 评分项必须能在对应阶段的团队评分表中找到，找不到的条目不参与
//! - 满分基数 = 参与评委人数 × 涉及阶段评分表满分之和
//! - 结果归一化到 [0, 10]
//!
//! 该口径对"评委只打了部分评分项"是惩罚性的：缺项按 0 分计入基数。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use ts_rs::TS;

use crate::models::submissions::entities::{ProjectSubmission, ReviewStage, ScoreEntry};
use crate::review::rubric::{Granularity, RubricRegistry};

/// 某一阶段的评分汇总
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/review.ts")]
pub struct StageSummary {
    pub stage: ReviewStage,
    pub evaluator_count: i64,
    pub total_score: f64,
    pub total_possible: f64,
    /// 归一化到 [0, 10] 的阶段得分
    pub normalized: f64,
}

/// 单个评分项在某阶段上的全场平均
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/review.ts")]
pub struct CriteriaAverage {
    pub criteria: String,
    pub name: String,
    /// 归一化到 [0, 10] 的平均得分
    pub average: f64,
    /// 参与统计的评分条目数
    pub sample_count: i64,
}

/// 取出参与聚合的条目：团队级且评分项在对应阶段评分表中存在
fn qualifying<'a>(scores: &'a [ScoreEntry], registry: &RubricRegistry) -> Vec<&'a ScoreEntry> {
    scores
        .iter()
        .filter(|s| s.is_team_level())
        .filter(|s| {
            registry
                .criterion_max(s.review_type, Granularity::Team, &s.criteria)
                .is_some()
        })
        .collect()
}

fn normalize(total: f64, possible: f64) -> f64 {
    if possible <= 0.0 {
        return 0.0;
    }
    ((total / possible) * 10.0).clamp(0.0, 10.0)
}

/// 计算提交的团队平均分
///
/// 没有任何有效评分时返回 0.0，永不报错。
pub fn compute_average(scores: &[ScoreEntry], registry: &RubricRegistry) -> f64 {
    let entries = qualifying(scores, registry);
    if entries.is_empty() {
        return 0.0;
    }

    let evaluators: HashSet<i64> = entries.iter().map(|s| s.evaluator_id).collect();
    let stages: BTreeSet<ReviewStage> = entries.iter().map(|s| s.review_type).collect();

    let full_max: f64 = stages
        .iter()
        .filter_map(|st| registry.rubric(*st, Granularity::Team))
        .map(|r| r.total_max())
        .sum();
    let total_possible = evaluators.len() as f64 * full_max;
    let total: f64 = entries.iter().map(|s| s.value).sum();

    normalize(total, total_possible)
}

/// 按阶段汇总团队评分，阶段按评审先后排序
pub fn stage_summaries(scores: &[ScoreEntry], registry: &RubricRegistry) -> Vec<StageSummary> {
    let mut by_stage: BTreeMap<ReviewStage, Vec<&ScoreEntry>> = BTreeMap::new();
    for entry in qualifying(scores, registry) {
        by_stage.entry(entry.review_type).or_default().push(entry);
    }

    by_stage
        .into_iter()
        .map(|(stage, entries)| {
            let evaluators: HashSet<i64> = entries.iter().map(|s| s.evaluator_id).collect();
            let full_max = registry
                .rubric(stage, Granularity::Team)
                .map(|r| r.total_max())
                .unwrap_or(0.0);
            let total_score: f64 = entries.iter().map(|s| s.value).sum();
            let total_possible = evaluators.len() as f64 * full_max;
            StageSummary {
                stage,
                evaluator_count: evaluators.len() as i64,
                total_score,
                total_possible,
                normalized: normalize(total_score, total_possible),
            }
        })
        .collect()
}

/// 计算某阶段各评分项在一批提交上的全场平均
///
/// 每条团队级评分条目换算为 (value / max) * 10 后求均值。
pub fn compute_criteria_averages(
    submissions: &[ProjectSubmission],
    stage: ReviewStage,
    registry: &RubricRegistry,
) -> Vec<CriteriaAverage> {
    let Some(rubric) = registry.rubric(stage, Granularity::Team) else {
        return Vec::new();
    };

    rubric
        .criteria
        .iter()
        .map(|criterion| {
            let mut sum = 0.0;
            let mut count = 0i64;
            for submission in submissions {
                for entry in &submission.scores {
                    if entry.is_team_level()
                        && entry.review_type == stage
                        && entry.criteria == criterion.id
                        && criterion.max > 0.0
                    {
                        sum += (entry.value / criterion.max) * 10.0;
                        count += 1;
                    }
                }
            }
            CriteriaAverage {
                criteria: criterion.id.clone(),
                name: criterion.name.clone(),
                average: if count > 0 { sum / count as f64 } else { 0.0 },
                sample_count: count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::{ProjectSubmission, SubmissionStatus};
    use crate::review::rubric::{Criterion, Rubric};

    fn team_entry(evaluator_id: i64, criteria: &str, value: f64, stage: ReviewStage) -> ScoreEntry {
        ScoreEntry {
            evaluator_id,
            criteria: criteria.to_string(),
            value,
            comment: None,
            review_type: stage,
            member_id: None,
        }
    }

    fn individual_entry(
        evaluator_id: i64,
        criteria: &str,
        value: f64,
        stage: ReviewStage,
        member_id: i64,
    ) -> ScoreEntry {
        ScoreEntry {
            member_id: Some(member_id),
            ..team_entry(evaluator_id, criteria, value, stage)
        }
    }

    #[test]
    fn test_no_scores_yields_zero() {
        assert_eq!(compute_average(&[], RubricRegistry::builtin()), 0.0);
    }

    #[test]
    fn test_two_evaluators_same_score() {
        // 两位评委在满分 10 的单项评分表上各打 8 分：
        // 16 / (2 * 10) * 10 = 8.0
        let registry = single_criterion_registry();
        let scores = vec![
            team_entry(1, "overall", 8.0, ReviewStage::Stage1),
            team_entry(2, "overall", 8.0, ReviewStage::Stage1),
        ];
        assert_eq!(compute_average(&scores, &registry), 8.0);
    }

    fn single_criterion_registry() -> RubricRegistry {
        RubricRegistry::new().with_rubric(
            ReviewStage::Stage1,
            Granularity::Team,
            Rubric::new("single", vec![Criterion {
                id: "overall".to_string(),
                name: "总体".to_string(),
                max: 10.0,
            }]),
        )
    }

    #[test]
    fn test_rescore_replaces_previous_value() {
        // 重新打分覆盖旧值：评委 2 把 8 改成 5，平均分应为 (8+5)/20*10 = 6.5
        let registry = single_criterion_registry();
        let scores = vec![
            team_entry(1, "overall", 8.0, ReviewStage::Stage1),
            team_entry(2, "overall", 5.0, ReviewStage::Stage1),
        ];
        assert_eq!(compute_average(&scores, &registry), 6.5);
    }

    #[test]
    fn test_individual_scores_excluded() {
        let registry = single_criterion_registry();
        let scores = vec![
            team_entry(1, "overall", 8.0, ReviewStage::Stage1),
            individual_entry(1, "contribution", 10.0, ReviewStage::Stage1, 42),
        ];
        assert_eq!(compute_average(&scores, &registry), 8.0);
    }

    #[test]
    fn test_unknown_criteria_excluded() {
        let registry = single_criterion_registry();
        let scores = vec![
            team_entry(1, "overall", 8.0, ReviewStage::Stage1),
            team_entry(1, "legacy_item", 99.0, ReviewStage::Stage1),
        ];
        assert_eq!(compute_average(&scores, &registry), 8.0);
    }

    #[test]
    fn test_result_bounded_to_ten() {
        let registry = single_criterion_registry();
        for value in [0.0, 3.3, 7.0, 10.0] {
            let scores = vec![team_entry(1, "overall", value, ReviewStage::Stage1)];
            let avg = compute_average(&scores, &registry);
            assert!((0.0..=10.0).contains(&avg), "value {value} -> avg {avg}");
        }
    }

    #[test]
    fn test_multi_stage_basis_is_union() {
        // 一阶段满分 30，二阶段满分 30；一位评委两阶段各打 30 分满分
        let registry = RubricRegistry::builtin();
        let scores = vec![
            team_entry(1, "problem_understanding", 10.0, ReviewStage::Stage1),
            team_entry(1, "innovation", 10.0, ReviewStage::Stage1),
            team_entry(1, "feasibility", 10.0, ReviewStage::Stage1),
            team_entry(1, "technical_depth", 10.0, ReviewStage::Stage2),
            team_entry(1, "progress", 10.0, ReviewStage::Stage2),
            team_entry(1, "implementation_quality", 10.0, ReviewStage::Stage2),
        ];
        assert_eq!(compute_average(&scores, registry), 10.0);
    }

    #[test]
    fn test_stage_summaries_ordered_and_normalized() {
        let registry = RubricRegistry::builtin();
        let scores = vec![
            team_entry(1, "technical_depth", 15.0, ReviewStage::Stage2),
            team_entry(1, "problem_understanding", 6.0, ReviewStage::Stage1),
            team_entry(2, "problem_understanding", 9.0, ReviewStage::Stage1),
        ];
        let summaries = stage_summaries(&scores, registry);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].stage, ReviewStage::Stage1);
        assert_eq!(summaries[0].evaluator_count, 2);
        assert_eq!(summaries[0].total_score, 15.0);
        assert_eq!(summaries[0].total_possible, 60.0);
        assert_eq!(summaries[0].normalized, 2.5);
        assert_eq!(summaries[1].stage, ReviewStage::Stage2);
        assert_eq!(summaries[1].total_possible, 30.0);
    }

    fn submission_with_scores(id: i64, scores: Vec<ScoreEntry>) -> ProjectSubmission {
        let now = chrono::Utc::now();
        ProjectSubmission {
            id,
            team_id: id,
            hackathon_id: 1,
            ideas: Vec::new(),
            status: SubmissionStatus::Approved,
            review_stage: Some(ReviewStage::Stage1),
            scores,
            average_score: 0.0,
            reject_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_criteria_averages() {
        let registry = RubricRegistry::builtin();
        let first = submission_with_scores(1, vec![
            team_entry(1, "innovation", 8.0, ReviewStage::Stage1),
            team_entry(2, "innovation", 6.0, ReviewStage::Stage1),
        ]);
        let second = submission_with_scores(
            2,
            vec![team_entry(1, "innovation", 10.0, ReviewStage::Stage1)],
        );

        let averages =
            compute_criteria_averages(&[first, second], ReviewStage::Stage1, registry);
        let innovation = averages.iter().find(|a| a.criteria == "innovation").unwrap();
        assert_eq!(innovation.sample_count, 3);
        assert_eq!(innovation.average, 8.0);

        let feasibility = averages.iter().find(|a| a.criteria == "feasibility").unwrap();
        assert_eq!(feasibility.sample_count, 0);
        assert_eq!(feasibility.average, 0.0);
    }
}
