//! 评分表注册中心
//!
//! 每个评审阶段 × 评分粒度（团队/个人）对应一张固定的评分表。
//! 评分表是静态配置：运行期只读，不入库。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::models::submissions::entities::ReviewStage;

/// 评分粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "frontend/rubric.ts")]
pub enum Granularity {
    Team,       // 团队评分
    Individual, // 个人贡献评分
}

/// 单个评分项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/rubric.ts")]
pub struct Criterion {
    pub id: String,
    pub name: String,
    pub max: f64,
}

/// 一张评分表：某阶段某粒度下的有序评分项集合
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/rubric.ts")]
pub struct Rubric {
    pub name: String,
    pub criteria: Vec<Criterion>,
}

impl Rubric {
    pub fn new(name: impl Into<String>, criteria: Vec<Criterion>) -> Self {
        Self {
            name: name.into(),
            criteria,
        }
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// 该表单个评审能给出的最高总分
    pub fn total_max(&self) -> f64 {
        self.criteria.iter().map(|c| c.max).sum()
    }
}

fn criterion(id: &str, name: &str, max: f64) -> Criterion {
    Criterion {
        id: id.to_string(),
        name: name.to_string(),
        max,
    }
}

/// 评分表注册中心：(阶段, 粒度) -> 评分表
#[derive(Debug, Clone, Default)]
pub struct RubricRegistry {
    entries: HashMap<(ReviewStage, Granularity), Rubric>,
}

impl RubricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rubric(
        mut self,
        stage: ReviewStage,
        granularity: Granularity,
        rubric: Rubric,
    ) -> Self {
        self.entries.insert((stage, granularity), rubric);
        self
    }

    pub fn rubric(&self, stage: ReviewStage, granularity: Granularity) -> Option<&Rubric> {
        self.entries.get(&(stage, granularity))
    }

    /// 查询某评分项的满分值；评分项不存在时返回 None
    pub fn criterion_max(
        &self,
        stage: ReviewStage,
        granularity: Granularity,
        criteria_id: &str,
    ) -> Option<f64> {
        self.rubric(stage, granularity)
            .and_then(|r| r.criterion(criteria_id))
            .map(|c| c.max)
    }

    /// 内置评分表
    pub fn builtin() -> &'static RubricRegistry {
        static BUILTIN: Lazy<RubricRegistry> = Lazy::new(|| {
            let individual = |name: &str| {
                Rubric::new(
                    name,
                    vec![
                        criterion("contribution", "个人贡献度", 10.0),
                        criterion("understanding", "对项目的理解", 5.0),
                    ],
                )
            };

            RubricRegistry::new()
                .with_rubric(
                    ReviewStage::Stage1,
                    Granularity::Team,
                    Rubric::new(
                        "internal-stage-1",
                        vec![
                            criterion("problem_understanding", "问题理解", 10.0),
                            criterion("innovation", "创新性", 10.0),
                            criterion("feasibility", "可行性", 10.0),
                        ],
                    ),
                )
                .with_rubric(
                    ReviewStage::Stage2,
                    Granularity::Team,
                    Rubric::new(
                        "internal-stage-2",
                        vec![
                            criterion("technical_depth", "技术深度", 10.0),
                            criterion("progress", "项目进度", 10.0),
                            criterion("implementation_quality", "实现质量", 10.0),
                        ],
                    ),
                )
                .with_rubric(
                    ReviewStage::InternalFinal,
                    Granularity::Team,
                    Rubric::new(
                        "internal-final",
                        vec![
                            criterion("completeness", "完成度", 10.0),
                            criterion("innovation", "创新性", 10.0),
                            criterion("presentation", "展示与答辩", 10.0),
                            criterion("impact", "应用价值", 10.0),
                        ],
                    ),
                )
                .with_rubric(
                    ReviewStage::ExternalFinal,
                    Granularity::Team,
                    Rubric::new(
                        "external-final",
                        vec![
                            criterion("innovation", "创新性", 10.0),
                            criterion("execution", "落地执行", 10.0),
                            criterion("presentation", "展示与答辩", 10.0),
                            criterion("business_viability", "商业可行性", 10.0),
                        ],
                    ),
                )
                .with_rubric(
                    ReviewStage::Stage1,
                    Granularity::Individual,
                    individual("individual-stage-1"),
                )
                .with_rubric(
                    ReviewStage::Stage2,
                    Granularity::Individual,
                    individual("individual-stage-2"),
                )
                .with_rubric(
                    ReviewStage::InternalFinal,
                    Granularity::Individual,
                    individual("individual-internal-final"),
                )
                .with_rubric(
                    ReviewStage::ExternalFinal,
                    Granularity::Individual,
                    individual("individual-external-final"),
                )
        });
        &BUILTIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_scorable_stages() {
        let registry = RubricRegistry::builtin();
        for stage in [
            ReviewStage::Stage1,
            ReviewStage::Stage2,
            ReviewStage::InternalFinal,
            ReviewStage::ExternalFinal,
        ] {
            assert!(registry.rubric(stage, Granularity::Team).is_some());
            assert!(registry.rubric(stage, Granularity::Individual).is_some());
        }
        // Completed 阶段不可打分，没有评分表
        assert!(
            registry
                .rubric(ReviewStage::Completed, Granularity::Team)
                .is_none()
        );
    }

    #[test]
    fn test_criterion_max_lookup() {
        let registry = RubricRegistry::builtin();
        assert_eq!(
            registry.criterion_max(ReviewStage::Stage1, Granularity::Team, "innovation"),
            Some(10.0)
        );
        assert_eq!(
            registry.criterion_max(ReviewStage::Stage1, Granularity::Team, "no_such_criteria"),
            None
        );
        assert_eq!(
            registry.criterion_max(ReviewStage::Stage1, Granularity::Individual, "understanding"),
            Some(5.0)
        );
    }

    #[test]
    fn test_total_max() {
        let registry = RubricRegistry::builtin();
        let rubric = registry
            .rubric(ReviewStage::InternalFinal, Granularity::Team)
            .unwrap();
        assert_eq!(rubric.total_max(), 40.0);
    }
}
