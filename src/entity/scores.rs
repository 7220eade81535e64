//! 评分记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub evaluator_id: i64,
    pub criteria: String,
    pub value: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub review_type: String,
    /// 个人贡献评分对应的成员，团队评分为空
    pub member_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvaluatorId",
        to = "super::users::Column::Id"
    )]
    Evaluator,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转为业务评分条目；review_type 不可解析说明行已损坏，按存储错误上抛
    pub fn into_score_entry(
        self,
    ) -> crate::errors::Result<crate::models::submissions::entities::ScoreEntry> {
        use crate::models::submissions::entities::{ReviewStage, ScoreEntry};

        let review_type = self.review_type.parse::<ReviewStage>().map_err(|e| {
            crate::errors::HackSystemError::database_operation(format!(
                "评分 {} 的 review_type 字段损坏: {e}",
                self.id
            ))
        })?;

        Ok(ScoreEntry {
            evaluator_id: self.evaluator_id,
            criteria: self.criteria,
            value: self.value,
            comment: self.comment,
            review_type,
            member_id: self.member_id,
        })
    }
}
