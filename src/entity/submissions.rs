//! 项目提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub team_id: i64,
    pub hackathon_id: i64,
    pub status: String,
    /// 仅当 status = approved 时有值
    pub review_stage: Option<String>,
    pub average_score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub reject_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id"
    )]
    Team,
    #[sea_orm(
        belongs_to = "super::hackathons::Entity",
        from = "Column::HackathonId",
        to = "super::hackathons::Column::Id"
    )]
    Hackathon,
    #[sea_orm(has_many = "super::project_ideas::Entity")]
    ProjectIdeas,
    #[sea_orm(has_many = "super::scores::Entity")]
    Scores,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::hackathons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hackathon.def()
    }
}

impl Related<super::project_ideas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectIdeas.def()
    }
}

impl Related<super::scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 点子与评分由 Storage 层另行查出后拼装；
    /// status/review_stage 不可解析说明行已损坏，按存储错误上抛
    pub fn into_submission(
        self,
        ideas: Vec<crate::models::submissions::entities::ProjectIdea>,
        scores: Vec<crate::models::submissions::entities::ScoreEntry>,
    ) -> crate::errors::Result<crate::models::submissions::entities::ProjectSubmission> {
        use crate::errors::HackSystemError;
        use crate::models::submissions::entities::{
            ProjectSubmission, ReviewStage, SubmissionStatus,
        };
        use chrono::{DateTime, Utc};

        let status = self.status.parse::<SubmissionStatus>().map_err(|e| {
            HackSystemError::database_operation(format!(
                "提交 {} 的 status 字段损坏: {e}",
                self.id
            ))
        })?;
        let review_stage = self
            .review_stage
            .map(|s| s.parse::<ReviewStage>())
            .transpose()
            .map_err(|e| {
                HackSystemError::database_operation(format!(
                    "提交 {} 的 review_stage 字段损坏: {e}",
                    self.id
                ))
            })?;

        Ok(ProjectSubmission {
            id: self.id,
            team_id: self.team_id,
            hackathon_id: self.hackathon_id,
            ideas,
            status,
            review_stage,
            scores,
            average_score: self.average_score,
            reject_reason: self.reject_reason,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
