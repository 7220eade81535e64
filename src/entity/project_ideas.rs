//! 项目点子实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_ideas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub ordinal: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub r#abstract: Option<String>,
    /// JSON 数组字符串
    #[sea_orm(column_type = "Text", nullable)]
    pub keywords: Option<String>,
    pub github_url: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转为业务点子；status 不可解析说明行已损坏，按存储错误上抛
    pub fn into_idea(
        self,
    ) -> crate::errors::Result<crate::models::submissions::entities::ProjectIdea> {
        use crate::models::submissions::entities::{IdeaStatus, ProjectIdea};

        let status = self.status.parse::<IdeaStatus>().map_err(|e| {
            crate::errors::HackSystemError::database_operation(format!(
                "点子 {} 的 status 字段损坏: {e}",
                self.id
            ))
        })?;

        Ok(ProjectIdea {
            id: self.id,
            ordinal: self.ordinal,
            title: self.title,
            description: self.description,
            r#abstract: self.r#abstract,
            keywords: self
                .keywords
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default(),
            github_url: self.github_url,
            status,
        })
    }
}
