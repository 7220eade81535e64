//! 比赛实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hackathons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub starts_at: i64,
    pub ends_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::teams::Entity")]
    Teams,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_hackathon(self) -> crate::models::hackathons::entities::Hackathon {
        use crate::models::hackathons::entities::{Hackathon, HackathonStatus};
        use chrono::{DateTime, Utc};

        Hackathon {
            id: self.id,
            name: self.name,
            description: self.description,
            status: self
                .status
                .parse::<HackathonStatus>()
                .unwrap_or(HackathonStatus::Upcoming),
            starts_at: DateTime::<Utc>::from_timestamp(self.starts_at, 0).unwrap_or_default(),
            ends_at: DateTime::<Utc>::from_timestamp(self.ends_at, 0).unwrap_or_default(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
