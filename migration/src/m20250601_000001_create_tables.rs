use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建黑客松活动表
        manager
            .create_table(
                Table::create()
                    .table(Hackathons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hackathons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Hackathons::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Hackathons::Description).text().null())
                    .col(ColumnDef::new(Hackathons::Status).string().not_null())
                    .col(ColumnDef::new(Hackathons::StartsAt).big_integer().not_null())
                    .col(ColumnDef::new(Hackathons::EndsAt).big_integer().not_null())
                    .col(
                        ColumnDef::new(Hackathons::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Hackathons::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建团队表
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::HackathonId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::GuideId).big_integer().null())
                    .col(ColumnDef::new(Teams::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Teams::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teams::Table, Teams::HackathonId)
                            .to(Hackathons::Table, Hackathons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teams::Table, Teams::GuideId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建团队成员关联表
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeamMembers::Ordinal).integer().not_null())
                    .col(
                        ColumnDef::new(TeamMembers::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 一个用户在同一团队中只能出现一次
        manager
            .create_index(
                Index::create()
                    .name("idx_team_members_team_user")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::TeamId)
                    .col(TeamMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建项目提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::HackathonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(ColumnDef::new(Submissions::ReviewStage).string().null())
                    .col(
                        ColumnDef::new(Submissions::AverageScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Submissions::RejectReason).text().null())
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::HackathonId)
                            .to(Hackathons::Table, Hackathons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 一个团队在一次活动中只有一份提交
        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_team_hackathon")
                    .table(Submissions::Table)
                    .col(Submissions::TeamId)
                    .col(Submissions::HackathonId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建项目点子表
        manager
            .create_table(
                Table::create()
                    .table(ProjectIdeas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectIdeas::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectIdeas::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectIdeas::Ordinal).integer().not_null())
                    .col(ColumnDef::new(ProjectIdeas::Title).string().not_null())
                    .col(ColumnDef::new(ProjectIdeas::Description).text().not_null())
                    .col(ColumnDef::new(ProjectIdeas::Abstract).text().null())
                    .col(ColumnDef::new(ProjectIdeas::Keywords).text().null())
                    .col(ColumnDef::new(ProjectIdeas::GithubUrl).string().null())
                    .col(ColumnDef::new(ProjectIdeas::Status).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectIdeas::Table, ProjectIdeas::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分表
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Scores::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Scores::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Scores::Criteria).string().not_null())
                    .col(ColumnDef::new(Scores::Value).double().not_null())
                    .col(ColumnDef::new(Scores::Comment).text().null())
                    .col(ColumnDef::new(Scores::ReviewType).string().not_null())
                    .col(ColumnDef::new(Scores::MemberId).big_integer().null())
                    .col(ColumnDef::new(Scores::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Scores::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scores::Table, Scores::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scores::Table, Scores::EvaluatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 评分 upsert 键：同一评审对同一提交的同一评分项（同一阶段、同一对象）只保留一条
        manager
            .create_index(
                Index::create()
                    .name("idx_scores_upsert_key")
                    .table(Scores::Table)
                    .col(Scores::SubmissionId)
                    .col(Scores::EvaluatorId)
                    .col(Scores::Criteria)
                    .col(Scores::ReviewType)
                    .col(Scores::MemberId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 团队评分的 member_id 为 NULL，唯一索引把 NULL 视为互不相等，
        // 上面的索引对团队评分不生效，补一个部分索引约束这部分行
        let team_level_index = match manager.get_database_backend() {
            sea_orm_migration::sea_orm::DbBackend::MySql => {
                "CREATE UNIQUE INDEX idx_scores_upsert_key_team ON scores \
                 (submission_id, evaluator_id, criteria, review_type, (COALESCE(member_id, 0)))"
            }
            _ => {
                "CREATE UNIQUE INDEX idx_scores_upsert_key_team ON scores \
                 (submission_id, evaluator_id, criteria, review_type) WHERE member_id IS NULL"
            }
        };
        manager
            .get_connection()
            .execute_unprepared(team_level_index)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectIdeas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hackathons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    ProfileName,
    AvatarUrl,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Hackathons {
    Table,
    Id,
    Name,
    Description,
    Status,
    StartsAt,
    EndsAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    HackathonId,
    Name,
    GuideId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeamMembers {
    Table,
    Id,
    TeamId,
    UserId,
    Ordinal,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    TeamId,
    HackathonId,
    Status,
    ReviewStage,
    AverageScore,
    RejectReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProjectIdeas {
    Table,
    Id,
    SubmissionId,
    Ordinal,
    Title,
    Description,
    Abstract,
    Keywords,
    GithubUrl,
    Status,
}

#[derive(DeriveIden)]
enum Scores {
    Table,
    Id,
    SubmissionId,
    EvaluatorId,
    Criteria,
    Value,
    Comment,
    ReviewType,
    MemberId,
    CreatedAt,
    UpdatedAt,
}
