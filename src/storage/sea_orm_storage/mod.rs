//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod hackathons;
mod submissions;
mod teams;
mod users;

use crate::config::AppConfig;
use crate::errors::{HackSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| HackSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| HackSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| HackSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(HackSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    hackathons::{
        entities::Hackathon,
        requests::{CreateHackathonRequest, HackathonListQuery, UpdateHackathonRequest},
        responses::HackathonListResponse,
    },
    submissions::{
        entities::{ProjectSubmission, ReviewMutation},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    teams::{
        entities::Team,
        requests::{CreateTeamRequest, TeamListQuery},
        responses::TeamListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 比赛模块
    async fn create_hackathon(&self, hackathon: CreateHackathonRequest) -> Result<Hackathon> {
        self.create_hackathon_impl(hackathon).await
    }

    async fn get_hackathon_by_id(&self, id: i64) -> Result<Option<Hackathon>> {
        self.get_hackathon_by_id_impl(id).await
    }

    async fn list_hackathons_with_pagination(
        &self,
        query: HackathonListQuery,
    ) -> Result<HackathonListResponse> {
        self.list_hackathons_with_pagination_impl(query).await
    }

    async fn update_hackathon(
        &self,
        id: i64,
        update: UpdateHackathonRequest,
    ) -> Result<Option<Hackathon>> {
        self.update_hackathon_impl(id, update).await
    }

    async fn delete_hackathon(&self, id: i64) -> Result<bool> {
        self.delete_hackathon_impl(id).await
    }

    // 团队模块
    async fn create_team(&self, creator_id: i64, team: CreateTeamRequest) -> Result<Team> {
        self.create_team_impl(creator_id, team).await
    }

    async fn get_team_by_id(&self, id: i64) -> Result<Option<Team>> {
        self.get_team_by_id_impl(id).await
    }

    async fn list_teams_with_pagination(&self, query: TeamListQuery) -> Result<TeamListResponse> {
        self.list_teams_with_pagination_impl(query).await
    }

    async fn join_team(&self, team_id: i64, user_id: i64) -> Result<Team> {
        self.join_team_impl(team_id, user_id).await
    }

    async fn assign_guide(&self, team_id: i64, guide_id: Option<i64>) -> Result<Option<Team>> {
        self.assign_guide_impl(team_id, guide_id).await
    }

    async fn list_guided_team_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.list_guided_team_ids_impl(user_id).await
    }

    // 提交与评审模块
    async fn create_submission(
        &self,
        submission: CreateSubmissionRequest,
    ) -> Result<ProjectSubmission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<ProjectSubmission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_team_and_hackathon(
        &self,
        team_id: i64,
        hackathon_id: i64,
    ) -> Result<Option<ProjectSubmission>> {
        self.get_submission_by_team_and_hackathon_impl(team_id, hackathon_id)
            .await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn list_submissions_by_hackathon(
        &self,
        hackathon_id: i64,
    ) -> Result<Vec<ProjectSubmission>> {
        self.list_submissions_by_hackathon_impl(hackathon_id).await
    }

    async fn apply_review_mutation(
        &self,
        submission_id: i64,
        mutation: ReviewMutation,
    ) -> Result<()> {
        self.apply_review_mutation_impl(submission_id, mutation)
            .await
    }
}
