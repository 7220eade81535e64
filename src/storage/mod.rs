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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 创建存储后端并完成数据库迁移
pub async fn create_storage() -> Result<std::sync::Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(std::sync::Arc::new(storage))
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 比赛管理方法
    // 创建比赛
    async fn create_hackathon(&self, hackathon: CreateHackathonRequest) -> Result<Hackathon>;
    // 通过ID获取比赛信息
    async fn get_hackathon_by_id(&self, id: i64) -> Result<Option<Hackathon>>;
    // 列出比赛
    async fn list_hackathons_with_pagination(
        &self,
        query: HackathonListQuery,
    ) -> Result<HackathonListResponse>;
    // 更新比赛信息
    async fn update_hackathon(
        &self,
        id: i64,
        update: UpdateHackathonRequest,
    ) -> Result<Option<Hackathon>>;
    // 删除比赛
    async fn delete_hackathon(&self, id: i64) -> Result<bool>;

    /// 团队管理方法
    // 创建团队，创建者自动成为第一位成员
    async fn create_team(&self, creator_id: i64, team: CreateTeamRequest) -> Result<Team>;
    // 通过ID获取团队信息（含成员列表）
    async fn get_team_by_id(&self, id: i64) -> Result<Option<Team>>;
    // 列出团队
    async fn list_teams_with_pagination(&self, query: TeamListQuery) -> Result<TeamListResponse>;
    // 加入团队
    async fn join_team(&self, team_id: i64, user_id: i64) -> Result<Team>;
    // 指派/取消指导教师
    async fn assign_guide(&self, team_id: i64, guide_id: Option<i64>) -> Result<Option<Team>>;
    // 列出某用户作为指导教师带的团队ID
    async fn list_guided_team_ids(&self, user_id: i64) -> Result<Vec<i64>>;

    /// 提交与评审方法
    // 创建提交（含候选点子），同一团队在同一比赛中只能有一个提交
    async fn create_submission(
        &self,
        submission: CreateSubmissionRequest,
    ) -> Result<ProjectSubmission>;
    // 通过ID获取提交（含点子与评分）
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<ProjectSubmission>>;
    // 查询团队在某比赛中的提交
    async fn get_submission_by_team_and_hackathon(
        &self,
        team_id: i64,
        hackathon_id: i64,
    ) -> Result<Option<ProjectSubmission>>;
    // 列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 列出某比赛的全部提交（含评分，供统计使用）
    async fn list_submissions_by_hackathon(
        &self,
        hackathon_id: i64,
    ) -> Result<Vec<ProjectSubmission>>;
    // 在单个事务中落库一次评审变更
    async fn apply_review_mutation(
        &self,
        submission_id: i64,
        mutation: ReviewMutation,
    ) -> Result<()>;
}
