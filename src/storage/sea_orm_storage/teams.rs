use super::SeaOrmStorage;
use crate::entity::prelude::{TeamMemberModel, Users};
use crate::entity::team_members::{
    ActiveModel as TeamMemberActiveModel, Column as TeamMemberColumn, Entity as TeamMembers,
};
use crate::entity::teams::{ActiveModel, Column, Entity as Teams, Model as TeamDbModel};
use crate::errors::{HackSystemError, Result};
use crate::models::{
    PaginationInfo,
    teams::{
        entities::{Team, TeamMember},
        requests::{CreateTeamRequest, TeamListQuery},
        responses::TeamListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建团队，创建者自动成为 1 号成员
    pub async fn create_team_impl(&self, creator_id: i64, req: CreateTeamRequest) -> Result<Team> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let team = ActiveModel {
            hackathon_id: Set(req.hackathon_id),
            name: Set(req.name),
            guide_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| HackSystemError::database_operation(format!("创建团队失败: {e}")))?;

        TeamMemberActiveModel {
            team_id: Set(team.id),
            user_id: Set(creator_id),
            ordinal: Set(1),
            joined_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| HackSystemError::database_operation(format!("添加创建者失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("提交事务失败: {e}")))?;

        let members = self.load_team_members(&self.db, team.id).await?;
        Ok(team.into_team(members))
    }

    /// 通过 ID 获取团队（含成员）
    pub async fn get_team_by_id_impl(&self, id: i64) -> Result<Option<Team>> {
        let Some(team) = Teams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询团队失败: {e}")))?
        else {
            return Ok(None);
        };

        let members = self.load_team_members(&self.db, team.id).await?;
        Ok(Some(team.into_team(members)))
    }

    /// 分页列出团队
    pub async fn list_teams_with_pagination_impl(
        &self,
        query: TeamListQuery,
    ) -> Result<TeamListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Teams::find();

        if let Some(hackathon_id) = query.hackathon_id {
            select = select.filter(Column::HackathonId.eq(hackathon_id));
        }
        if let Some(guide_id) = query.guide_id {
            select = select.filter(Column::GuideId.eq(guide_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询团队总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询团队页数失败: {e}")))?;
        let teams = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询团队列表失败: {e}")))?;

        let mut items = Vec::with_capacity(teams.len());
        for team in teams {
            let members = self.load_team_members(&self.db, team.id).await?;
            items.push(team.into_team(members));
        }

        Ok(TeamListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 加入团队，序号接在现有成员之后
    pub async fn join_team_impl(&self, team_id: i64, user_id: i64) -> Result<Team> {
        let now = chrono::Utc::now().timestamp();

        let max_ordinal = TeamMembers::find()
            .filter(TeamMemberColumn::TeamId.eq(team_id))
            .order_by_desc(TeamMemberColumn::Ordinal)
            .one(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询成员失败: {e}")))?
            .map(|m| m.ordinal)
            .unwrap_or(0);

        TeamMemberActiveModel {
            team_id: Set(team_id),
            user_id: Set(user_id),
            ordinal: Set(max_ordinal + 1),
            joined_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| HackSystemError::database_operation(format!("加入团队失败: {e}")))?;

        self.get_team_by_id_impl(team_id)
            .await?
            .ok_or_else(|| HackSystemError::database_operation("团队在加入后消失".to_string()))
    }

    /// 指派/取消指导教师
    pub async fn assign_guide_impl(
        &self,
        team_id: i64,
        guide_id: Option<i64>,
    ) -> Result<Option<Team>> {
        let Some(existing) = Teams::find_by_id(team_id)
            .one(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询团队失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.guide_id = Set(guide_id);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let team: TeamDbModel = model
            .update(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("指派指导教师失败: {e}")))?;

        let members = self.load_team_members(&self.db, team.id).await?;
        Ok(Some(team.into_team(members)))
    }

    /// 列出某用户作为指导教师带的团队 ID
    pub async fn list_guided_team_ids_impl(&self, user_id: i64) -> Result<Vec<i64>> {
        let teams = Teams::find()
            .filter(Column::GuideId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询指导团队失败: {e}")))?;

        Ok(teams.into_iter().map(|t| t.id).collect())
    }

    /// 按序号加载团队成员，关联用户名与显示名
    pub(crate) async fn load_team_members<C: ConnectionTrait>(
        &self,
        conn: &C,
        team_id: i64,
    ) -> Result<Vec<TeamMember>> {
        let rows = TeamMembers::find()
            .filter(TeamMemberColumn::TeamId.eq(team_id))
            .order_by_asc(TeamMemberColumn::Ordinal)
            .find_also_related(Users)
            .all(conn)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询成员失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(member, user): (TeamMemberModel, _)| {
                let (username, profile_name) = match user {
                    Some(u) => (u.username, u.profile_name),
                    None => (String::new(), None),
                };
                TeamMember {
                    user_id: member.user_id,
                    username,
                    profile_name,
                    ordinal: member.ordinal,
                    joined_at: chrono::DateTime::from_timestamp(member.joined_at, 0)
                        .unwrap_or_default(),
                }
            })
            .collect())
    }
}
