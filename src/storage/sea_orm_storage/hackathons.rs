use super::SeaOrmStorage;
use crate::entity::hackathons::{ActiveModel, Column, Entity as Hackathons};
use crate::errors::{HackSystemError, Result};
use crate::models::{
    PaginationInfo,
    hackathons::{
        entities::Hackathon,
        requests::{CreateHackathonRequest, HackathonListQuery, UpdateHackathonRequest},
        responses::HackathonListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建比赛
    pub async fn create_hackathon_impl(&self, req: CreateHackathonRequest) -> Result<Hackathon> {
        use crate::models::hackathons::entities::HackathonStatus;

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            status: Set(HackathonStatus::Upcoming.to_string()),
            starts_at: Set(req.starts_at.timestamp()),
            ends_at: Set(req.ends_at.timestamp()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("创建比赛失败: {e}")))?;

        Ok(result.into_hackathon())
    }

    /// 通过 ID 获取比赛
    pub async fn get_hackathon_by_id_impl(&self, id: i64) -> Result<Option<Hackathon>> {
        let result = Hackathons::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询比赛失败: {e}")))?;

        Ok(result.map(|m| m.into_hackathon()))
    }

    /// 分页列出比赛
    pub async fn list_hackathons_with_pagination_impl(
        &self,
        query: HackathonListQuery,
    ) -> Result<HackathonListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Hackathons::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::StartsAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询比赛总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询比赛页数失败: {e}")))?;
        let hackathons = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询比赛列表失败: {e}")))?;

        Ok(HackathonListResponse {
            items: hackathons.into_iter().map(|m| m.into_hackathon()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新比赛
    pub async fn update_hackathon_impl(
        &self,
        id: i64,
        update: UpdateHackathonRequest,
    ) -> Result<Option<Hackathon>> {
        let Some(existing) = Hackathons::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询比赛失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(starts_at) = update.starts_at {
            model.starts_at = Set(starts_at.timestamp());
        }
        if let Some(ends_at) = update.ends_at {
            model.ends_at = Set(ends_at.timestamp());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("更新比赛失败: {e}")))?;

        Ok(Some(result.into_hackathon()))
    }

    /// 删除比赛
    pub async fn delete_hackathon_impl(&self, id: i64) -> Result<bool> {
        let result = Hackathons::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("删除比赛失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
