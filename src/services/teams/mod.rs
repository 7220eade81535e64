pub mod assign_guide;
pub mod create;
pub mod get;
pub mod join;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teams::requests::{AssignGuideRequest, CreateTeamRequest, TeamListQuery};
use crate::storage::Storage;

pub struct TeamService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建团队，创建者自动成为首位成员
    pub async fn create_team(
        &self,
        data: CreateTeamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_team(self, data, request).await
    }

    // 获取团队详情
    pub async fn get_team(&self, team_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_team(self, team_id, request).await
    }

    // 团队列表
    pub async fn list_teams(
        &self,
        query: TeamListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teams(self, query, request).await
    }

    // 当前用户加入团队
    pub async fn join_team(&self, team_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        join::join_team(self, team_id, request).await
    }

    // 指派或撤销指导教师
    pub async fn assign_guide(
        &self,
        team_id: i64,
        data: AssignGuideRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign_guide::assign_guide(self, team_id, data, request).await
    }
}
