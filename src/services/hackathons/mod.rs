pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::hackathons::requests::{
    CreateHackathonRequest, HackathonListQuery, UpdateHackathonRequest,
};
use crate::storage::Storage;

pub struct HackathonService {
    storage: Option<Arc<dyn Storage>>,
}

impl HackathonService {
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

    // 创建比赛
    pub async fn create_hackathon(
        &self,
        data: CreateHackathonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_hackathon(self, data, request).await
    }

    // 获取比赛详情
    pub async fn get_hackathon(
        &self,
        hackathon_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_hackathon(self, hackathon_id, request).await
    }

    // 比赛列表
    pub async fn list_hackathons(
        &self,
        query: HackathonListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_hackathons(self, query, request).await
    }

    // 更新比赛
    pub async fn update_hackathon(
        &self,
        hackathon_id: i64,
        data: UpdateHackathonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_hackathon(self, hackathon_id, data, request).await
    }

    // 删除比赛
    pub async fn delete_hackathon(
        &self,
        hackathon_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_hackathon(self, hackathon_id, request).await
    }
}
