pub mod criteria_stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::CriteriaStatsQuery;
use crate::storage::Storage;

pub struct AnalyticsService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnalyticsService {
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

    // 全场按评分项统计
    pub async fn criteria_stats(
        &self,
        hackathon_id: i64,
        query: CriteriaStatsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        criteria_stats::criteria_stats(self, hackathon_id, query, request).await
    }
}
