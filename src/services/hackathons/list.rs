use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HackathonService;
use crate::models::{ApiResponse, ErrorCode, hackathons::requests::HackathonListQuery};

pub async fn list_hackathons(
    service: &HackathonService,
    query: HackathonListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_hackathons_with_pagination(query).await {
        Ok(response) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "比赛列表获取成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("比赛列表获取失败: {e}"),
            )),
        ),
    }
}
