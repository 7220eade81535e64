use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HackathonService;
use crate::models::{ApiResponse, ErrorCode, hackathons::requests::UpdateHackathonRequest};

pub async fn update_hackathon(
    service: &HackathonService,
    hackathon_id: i64,
    data: UpdateHackathonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_hackathon(hackathon_id, data).await {
        Ok(Some(hackathon)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(hackathon, "比赛更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::HackathonNotFound,
            "比赛不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("比赛更新失败: {e}"),
            )),
        ),
    }
}
