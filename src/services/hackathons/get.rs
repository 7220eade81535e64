use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HackathonService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_hackathon(
    service: &HackathonService,
    hackathon_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_hackathon_by_id(hackathon_id).await {
        Ok(Some(hackathon)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(hackathon, "比赛信息获取成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::HackathonNotFound,
            "比赛不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("比赛信息获取失败: {e}"),
            )),
        ),
    }
}
