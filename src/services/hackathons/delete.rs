use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HackathonService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_hackathon(
    service: &HackathonService,
    hackathon_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_hackathon(hackathon_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("比赛删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::HackathonNotFound,
            "比赛不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("比赛删除失败: {e}"),
            )),
        ),
    }
}
