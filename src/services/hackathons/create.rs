use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HackathonService;
use crate::models::{ApiResponse, ErrorCode, hackathons::requests::CreateHackathonRequest};

pub async fn create_hackathon(
    service: &HackathonService,
    data: CreateHackathonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::Validation,
            "比赛名称不能为空",
        )));
    }
    if data.ends_at <= data.starts_at {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::Validation,
            "比赛结束时间必须晚于开始时间",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_hackathon(data).await {
        Ok(hackathon) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(hackathon, "比赛创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("比赛创建失败: {e}"),
            )),
        ),
    }
}
