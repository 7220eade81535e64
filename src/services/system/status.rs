use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::common::system::SystemStatusResponse;
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

pub async fn get_status(
    _service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(start_time) = request.app_data::<web::Data<AppStartTime>>() else {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "系统状态获取失败",
            )),
        );
    };

    let now = chrono::Utc::now();
    let response = SystemStatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: now
            .signed_duration_since(start_time.start_datetime)
            .num_seconds(),
        server_time: now,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "系统状态获取成功")))
}
