use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeamService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, teams::requests::CreateTeamRequest};

pub async fn create_team(
    service: &TeamService,
    data: CreateTeamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(creator_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    if data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::Validation,
            "团队名称不能为空",
        )));
    }

    let storage = service.get_storage(request);

    // 所属比赛必须存在
    match storage.get_hackathon_by_id(data.hackathon_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::HackathonNotFound,
                "比赛不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("团队创建失败: {e}"),
                )),
            );
        }
    }

    match storage.create_team(creator_id, data).await {
        Ok(team) => Ok(HttpResponse::Created().json(ApiResponse::success(team, "团队创建成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("团队创建失败: {e}"),
            )),
        ),
    }
}
