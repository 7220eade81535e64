use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeamService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn join_team(
    service: &TeamService,
    team_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    let storage = service.get_storage(request);

    match storage.get_team_by_id(team_id).await {
        Ok(Some(team)) => {
            if team.has_member(user_id) {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::TeamMemberExists,
                    "已是该团队成员",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeamNotFound,
                "团队不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("加入团队失败: {e}"),
                )),
            );
        }
    }

    match storage.join_team(team_id, user_id).await {
        Ok(team) => Ok(HttpResponse::Ok().json(ApiResponse::success(team, "加入团队成功"))),
        Err(e) => {
            // 并发加入时由唯一索引兜底
            if e.to_string().contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::TeamMemberExists,
                    "已是该团队成员",
                )))
            } else {
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("加入团队失败: {e}"),
                    )),
                )
            }
        }
    }
}
