use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeamService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, teams::requests::AssignGuideRequest};

pub async fn assign_guide(
    service: &TeamService,
    team_id: i64,
    data: AssignGuideRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 指派时目标用户必须存在且为指导教师
    if let Some(guide_id) = data.guide_id {
        match storage.get_user_by_id(guide_id).await {
            Ok(Some(user)) => {
                if user.role != UserRole::Guide {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::Validation,
                        "目标用户不是指导教师",
                    )));
                }
            }
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "目标用户不存在",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("指导教师指派失败: {e}"),
                    )),
                );
            }
        }
    }

    match storage.assign_guide(team_id, data.guide_id).await {
        Ok(Some(team)) => Ok(HttpResponse::Ok().json(ApiResponse::success(team, "指导教师指派成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeamNotFound,
            "团队不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("指导教师指派失败: {e}"),
            )),
        ),
    }
}
