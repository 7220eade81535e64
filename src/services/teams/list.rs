use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeamService;
use crate::models::{ApiResponse, ErrorCode, teams::requests::TeamListQuery};

pub async fn list_teams(
    service: &TeamService,
    query: TeamListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teams_with_pagination(query).await {
        Ok(response) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "团队列表获取成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("团队列表获取失败: {e}"),
            )),
        ),
    }
}
