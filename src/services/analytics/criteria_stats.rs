use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnalyticsService;
use crate::models::submissions::requests::CriteriaStatsQuery;
use crate::models::submissions::responses::CriteriaStatsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::review::{RubricRegistry, compute_criteria_averages};

pub async fn criteria_stats(
    service: &AnalyticsService,
    hackathon_id: i64,
    query: CriteriaStatsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_hackathon_by_id(hackathon_id).await {
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
                    format!("评分统计失败: {e}"),
                )),
            );
        }
    }

    match storage.list_submissions_by_hackathon(hackathon_id).await {
        Ok(submissions) => {
            let items =
                compute_criteria_averages(&submissions, query.stage, RubricRegistry::builtin());
            let response = CriteriaStatsResponse {
                hackathon_id,
                stage: query.stage,
                submission_count: submissions.len() as i64,
                items,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "评分统计获取成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("评分统计失败: {e}"),
            )),
        ),
    }
}
