use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::responses::SubmissionDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::review::{RubricRegistry, stage_summaries};

pub async fn get_submission(
    service: &SubmissionService,
    submission_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => {
            let summaries = stage_summaries(&submission.scores, RubricRegistry::builtin());
            let response = SubmissionDetailResponse {
                submission,
                stage_summaries: summaries,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "提交详情获取成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("提交详情获取失败: {e}"),
            )),
        ),
    }
}
