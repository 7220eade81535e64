use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode, submissions::requests::RejectSubmissionRequest};
use crate::review::transition;

pub async fn reject_submission(
    service: &SubmissionService,
    submission_id: i64,
    data: RejectSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if data.remarks.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::Validation,
            "驳回必须填写原因",
        )));
    }

    let storage = service.get_storage(request);

    let actor = match super::current_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(response) => return Ok(response),
    };

    let mut submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("提交加载失败: {e}"),
                )),
            );
        }
    };

    let mutation = match transition::reject(&mut submission, &actor, &data.remarks) {
        Ok(mutation) => mutation,
        Err(e) => return Ok(super::review_error_response(e)),
    };

    if let Err(e) = storage.apply_review_mutation(submission_id, mutation).await {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("驳回结果保存失败: {e}"),
            )),
        );
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交已驳回")))
}
