use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::review::transition;

pub async fn approve_idea(
    service: &SubmissionService,
    submission_id: i64,
    idea_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
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

    if !submission.ideas.iter().any(|idea| idea.id == idea_id) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::IdeaNotFound,
            "点子不存在或不属于该提交",
        )));
    }

    let mutation = match transition::approve_idea(&mut submission, idea_id, &actor) {
        Ok(mutation) => mutation,
        Err(e) => return Ok(super::review_error_response(e)),
    };

    if let Err(e) = storage.apply_review_mutation(submission_id, mutation).await {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("审批结果保存失败: {e}"),
            )),
        );
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "点子审批成功")))
}
