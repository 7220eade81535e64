use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode, submissions::requests::RecordScoreRequest};
use crate::review::{RubricRegistry, transition};

pub async fn record_score(
    service: &SubmissionService,
    submission_id: i64,
    data: RecordScoreRequest,
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

    // 对成员个人评分时校验该成员确实在队内
    if let Some(member_id) = data.member_id {
        match storage.get_team_by_id(submission.team_id).await {
            Ok(Some(team)) if team.has_member(member_id) => {}
            Ok(_) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::Validation,
                    "被评成员不在该团队中",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("评分失败: {e}"),
                    )),
                );
            }
        }
    }

    let mutation =
        match transition::record_score(&mut submission, &data, &actor, RubricRegistry::builtin()) {
            Ok(mutation) => mutation,
            Err(e) => return Ok(super::review_error_response(e)),
        };

    if let Err(e) = storage.apply_review_mutation(submission_id, mutation).await {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("评分保存失败: {e}"),
            )),
        );
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "评分记录成功")))
}
