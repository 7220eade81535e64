use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, submissions::requests::CreateSubmissionRequest};
use crate::utils::validate::validate_github_url;

pub async fn create_submission(
    service: &SubmissionService,
    data: CreateSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    if user.role != UserRole::Student {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "只有学生能创建项目提交",
        )));
    }

    if data.ideas.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::Validation,
            "提交必须至少包含一个候选点子",
        )));
    }
    for idea in &data.ideas {
        if idea.title.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::Validation,
                "点子标题不能为空",
            )));
        }
        if let Some(url) = &idea.github_url
            && validate_github_url(url).is_err()
        {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::Validation,
                format!("无效的 GitHub 仓库地址: {url}"),
            )));
        }
    }

    let storage = service.get_storage(request);

    // 提交者必须是目标团队的成员，且团队属于请求中的比赛
    match storage.get_team_by_id(data.team_id).await {
        Ok(Some(team)) => {
            if !team.has_member(user.id) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::PermissionDenied,
                    "只有团队成员能为团队创建提交",
                )));
            }
            if team.hackathon_id != data.hackathon_id {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::Validation,
                    "团队不属于该比赛",
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
                    format!("提交创建失败: {e}"),
                )),
            );
        }
    }

    // 同一团队在同一比赛中只能有一份提交
    match storage
        .get_submission_by_team_and_hackathon(data.team_id, data.hackathon_id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubmissionExists,
                "该团队在此比赛中已有提交",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("提交创建失败: {e}"),
                )),
            );
        }
    }

    match storage.create_submission(data).await {
        Ok(submission) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("提交创建失败: {e}"),
            )),
        ),
    }
}
