//! 项目提交服务
//!
//! 评审类操作（立项、驳回、评分、推进阶段）统一走
//! review::transition 状态机：服务层只负责加载提交、构造操作者、
//! 把状态机产生的变更交给存储层在单个事务中落库。

pub mod advance;
pub mod approve;
pub mod create;
pub mod get;
pub mod list;
pub mod reject;
pub mod score;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, RecordScoreRequest, RejectSubmissionRequest, SubmissionListQuery,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::review::{Actor, ReviewError};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建提交
    pub async fn create_submission(
        &self,
        data: CreateSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, data, request).await
    }

    // 提交详情（含各阶段得分汇总）
    pub async fn get_submission(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_submission(self, submission_id, request).await
    }

    // 提交列表
    pub async fn list_submissions(
        &self,
        query: SubmissionListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, query, request).await
    }

    // 采纳一个点子并推进审批关卡
    pub async fn approve_idea(
        &self,
        submission_id: i64,
        idea_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        approve::approve_idea(self, submission_id, idea_id, request).await
    }

    // 驳回提交
    pub async fn reject_submission(
        &self,
        submission_id: i64,
        data: RejectSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reject::reject_submission(self, submission_id, data, request).await
    }

    // 记录评分
    pub async fn record_score(
        &self,
        submission_id: i64,
        data: RecordScoreRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        score::record_score(self, submission_id, data, request).await
    }

    // 推进评审阶段
    pub async fn advance_stage(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        advance::advance_stage(self, submission_id, request).await
    }
}

/// 从请求上下文构造状态机操作者。
///
/// 指导教师的门禁与评分权限取决于其名下团队，此处一并加载。
pub(crate) async fn current_actor(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Actor, HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    if user.role == UserRole::Guide {
        match storage.list_guided_team_ids(user.id).await {
            Ok(team_ids) => Ok(Actor::with_guided_teams(user.id, user.role, team_ids)),
            Err(e) => Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("操作者信息加载失败: {e}"),
                )),
            ),
        }
    } else {
        Ok(Actor::new(user.id, user.role))
    }
}

/// 状态机错误到 HTTP 响应的统一映射
pub(crate) fn review_error_response(error: ReviewError) -> HttpResponse {
    match error {
        ReviewError::PermissionDenied(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::PermissionDenied, msg))
        }
        ReviewError::InvalidStageForAction(msg) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::InvalidStageForAction, msg),
        ),
        ReviewError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::Validation, msg))
        }
    }
}
