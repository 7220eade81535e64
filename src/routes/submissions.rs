use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, RecordScoreRequest, RejectSubmissionRequest, SubmissionListQuery,
};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::{SafeIdeaIdI64, SafeSubmissionIdI64};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(query.into_inner(), &req)
        .await
}

pub async fn create_submission(
    req: HttpRequest,
    data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(data.into_inner(), &req)
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(submission_id.0, &req)
        .await
}

pub async fn approve_idea(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    idea_id: SafeIdeaIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .approve_idea(submission_id.0, idea_id.0, &req)
        .await
}

pub async fn reject_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    data: web::Json<RejectSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .reject_submission(submission_id.0, data.into_inner(), &req)
        .await
}

pub async fn record_score(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    data: web::Json<RecordScoreRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .record_score(submission_id.0, data.into_inner(), &req)
        .await
}

pub async fn advance_stage(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .advance_stage(submission_id.0, &req)
        .await
}

// 配置路由
//
// 审批/评分的细粒度权限（指导教师只能操作名下团队等）由
// 状态机判定，这里只做角色粗过滤。
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    .route(
                        web::post()
                            .to(create_submission)
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    ),
            )
            .service(
                web::resource("/{submission_id}/ideas/{idea_id}/approve").route(
                    web::post()
                        .to(approve_idea)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{submission_id}/reject").route(
                    web::post()
                        .to(reject_submission)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{submission_id}/scores").route(
                    web::post()
                        .to(record_score)
                        .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles())),
                ),
            )
            .service(
                web::resource("/{submission_id}/advance").route(
                    web::post()
                        .to(advance_stage)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(web::resource("/{submission_id}").route(web::get().to(get_submission))),
    );
}
