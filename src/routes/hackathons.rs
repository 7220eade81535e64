use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::hackathons::requests::{
    CreateHackathonRequest, HackathonListQuery, UpdateHackathonRequest,
};
use crate::models::submissions::requests::CriteriaStatsQuery;
use crate::models::users::entities::UserRole;
use crate::services::{AnalyticsService, HackathonService};
use crate::utils::SafeHackathonIdI64;

// 懒加载的全局服务实例
static HACKATHON_SERVICE: Lazy<HackathonService> = Lazy::new(HackathonService::new_lazy);
static ANALYTICS_SERVICE: Lazy<AnalyticsService> = Lazy::new(AnalyticsService::new_lazy);

// HTTP处理程序
pub async fn list_hackathons(
    req: HttpRequest,
    query: web::Query<HackathonListQuery>,
) -> ActixResult<HttpResponse> {
    HACKATHON_SERVICE
        .list_hackathons(query.into_inner(), &req)
        .await
}

pub async fn create_hackathon(
    req: HttpRequest,
    data: web::Json<CreateHackathonRequest>,
) -> ActixResult<HttpResponse> {
    HACKATHON_SERVICE
        .create_hackathon(data.into_inner(), &req)
        .await
}

pub async fn get_hackathon(
    req: HttpRequest,
    hackathon_id: SafeHackathonIdI64,
) -> ActixResult<HttpResponse> {
    HACKATHON_SERVICE.get_hackathon(hackathon_id.0, &req).await
}

pub async fn update_hackathon(
    req: HttpRequest,
    hackathon_id: SafeHackathonIdI64,
    data: web::Json<UpdateHackathonRequest>,
) -> ActixResult<HttpResponse> {
    HACKATHON_SERVICE
        .update_hackathon(hackathon_id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_hackathon(
    req: HttpRequest,
    hackathon_id: SafeHackathonIdI64,
) -> ActixResult<HttpResponse> {
    HACKATHON_SERVICE
        .delete_hackathon(hackathon_id.0, &req)
        .await
}

pub async fn criteria_stats(
    req: HttpRequest,
    hackathon_id: SafeHackathonIdI64,
    query: web::Query<CriteriaStatsQuery>,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE
        .criteria_stats(hackathon_id.0, query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_hackathon_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/hackathons")
            .wrap(middlewares::RequireJWT)
            .service(
                // 所有登录用户可浏览比赛，仅管理员可创建
                web::resource("")
                    .route(web::get().to(list_hackathons))
                    .route(
                        web::post()
                            .to(create_hackathon)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                // 全场评分项统计，教职人员与校外评审可见
                web::resource("/{hackathon_id}/analytics/criteria").route(
                    web::get()
                        .to(criteria_stats)
                        .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles())),
                ),
            )
            .service(
                web::resource("/{hackathon_id}")
                    .route(web::get().to(get_hackathon))
                    .route(
                        web::put()
                            .to(update_hackathon)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_hackathon)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
