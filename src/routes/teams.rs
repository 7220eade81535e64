use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teams::requests::{AssignGuideRequest, CreateTeamRequest, TeamListQuery};
use crate::models::users::entities::UserRole;
use crate::services::TeamService;
use crate::utils::SafeTeamIdI64;

// 懒加载的全局 TeamService 实例
static TEAM_SERVICE: Lazy<TeamService> = Lazy::new(TeamService::new_lazy);

// HTTP处理程序
pub async fn list_teams(
    req: HttpRequest,
    query: web::Query<TeamListQuery>,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.list_teams(query.into_inner(), &req).await
}

pub async fn create_team(
    req: HttpRequest,
    data: web::Json<CreateTeamRequest>,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.create_team(data.into_inner(), &req).await
}

pub async fn get_team(req: HttpRequest, team_id: SafeTeamIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.get_team(team_id.0, &req).await
}

pub async fn join_team(req: HttpRequest, team_id: SafeTeamIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.join_team(team_id.0, &req).await
}

pub async fn assign_guide(
    req: HttpRequest,
    team_id: SafeTeamIdI64,
    data: web::Json<AssignGuideRequest>,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE
        .assign_guide(team_id.0, data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_team_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teams")
            .wrap(middlewares::RequireJWT)
            .service(
                // 所有登录用户可浏览团队，学生创建自己的团队
                web::resource("").route(web::get().to(list_teams)).route(
                    web::post()
                        .to(create_team)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{team_id}/join").route(
                    web::post()
                        .to(join_team)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                // 指导教师由管理员指派
                web::resource("/{team_id}/guide").route(
                    web::put()
                        .to(assign_guide)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(web::resource("/{team_id}").route(web::get().to(get_team))),
    );
}
