pub mod auth;

pub mod users;

pub mod hackathons;

pub mod teams;

pub mod submissions;

pub mod system;

use actix_web::HttpResponse;

use crate::models::{ApiResponse, ErrorCode};

/// 未匹配任何路由时的兜底响应
pub async fn fallback_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, "接口不存在"))
}

pub use auth::configure_auth_routes;
pub use hackathons::configure_hackathon_routes;
pub use submissions::configure_submission_routes;
pub use system::configure_system_routes;
pub use teams::configure_team_routes;
pub use users::configure_user_routes;
