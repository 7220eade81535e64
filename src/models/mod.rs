pub mod auth;
pub mod common;
pub mod hackathons;
pub mod submissions;
pub mod teams;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::PaginationInfo;
pub use common::response::ApiResponse;

/// 应用启动时间，用于系统状态接口的运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
