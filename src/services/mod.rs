pub mod analytics;
pub mod auth;
pub mod hackathons;
pub mod submissions;
pub mod system;
pub mod teams;
pub mod users;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use hackathons::HackathonService;
pub use submissions::SubmissionService;
pub use system::SystemService;
pub use teams::TeamService;
pub use users::UserService;
