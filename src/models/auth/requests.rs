use serde::Deserialize;
use ts_rs::TS;

// 登录请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/auth.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

// 注册请求（自助注册只允许 student 角色，其余角色由管理员创建）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "frontend/auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}
