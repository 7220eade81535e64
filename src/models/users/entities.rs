use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
//
// 封闭枚举：所有权限判断都基于该类型做匹配，
// 评审流程的角色门禁集中在 review::transition 中。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "frontend/user.ts")]
pub enum UserRole {
    Student,     // 学生
    Guide,       // 指导教师
    ClassMentor, // 班级导师
    Rnd,         // 研发部门评审
    Hod,         // 系主任
    External,    // 校外评审
    Admin,       // 管理员
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const GUIDE: &'static str = "guide";
    pub const CLASS_MENTOR: &'static str = "class_mentor";
    pub const RND: &'static str = "rnd";
    pub const HOD: &'static str = "hod";
    pub const EXTERNAL: &'static str = "external";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }

    /// 校内教职人员（可参与内部评审阶段打分）
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Guide,
            &Self::ClassMentor,
            &Self::Rnd,
            &Self::Hod,
            &Self::Admin,
        ]
    }

    /// 所有可录入评分的角色（含校外评审）
    pub fn evaluator_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Guide,
            &Self::ClassMentor,
            &Self::Rnd,
            &Self::Hod,
            &Self::External,
            &Self::Admin,
        ]
    }

    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Student,
            &Self::Guide,
            &Self::ClassMentor,
            &Self::Rnd,
            &Self::Hod,
            &Self::External,
            &Self::Admin,
        ]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::GUIDE => Ok(UserRole::Guide),
            UserRole::CLASS_MENTOR => Ok(UserRole::ClassMentor),
            UserRole::RND => Ok(UserRole::Rnd),
            UserRole::HOD => Ok(UserRole::Hod),
            UserRole::EXTERNAL => Ok(UserRole::External),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, guide, class_mentor, rnd, hod, external, admin"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Guide => write!(f, "{}", UserRole::GUIDE),
            UserRole::ClassMentor => write!(f, "{}", UserRole::CLASS_MENTOR),
            UserRole::Rnd => write!(f, "{}", UserRole::RND),
            UserRole::Hod => write!(f, "{}", UserRole::HOD),
            UserRole::External => write!(f, "{}", UserRole::EXTERNAL),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "guide" => Ok(UserRole::Guide),
            "class_mentor" => Ok(UserRole::ClassMentor),
            "rnd" => Ok(UserRole::Rnd),
            "hod" => Ok(UserRole::Hod),
            "external" => Ok(UserRole::External),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "frontend/user.ts")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/user.ts")]
pub struct UserProfile {
    pub profile_name: String,
    pub avatar_url: Option<String>,
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub profile: UserProfile,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in UserRole::all_roles() {
            let parsed = UserRole::from_str(&role.to_string()).unwrap();
            assert_eq!(&&parsed, role);
        }
    }

    #[test]
    fn test_role_sets() {
        assert!(UserRole::staff_roles().contains(&&UserRole::Hod));
        assert!(!UserRole::staff_roles().contains(&&UserRole::External));
        assert!(UserRole::evaluator_roles().contains(&&UserRole::External));
        assert!(!UserRole::evaluator_roles().contains(&&UserRole::Student));
    }
}
