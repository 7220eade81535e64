use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 活动状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "frontend/hackathon.ts")]
pub enum HackathonStatus {
    Upcoming, // 未开始
    Active,   // 进行中
    Closed,   // 已结束
}

impl<'de> Deserialize<'de> for HackathonStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "upcoming" => Ok(HackathonStatus::Upcoming),
            "active" => Ok(HackathonStatus::Active),
            "closed" => Ok(HackathonStatus::Closed),
            _ => Err(serde::de::Error::custom(format!(
                "无效的活动状态: '{s}'. 支持的状态: upcoming, active, closed"
            ))),
        }
    }
}

impl std::fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HackathonStatus::Upcoming => write!(f, "upcoming"),
            HackathonStatus::Active => write!(f, "active"),
            HackathonStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for HackathonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(HackathonStatus::Upcoming),
            "active" => Ok(HackathonStatus::Active),
            "closed" => Ok(HackathonStatus::Closed),
            _ => Err(format!("Invalid hackathon status: {s}")),
        }
    }
}

// 黑客松活动实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "frontend/hackathon.ts")]
pub struct Hackathon {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: HackathonStatus,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub ends_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
