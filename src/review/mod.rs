//! 评审核心模块
//!
//! 项目提交的整个评审生命周期都经由这里：
//! - `rubric`: 各评审阶段的静态评分表注册中心
//! - `transition`: 审批/评分状态机（角色门禁 + 状态推进）
//! - `aggregate`: 评分聚合（团队平均分、按阶段/评分项汇总）
//!
//! 全部为纯逻辑，不做任何 I/O；服务层负责加载提交、调用状态机、
//! 将产生的 ReviewMutation 交给存储层在单个事务中落库。

pub mod aggregate;
pub mod rubric;
pub mod transition;

pub use aggregate::{compute_criteria_averages, stage_summaries};
pub use rubric::{Granularity, RubricRegistry};
pub use transition::{Actor, ReviewError};
