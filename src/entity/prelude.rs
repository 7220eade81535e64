//! 预导入模块，方便使用

pub use super::hackathons::{
    ActiveModel as HackathonActiveModel, Entity as Hackathons, Model as HackathonModel,
};
pub use super::project_ideas::{
    ActiveModel as ProjectIdeaActiveModel, Entity as ProjectIdeas, Model as ProjectIdeaModel,
};
pub use super::scores::{ActiveModel as ScoreActiveModel, Entity as Scores, Model as ScoreModel};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::team_members::{
    ActiveModel as TeamMemberActiveModel, Entity as TeamMembers, Model as TeamMemberModel,
};
pub use super::teams::{ActiveModel as TeamActiveModel, Entity as Teams, Model as TeamModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
