use super::SeaOrmStorage;
use crate::entity::project_ideas::{
    ActiveModel as IdeaActiveModel, Column as IdeaColumn, Entity as ProjectIdeas,
};
use crate::entity::scores::{
    ActiveModel as ScoreActiveModel, Column as ScoreColumn, Entity as Scores,
};
use crate::entity::submissions::{
    ActiveModel, Column, Entity as Submissions, Model as SubmissionDbModel,
};
use crate::errors::{HackSystemError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{ProjectSubmission, ReviewMutation, SubmissionStatus},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建提交，候选点子随提交一并写入
    pub async fn create_submission_impl(
        &self,
        req: CreateSubmissionRequest,
    ) -> Result<ProjectSubmission> {
        use crate::models::submissions::entities::IdeaStatus;

        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let submission = ActiveModel {
            team_id: Set(req.team_id),
            hackathon_id: Set(req.hackathon_id),
            status: Set(SubmissionStatus::PendingGuide.to_string()),
            review_stage: Set(None),
            average_score: Set(0.0),
            reject_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| HackSystemError::database_operation(format!("创建提交失败: {e}")))?;

        for (index, idea) in req.ideas.into_iter().enumerate() {
            let keywords = serde_json::to_string(&idea.keywords)?;
            IdeaActiveModel {
                submission_id: Set(submission.id),
                ordinal: Set(index as i32 + 1),
                title: Set(idea.title),
                description: Set(idea.description),
                r#abstract: Set(idea.r#abstract),
                keywords: Set(Some(keywords)),
                github_url: Set(idea.github_url),
                status: Set(IdeaStatus::Pending.to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("写入点子失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("提交事务失败: {e}")))?;

        self.assemble_submission(&self.db, submission).await
    }

    /// 通过 ID 获取提交（含点子与评分）
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<ProjectSubmission>> {
        let Some(submission) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(Some(self.assemble_submission(&self.db, submission).await?))
    }

    /// 查询团队在某比赛中的提交
    pub async fn get_submission_by_team_and_hackathon_impl(
        &self,
        team_id: i64,
        hackathon_id: i64,
    ) -> Result<Option<ProjectSubmission>> {
        let Some(submission) = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::TeamId.eq(team_id))
                    .add(Column::HackathonId.eq(hackathon_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(Some(self.assemble_submission(&self.db, submission).await?))
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        if let Some(hackathon_id) = query.hackathon_id {
            select = select.filter(Column::HackathonId.eq(hackathon_id));
        }
        if let Some(team_id) = query.team_id {
            select = select.filter(Column::TeamId.eq(team_id));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 平均分高者在前，其次按创建时间
        select = select
            .order_by_desc(Column::AverageScore)
            .order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询提交页数失败: {e}")))?;
        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        let mut items = Vec::with_capacity(submissions.len());
        for submission in submissions {
            items.push(self.assemble_submission(&self.db, submission).await?);
        }

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出某比赛的全部提交
    pub async fn list_submissions_by_hackathon_impl(
        &self,
        hackathon_id: i64,
    ) -> Result<Vec<ProjectSubmission>> {
        let submissions = Submissions::find()
            .filter(Column::HackathonId.eq(hackathon_id))
            .order_by_desc(Column::AverageScore)
            .all(&self.db)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询提交失败: {e}")))?;

        let mut items = Vec::with_capacity(submissions.len());
        for submission in submissions {
            items.push(self.assemble_submission(&self.db, submission).await?);
        }
        Ok(items)
    }

    /// 在单个事务中落库一次评审变更
    ///
    /// scores 与 average_score 在同一事务中更新，外部观察不到不一致的中间态。
    pub async fn apply_review_mutation_impl(
        &self,
        submission_id: i64,
        mutation: ReviewMutation,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Err(HackSystemError::database_operation(format!(
                "提交 {submission_id} 不存在"
            )));
        };

        let mut model: ActiveModel = existing.into();

        match mutation {
            ReviewMutation::IdeaDecision {
                idea_statuses,
                status,
                review_stage,
            } => {
                for (idea_id, idea_status) in idea_statuses {
                    let Some(idea) = ProjectIdeas::find_by_id(idea_id)
                        .filter(IdeaColumn::SubmissionId.eq(submission_id))
                        .one(&txn)
                        .await
                        .map_err(|e| {
                            HackSystemError::database_operation(format!("查询点子失败: {e}"))
                        })?
                    else {
                        return Err(HackSystemError::database_operation(format!(
                            "点子 {idea_id} 不属于提交 {submission_id}"
                        )));
                    };
                    let mut idea: IdeaActiveModel = idea.into();
                    idea.status = Set(idea_status.to_string());
                    idea.update(&txn).await.map_err(|e| {
                        HackSystemError::database_operation(format!("更新点子失败: {e}"))
                    })?;
                }
                model.status = Set(status.to_string());
                model.review_stage = Set(review_stage.map(|s| s.to_string()));
            }
            ReviewMutation::Rejected { remarks } => {
                model.status = Set(SubmissionStatus::Rejected.to_string());
                model.review_stage = Set(None);
                model.reject_reason = Set(Some(remarks));
            }
            ReviewMutation::ScoreRecorded { entry } => {
                let existing_score = Scores::find()
                    .filter(
                        Condition::all()
                            .add(ScoreColumn::SubmissionId.eq(submission_id))
                            .add(ScoreColumn::EvaluatorId.eq(entry.evaluator_id))
                            .add(ScoreColumn::Criteria.eq(entry.criteria.as_str()))
                            .add(ScoreColumn::ReviewType.eq(entry.review_type.to_string()))
                            .add(match entry.member_id {
                                Some(member_id) => ScoreColumn::MemberId.eq(member_id),
                                None => ScoreColumn::MemberId.is_null(),
                            }),
                    )
                    .one(&txn)
                    .await
                    .map_err(|e| {
                        HackSystemError::database_operation(format!("查询评分失败: {e}"))
                    })?;

                match existing_score {
                    Some(score) => {
                        let mut score: ScoreActiveModel = score.into();
                        score.value = Set(entry.value);
                        score.comment = Set(entry.comment);
                        score.updated_at = Set(now);
                        score.update(&txn).await.map_err(|e| {
                            HackSystemError::database_operation(format!("更新评分失败: {e}"))
                        })?;
                    }
                    None => {
                        ScoreActiveModel {
                            submission_id: Set(submission_id),
                            evaluator_id: Set(entry.evaluator_id),
                            criteria: Set(entry.criteria),
                            value: Set(entry.value),
                            comment: Set(entry.comment),
                            review_type: Set(entry.review_type.to_string()),
                            member_id: Set(entry.member_id),
                            created_at: Set(now),
                            updated_at: Set(now),
                            ..Default::default()
                        }
                        .insert(&txn)
                        .await
                        .map_err(|e| {
                            HackSystemError::database_operation(format!("写入评分失败: {e}"))
                        })?;
                    }
                }

                // 并发评分时请求方的内存快照可能缺别人的分数，
                // 平均分以事务内落库后的全量评分为准重算
                let persisted = Scores::find()
                    .filter(ScoreColumn::SubmissionId.eq(submission_id))
                    .all(&txn)
                    .await
                    .map_err(|e| {
                        HackSystemError::database_operation(format!("查询评分失败: {e}"))
                    })?
                    .into_iter()
                    .map(|m| m.into_score_entry())
                    .collect::<Result<Vec<_>>>()?;
                model.average_score = Set(crate::review::aggregate::compute_average(
                    &persisted,
                    crate::review::RubricRegistry::builtin(),
                ));
            }
            ReviewMutation::StageAdvanced { stage } => {
                model.review_stage = Set(Some(stage.to_string()));
            }
        }

        model.updated_at = Set(now);
        model
            .update(&txn)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("更新提交失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| HackSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 拼装完整的业务提交：点子按序号、评分按创建时间
    async fn assemble_submission<C: ConnectionTrait>(
        &self,
        conn: &C,
        submission: SubmissionDbModel,
    ) -> Result<ProjectSubmission> {
        let ideas = ProjectIdeas::find()
            .filter(IdeaColumn::SubmissionId.eq(submission.id))
            .order_by_asc(IdeaColumn::Ordinal)
            .all(conn)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询点子失败: {e}")))?
            .into_iter()
            .map(|m| m.into_idea())
            .collect::<Result<Vec<_>>>()?;

        let scores = Scores::find()
            .filter(ScoreColumn::SubmissionId.eq(submission.id))
            .order_by_asc(ScoreColumn::CreatedAt)
            .all(conn)
            .await
            .map_err(|e| HackSystemError::database_operation(format!("查询评分失败: {e}")))?
            .into_iter()
            .map(|m| m.into_score_entry())
            .collect::<Result<Vec<_>>>()?;

        submission.into_submission(ideas, scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hackathons::requests::CreateHackathonRequest;
    use crate::models::submissions::entities::{ReviewStage, ScoreEntry};
    use crate::models::submissions::requests::CreateIdeaRequest;
    use crate::models::teams::requests::CreateTeamRequest;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    async fn test_storage() -> SeaOrmStorage {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Database::connect(options)
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage { db }
    }

    async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> i64 {
        storage
            .create_user_impl(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "hashed-elsewhere".to_string(),
                role,
                display_name: None,
                avatar_url: None,
            })
            .await
            .expect("seed user")
            .id
    }

    async fn seed_submission(storage: &SeaOrmStorage) -> i64 {
        let student = seed_user(storage, "student01", UserRole::Student).await;
        let hackathon = storage
            .create_hackathon_impl(CreateHackathonRequest {
                name: "HackDay".to_string(),
                description: None,
                starts_at: chrono::Utc::now(),
                ends_at: chrono::Utc::now() + chrono::Duration::days(2),
            })
            .await
            .expect("seed hackathon");
        let team = storage
            .create_team_impl(
                student,
                CreateTeamRequest {
                    hackathon_id: hackathon.id,
                    name: "rustaceans".to_string(),
                },
            )
            .await
            .expect("seed team");
        storage
            .create_submission_impl(CreateSubmissionRequest {
                team_id: team.id,
                hackathon_id: hackathon.id,
                ideas: vec![CreateIdeaRequest {
                    title: "智能排班".to_string(),
                    description: "用约束求解做排班".to_string(),
                    r#abstract: None,
                    keywords: vec![],
                    github_url: None,
                }],
            })
            .await
            .expect("seed submission")
            .id
    }

    fn team_score(evaluator_id: i64, criteria: &str, value: f64) -> ReviewMutation {
        ReviewMutation::ScoreRecorded {
            entry: ScoreEntry {
                evaluator_id,
                criteria: criteria.to_string(),
                value,
                comment: None,
                review_type: ReviewStage::Stage1,
                member_id: None,
            },
        }
    }

    #[tokio::test]
    async fn test_average_recomputed_from_persisted_scores() {
        let storage = test_storage().await;
        let submission_id = seed_submission(&storage).await;
        let rnd = seed_user(&storage, "rnd_head", UserRole::Rnd).await;
        let hod = seed_user(&storage, "hod_head", UserRole::Hod).await;

        // 两位评委各自打满一阶段的三个评分项，互相看不到对方的内存快照
        for criteria in ["problem_understanding", "innovation", "feasibility"] {
            storage
                .apply_review_mutation_impl(submission_id, team_score(rnd, criteria, 8.0))
                .await
                .unwrap();
            storage
                .apply_review_mutation_impl(submission_id, team_score(hod, criteria, 5.0))
                .await
                .unwrap();
        }

        let stored = storage
            .get_submission_by_id_impl(submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.scores.len(), 6);
        // (24 + 15) / (2 评委 × 满分 30) × 10
        assert_eq!(stored.average_score, 6.5);

        // 同键覆盖不追加，平均分跟随落库后的全量评分
        storage
            .apply_review_mutation_impl(submission_id, team_score(rnd, "innovation", 2.0))
            .await
            .unwrap();
        let stored = storage
            .get_submission_by_id_impl(submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.scores.len(), 6);
        assert_eq!(stored.average_score, 5.5);
    }

    #[tokio::test]
    async fn test_team_score_duplicate_key_blocked_by_index() {
        let storage = test_storage().await;
        let submission_id = seed_submission(&storage).await;
        let rnd = seed_user(&storage, "rnd_head", UserRole::Rnd).await;

        let now = chrono::Utc::now().timestamp();
        let row = |value: f64| ScoreActiveModel {
            submission_id: Set(submission_id),
            evaluator_id: Set(rnd),
            criteria: Set("innovation".to_string()),
            value: Set(value),
            comment: Set(None),
            review_type: Set(ReviewStage::Stage1.to_string()),
            member_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // member_id 为 NULL 的团队评分同键重复插入必须被唯一索引拦下
        row(8.0).insert(&storage.db).await.unwrap();
        assert!(row(5.0).insert(&storage.db).await.is_err());
    }

    #[tokio::test]
    async fn test_corrupted_review_type_surfaces_error() {
        let storage = test_storage().await;
        let submission_id = seed_submission(&storage).await;
        let rnd = seed_user(&storage, "rnd_head", UserRole::Rnd).await;

        let now = chrono::Utc::now().timestamp();
        ScoreActiveModel {
            submission_id: Set(submission_id),
            evaluator_id: Set(rnd),
            criteria: Set("innovation".to_string()),
            value: Set(8.0),
            comment: Set(None),
            review_type: Set("frozen".to_string()),
            member_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();

        let result = storage.get_submission_by_id_impl(submission_id).await;
        assert!(result.is_err());
    }
}
