//! Comment moderation.
//!
//! Orthogonal to the vote/survey consistency core, but shares its
//! participant-plus-target shape: a comment targets one section and is
//! attributed to one authenticated user.

use lawhear_common::{AppError, AppResult, IdGenerator};
use lawhear_db::{
    entities::{
        comment::{self, CommentStatus},
        user,
    },
    repositories::{CommentRepository, LawSectionRepository},
};
use sea_orm::Set;

/// A comment joined with its author's display name.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub law_section_id: String,
    pub content: String,
    pub status: CommentStatus,
    pub author_name: String,
    pub created_at: String,
}

/// One page of the moderation queue.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<CommentView>,
    pub total: u64,
    pub total_pages: u64,
}

/// Moderation service for business logic.
#[derive(Clone)]
pub struct ModerationService {
    comment_repo: CommentRepository,
    section_repo: LawSectionRepository,
    id_gen: IdGenerator,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(comment_repo: CommentRepository, section_repo: LawSectionRepository) -> Self {
        Self {
            comment_repo,
            section_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a comment to a section. New comments await moderation.
    pub async fn add_comment(
        &self,
        section_id: &str,
        author: &user::Model,
        content: &str,
    ) -> AppResult<comment::Model> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        self.section_repo.get_by_id(section_id).await?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            law_section_id: Set(section_id.to_string()),
            user_id: Set(author.id.clone()),
            content: Set(content.to_string()),
            status: Set(CommentStatus::Pending),
            ..Default::default()
        };

        let created = self.comment_repo.create(model).await?;

        tracing::debug!(
            section_id = section_id,
            comment_id = %created.id,
            "Comment queued for moderation"
        );

        Ok(created)
    }

    /// One page of the moderation queue, newest first.
    ///
    /// `page` is 1-based. Filtering by draft narrows to comments on that
    /// draft's sections.
    pub async fn list(
        &self,
        status: Option<CommentStatus>,
        draft_id: Option<&str>,
        page: u64,
        limit: u64,
    ) -> AppResult<CommentPage> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let section_ids = match draft_id {
            Some(id) => Some(self.section_repo.ids_for_draft(id).await?),
            None => None,
        };
        let section_filter = section_ids.as_deref();

        let total = self.comment_repo.count(status, section_filter).await?;
        let rows = self
            .comment_repo
            .find_page(status, section_filter, (page - 1) * limit, limit)
            .await?;

        Ok(CommentPage {
            comments: rows.into_iter().map(Self::view).collect(),
            total,
            total_pages: total.div_ceil(limit),
        })
    }

    /// Set a comment's moderation status.
    pub async fn set_status(
        &self,
        comment_id: &str,
        status: CommentStatus,
    ) -> AppResult<comment::Model> {
        let updated = self.comment_repo.set_status(comment_id, status).await?;

        tracing::info!(
            comment_id = comment_id,
            status = ?updated.status,
            "Comment status updated"
        );

        Ok(updated)
    }

    /// Approved comments for the public section view, oldest first.
    pub async fn approved_for_section(&self, section_id: &str) -> AppResult<Vec<CommentView>> {
        self.section_repo.get_by_id(section_id).await?;

        let rows = self.comment_repo.find_approved_for_section(section_id).await?;
        Ok(rows.into_iter().map(Self::view).collect())
    }

    fn view((comment, author): (comment::Model, Option<user::Model>)) -> CommentView {
        let author_name = author
            .and_then(|u| u.name.or(u.email))
            .unwrap_or_else(|| comment.user_id.clone());
        CommentView {
            id: comment.id,
            law_section_id: comment.law_section_id,
            content: comment.content,
            status: comment.status,
            author_name,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lawhear_db::entities::law_section;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_section(id: &str) -> law_section::Model {
        law_section::Model {
            id: id.to_string(),
            law_draft_id: "d1".to_string(),
            section_no: "มาตรา 1".to_string(),
            content: "เนื้อหา".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_user(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: "somchai".to_string(),
            username_lower: "somchai".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            token: None,
            name: Some("สมชาย".to_string()),
            email: None,
            is_admin: false,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> ModerationService {
        ModerationService::new(
            CommentRepository::new(Arc::clone(&db)),
            LawSectionRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_add_comment_rejects_empty_content() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(db);
        let author = create_test_user("u1");
        let result = service.add_comment("s1", &author, "   ").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_comment_rejects_unknown_section() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<law_section::Model>::new()])
                .into_connection(),
        );

        let service = service(db);
        let author = create_test_user("u1");
        let result = service.add_comment("missing", &author, "ความเห็น").await;

        assert!(matches!(result, Err(AppError::SectionNotFound(_))));
    }

    #[tokio::test]
    async fn test_add_comment_defaults_to_pending() {
        let section = create_test_section("s1");
        let created = comment::Model {
            id: "c1".to_string(),
            law_section_id: "s1".to_string(),
            user_id: "u1".to_string(),
            content: "ความเห็น".to_string(),
            status: CommentStatus::Pending,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[section]])
                .append_query_results([[created]])
                .into_connection(),
        );

        let service = service(db);
        let author = create_test_user("u1");
        let result = service.add_comment("s1", &author, "ความเห็น").await.unwrap();

        assert_eq!(result.status, CommentStatus::Pending);
    }
}
