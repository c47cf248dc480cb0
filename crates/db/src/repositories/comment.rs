//! Comment repository.

use std::sync::Arc;

use crate::entities::{comment, user, Comment};
use crate::repositories::map_db_err;
use lawhear_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a comment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<comment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {id} not found")))
    }

    /// Create a new comment.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Set a comment's moderation status.
    pub async fn set_status(
        &self,
        id: &str,
        status: comment::CommentStatus,
    ) -> AppResult<comment::Model> {
        let existing = self.get_by_id(id).await?;
        let mut active: comment::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        active.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Approved comments for one section with their authors, oldest first.
    pub async fn find_approved_for_section(
        &self,
        section_id: &str,
    ) -> AppResult<Vec<(comment::Model, Option<user::Model>)>> {
        Comment::find()
            .filter(comment::Column::LawSectionId.eq(section_id))
            .filter(comment::Column::Status.eq(comment::CommentStatus::Approved))
            .order_by_asc(comment::Column::CreatedAt)
            .find_also_related(crate::entities::User)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// All comments for a set of sections with their authors.
    ///
    /// Used by the per-section export; comments of every status are
    /// included so administrators see the full picture.
    pub async fn find_for_sections(
        &self,
        section_ids: &[String],
    ) -> AppResult<Vec<(comment::Model, Option<user::Model>)>> {
        if section_ids.is_empty() {
            return Ok(Vec::new());
        }
        Comment::find()
            .filter(comment::Column::LawSectionId.is_in(section_ids.iter().cloned()))
            .order_by_asc(comment::Column::CreatedAt)
            .find_also_related(crate::entities::User)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Moderation queue page: comments filtered by status and/or section
    /// set, newest first, with authors.
    pub async fn find_page(
        &self,
        status: Option<comment::CommentStatus>,
        section_ids: Option<&[String]>,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<(comment::Model, Option<user::Model>)>> {
        let mut query = Comment::find();
        if let Some(status) = status {
            query = query.filter(comment::Column::Status.eq(status));
        }
        if let Some(ids) = section_ids {
            query = query.filter(comment::Column::LawSectionId.is_in(ids.iter().cloned()));
        }
        query
            .order_by_desc(comment::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .find_also_related(crate::entities::User)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Total comments matching the moderation queue filters.
    pub async fn count(
        &self,
        status: Option<comment::CommentStatus>,
        section_ids: Option<&[String]>,
    ) -> AppResult<u64> {
        let mut query = Comment::find();
        if let Some(status) = status {
            query = query.filter(comment::Column::Status.eq(status));
        }
        if let Some(ids) = section_ids {
            query = query.filter(comment::Column::LawSectionId.is_in(ids.iter().cloned()));
        }
        query.count(self.db.as_ref()).await.map_err(map_db_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_comment(id: &str, section_id: &str, user_id: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            law_section_id: section_id.to_string(),
            user_id: user_id.to_string(),
            content: "ขอเสนอแก้ไขถ้อยคำ".to_string(),
            status: comment::CommentStatus::Pending,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let comment = create_test_comment("c1", "s1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[comment.clone()]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.get_by_id("c1").await.unwrap();

        assert_eq!(result.id, "c1");
        assert_eq!(result.status, comment::CommentStatus::Pending);
    }

    #[tokio::test]
    async fn test_count_with_status_filter() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(5))
                }]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let count = repo
            .count(Some(comment::CommentStatus::Pending), None)
            .await
            .unwrap();

        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn test_find_for_sections_empty_slice_skips_query() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_for_sections(&[]).await.unwrap();

        assert!(result.is_empty());
    }
}
