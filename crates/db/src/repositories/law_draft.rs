//! Law draft repository.

use std::sync::Arc;

use crate::entities::{law_draft, LawDraft};
use crate::repositories::map_db_err;
use lawhear_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};

/// Law draft repository for database operations.
#[derive(Clone)]
pub struct LawDraftRepository {
    db: Arc<DatabaseConnection>,
}

impl LawDraftRepository {
    /// Create a new law draft repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a draft by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<law_draft::Model>> {
        LawDraft::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a draft by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<law_draft::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::DraftNotFound(id.to_string()))
    }

    /// Create a new draft.
    pub async fn create(&self, model: law_draft::ActiveModel) -> AppResult<law_draft::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a draft. Sections, votes, questions and responses cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        LawDraft::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_draft(id: &str) -> law_draft::Model {
        law_draft::Model {
            id: id.to_string(),
            title: "ร่างพระราชบัญญัติทดสอบ".to_string(),
            description: "คำอธิบาย".to_string(),
            category: "การศึกษา".to_string(),
            agency: "กระทรวงศึกษาธิการ".to_string(),
            status: law_draft::DraftStatus::Open,
            start_date: Utc::now().into(),
            end_date: Utc::now().into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let draft = create_test_draft("d1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[draft.clone()]])
                .into_connection(),
        );

        let repo = LawDraftRepository::new(db);
        let result = repo.get_by_id("d1").await.unwrap();

        assert_eq!(result.id, "d1");
        assert_eq!(result.status, law_draft::DraftStatus::Open);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_draft_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<law_draft::Model>::new()])
                .into_connection(),
        );

        let repo = LawDraftRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::DraftNotFound(_))));
    }
}
