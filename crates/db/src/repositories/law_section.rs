//! Law section repository.

use std::sync::Arc;

use crate::entities::{law_section, LawSection};
use crate::repositories::map_db_err;
use lawhear_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Law section repository for database operations.
#[derive(Clone)]
pub struct LawSectionRepository {
    db: Arc<DatabaseConnection>,
}

impl LawSectionRepository {
    /// Create a new law section repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a section by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<law_section::Model>> {
        LawSection::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a section by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<law_section::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::SectionNotFound(id.to_string()))
    }

    /// List a draft's sections ordered by section number.
    pub async fn find_by_draft(&self, draft_id: &str) -> AppResult<Vec<law_section::Model>> {
        LawSection::find()
            .filter(law_section::Column::LawDraftId.eq(draft_id))
            .order_by_asc(law_section::Column::SectionNo)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// IDs of a draft's sections.
    pub async fn ids_for_draft(&self, draft_id: &str) -> AppResult<Vec<String>> {
        let ids: Vec<String> = LawSection::find()
            .select_only()
            .column(law_section::Column::Id)
            .filter(law_section::Column::LawDraftId.eq(draft_id))
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(ids)
    }

    /// Create a new section.
    pub async fn create(&self, model: law_section::ActiveModel) -> AppResult<law_section::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_section(id: &str, draft_id: &str, no: &str) -> law_section::Model {
        law_section::Model {
            id: id.to_string(),
            law_draft_id: draft_id.to_string(),
            section_no: no.to_string(),
            content: "เนื้อหามาตรา".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_draft_ordered() {
        let s1 = create_test_section("s1", "d1", "มาตรา 1");
        let s2 = create_test_section("s2", "d1", "มาตรา 2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[s1, s2]])
                .into_connection(),
        );

        let repo = LawSectionRepository::new(db);
        let result = repo.find_by_draft("d1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].section_no, "มาตรา 1");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_section_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<law_section::Model>::new()])
                .into_connection(),
        );

        let repo = LawSectionRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::SectionNotFound(_))));
    }
}
