//! Repository layer.
//!
//! Each repository wraps an explicitly injected [`DatabaseConnection`];
//! there is no ambient global handle.

#![allow(missing_docs)]

mod comment;
mod law_draft;
mod law_section;
mod survey;
mod user;
mod vote;

pub use comment::CommentRepository;
pub use law_draft::LawDraftRepository;
pub use law_section::LawSectionRepository;
pub use survey::{SurveyQuestionRepository, SurveyResponseRepository};
pub use user::UserRepository;
pub use vote::VoteRepository;

use lawhear_common::AppError;
use sea_orm::{DbErr, SqlErr};

/// Map a database error onto the application taxonomy.
///
/// Connection failures are transient (`StorageUnavailable`, retryable).
/// A unique-constraint violation escaping a repository means a write went
/// around the ON CONFLICT upsert and is surfaced as `ConstraintViolation`.
pub(crate) fn map_db_err(err: DbErr) -> AppError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
        return AppError::ConstraintViolation(msg);
    }
    match err {
        DbErr::Conn(e) => AppError::StorageUnavailable(e.to_string()),
        DbErr::ConnectionAcquire(e) => AppError::StorageUnavailable(e.to_string()),
        e => AppError::Database(e.to_string()),
    }
}
