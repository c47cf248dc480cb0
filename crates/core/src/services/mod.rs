//! Business logic services.

#![allow(missing_docs)]

pub mod export;
pub mod identity;
pub mod moderation;
pub mod survey;
pub mod user;
pub mod vote;

pub use export::{CsvExport, ExportService};
pub use identity::ParticipantIdentity;
pub use moderation::{CommentPage, CommentView, ModerationService};
pub use survey::{RespondentAnswer, RespondentRecord, SurveyService, SurveySubmissionItem};
pub use user::{CreateUserInput, UserService};
pub use vote::{SectionTally, VoteService};
