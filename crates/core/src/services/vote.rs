//! Vote service: casting, removal, and tallying.

use chrono::Utc;
use lawhear_common::{AppResult, IdGenerator};
use lawhear_db::{
    entities::vote::{self, VoteChoice},
    repositories::{LawDraftRepository, LawSectionRepository, VoteRepository},
};
use sea_orm::Set;

use crate::services::identity::ParticipantIdentity;

/// Agree/disagree counts for one section (or a whole draft).
///
/// Always computed from the stored rows on read; there is no cached
/// counter to drift out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SectionTally {
    pub agree: u64,
    pub disagree: u64,
}

impl SectionTally {
    /// Total number of votes.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.agree + self.disagree
    }

    /// Rounded agree percentage; 0 when there are no votes.
    #[must_use]
    pub fn agree_percent(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        ((self.agree as f64 / self.total() as f64) * 100.0).round() as u32
    }

    /// Disagree percentage, derived as the complement of the agree
    /// percentage so the two always sum to exactly 100 when votes exist.
    #[must_use]
    pub fn disagree_percent(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        100 - self.agree_percent()
    }
}

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
    section_repo: LawSectionRepository,
    draft_repo: LawDraftRepository,
    id_gen: IdGenerator,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(
        vote_repo: VoteRepository,
        section_repo: LawSectionRepository,
        draft_repo: LawDraftRepository,
    ) -> Self {
        Self {
            vote_repo,
            section_repo,
            draft_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Cast a vote on a section.
    ///
    /// Repeated casts for the same (session, section) key overwrite the
    /// choice in place; switching AGREE and DISAGREE is the same
    /// operation, not a separate "change vote".
    pub async fn cast(
        &self,
        section_id: &str,
        identity: &ParticipantIdentity,
        choice: VoteChoice,
    ) -> AppResult<vote::Model> {
        // Section must exist before any write
        self.section_repo.get_by_id(section_id).await?;

        let model = vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            law_section_id: Set(section_id.to_string()),
            session_token: Set(identity.session_token().to_string()),
            user_id: Set(identity.user_id().map(ToString::to_string)),
            choice: Set(choice),
            updated_at: Set(Some(Utc::now().into())),
            ..Default::default()
        };

        let vote = self.vote_repo.upsert(model).await?;

        tracing::debug!(
            section_id = section_id,
            choice = ?vote.choice,
            "Vote recorded"
        );

        Ok(vote)
    }

    /// Remove a participant's vote from a section.
    ///
    /// Removing a vote that was never cast is a no-op, not an error.
    /// Counts reflect the deletion immediately.
    pub async fn remove(
        &self,
        section_id: &str,
        identity: &ParticipantIdentity,
    ) -> AppResult<()> {
        self.vote_repo
            .delete_by_session_and_section(identity.session_token(), section_id)
            .await
    }

    /// The participant's current vote on a section, if any.
    pub async fn find_for_participant(
        &self,
        section_id: &str,
        identity: &ParticipantIdentity,
    ) -> AppResult<Option<vote::Model>> {
        self.vote_repo
            .find_by_session_and_section(identity.session_token(), section_id)
            .await
    }

    /// Tally one section's votes.
    pub async fn tally(&self, section_id: &str) -> AppResult<SectionTally> {
        self.section_repo.get_by_id(section_id).await?;

        let agree = self
            .vote_repo
            .count_by_section_and_choice(section_id, VoteChoice::Agree)
            .await?;
        let disagree = self
            .vote_repo
            .count_by_section_and_choice(section_id, VoteChoice::Disagree)
            .await?;

        Ok(SectionTally { agree, disagree })
    }

    /// Tally a whole draft: the sum of its section tallies.
    pub async fn draft_tally(&self, draft_id: &str) -> AppResult<SectionTally> {
        self.draft_repo.get_by_id(draft_id).await?;

        let section_ids = self.section_repo.ids_for_draft(draft_id).await?;
        let agree = self
            .vote_repo
            .count_by_sections_and_choice(&section_ids, VoteChoice::Agree)
            .await?;
        let disagree = self
            .vote_repo
            .count_by_sections_and_choice(&section_ids, VoteChoice::Disagree)
            .await?;

        Ok(SectionTally { agree, disagree })
    }
}
