//! Admin CSV exports.
//!
//! Two shapes: a per-section summary (counts plus collected comments) and
//! a per-respondent survey table. Both are rendered through
//! [`lawhear_common::csv`] so Thai free text survives spreadsheet tools.

use std::collections::HashMap;

use lawhear_common::{csv, AppResult};
use lawhear_db::{
    entities::vote::VoteChoice,
    repositories::{
        CommentRepository, LawDraftRepository, LawSectionRepository, VoteRepository,
    },
};

use crate::services::survey::{RespondentRecord, SurveyService};

/// A rendered CSV document ready for download.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Export service for admin downloads.
#[derive(Clone)]
pub struct ExportService {
    draft_repo: LawDraftRepository,
    section_repo: LawSectionRepository,
    vote_repo: VoteRepository,
    comment_repo: CommentRepository,
    survey_service: SurveyService,
}

impl ExportService {
    /// Create a new export service.
    #[must_use]
    pub const fn new(
        draft_repo: LawDraftRepository,
        section_repo: LawSectionRepository,
        vote_repo: VoteRepository,
        comment_repo: CommentRepository,
        survey_service: SurveyService,
    ) -> Self {
        Self {
            draft_repo,
            section_repo,
            vote_repo,
            comment_repo,
            survey_service,
        }
    }

    /// Per-section summary: one row per section with vote counts and a
    /// newline-joined "commenter: comment" cell.
    pub async fn sections_csv(&self, draft_id: &str) -> AppResult<CsvExport> {
        self.draft_repo.get_by_id(draft_id).await?;

        let sections = self.section_repo.find_by_draft(draft_id).await?;
        let section_ids: Vec<String> = sections.iter().map(|s| s.id.clone()).collect();

        // Comments grouped by section, rendered as "commenter: comment"
        let mut comments_by_section: HashMap<String, Vec<String>> = HashMap::new();
        for (comment, author) in self.comment_repo.find_for_sections(&section_ids).await? {
            let commenter = author
                .and_then(|u| u.name.or(u.email))
                .unwrap_or_else(|| comment.user_id.clone());
            comments_by_section
                .entry(comment.law_section_id)
                .or_default()
                .push(format!("{commenter}: {}", comment.content));
        }

        let headers: Vec<String> = [
            "Section No",
            "Content",
            "Agree Votes",
            "Disagree Votes",
            "Comments",
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        let mut rows = Vec::with_capacity(sections.len());
        for section in sections {
            let agree = self
                .vote_repo
                .count_by_section_and_choice(&section.id, VoteChoice::Agree)
                .await?;
            let disagree = self
                .vote_repo
                .count_by_section_and_choice(&section.id, VoteChoice::Disagree)
                .await?;
            let comments = comments_by_section
                .remove(&section.id)
                .map(|list| list.join("\n"))
                .unwrap_or_default();

            rows.push(vec![
                section.section_no,
                section.content,
                agree.to_string(),
                disagree.to_string(),
                comments,
            ]);
        }

        Ok(CsvExport {
            filename: format!("draft-{draft_id}-export.csv"),
            content: csv::to_csv(&headers, &rows),
        })
    }

    /// Per-respondent survey table: two columns per question (answer and
    /// comment), ordered by the survey's display order. Unanswered
    /// questions render as empty cells so every row stays rectangular.
    pub async fn survey_csv(&self, draft_id: &str) -> AppResult<CsvExport> {
        let questions = self
            .survey_service
            .questions_for_draft(draft_id)
            .await?;
        let respondents = self
            .survey_service
            .responses_by_respondent(draft_id)
            .await?;

        let mut headers = vec!["Date".to_string(), "Respondent".to_string()];
        for question in &questions {
            headers.push(question.question.clone());
            headers.push("Comment".to_string());
        }

        let rows: Vec<Vec<String>> = respondents
            .iter()
            .map(|record| Self::respondent_row(record, &questions))
            .collect();

        Ok(CsvExport {
            filename: format!("survey-responses-{draft_id}.csv"),
            content: csv::to_csv(&headers, &rows),
        })
    }

    fn respondent_row(
        record: &RespondentRecord,
        questions: &[lawhear_db::entities::survey_question::Model],
    ) -> Vec<String> {
        let answers: HashMap<&str, (&VoteChoice, Option<&str>)> = record
            .answers
            .iter()
            .map(|a| (a.question_id.as_str(), (&a.answer, a.comment.as_deref())))
            .collect();

        let mut row = vec![record.latest_at.to_rfc3339(), record.display_name.clone()];
        for question in questions {
            match answers.get(question.id.as_str()) {
                Some((answer, comment)) => {
                    row.push(answer.as_str().to_string());
                    row.push(comment.unwrap_or_default().to_string());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }
        row
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::survey::RespondentAnswer;
    use chrono::{TimeZone, Utc};
    use lawhear_db::entities::survey_question;

    fn question(id: &str, order: i32, text: &str) -> survey_question::Model {
        survey_question::Model {
            id: id.to_string(),
            law_draft_id: "d1".to_string(),
            question: text.to_string(),
            order,
            created_at: Utc::now().into(),
        }
    }

    fn record_with_answers(answers: Vec<RespondentAnswer>) -> RespondentRecord {
        RespondentRecord {
            session_token: "abc1234567".to_string(),
            user_id: None,
            display_name: "abc1234567".to_string(),
            latest_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap().into(),
            answers,
        }
    }

    #[test]
    fn test_respondent_row_is_rectangular_with_gaps() {
        let questions = vec![
            question("q1", 1, "ข้อ 1"),
            question("q2", 2, "ข้อ 2"),
            question("q3", 3, "ข้อ 3"),
        ];
        // Only the middle question was answered
        let record = record_with_answers(vec![RespondentAnswer {
            question_id: "q2".to_string(),
            question_text: "ข้อ 2".to_string(),
            order: 2,
            answer: VoteChoice::Agree,
            comment: Some("มีข้อสังเกต".to_string()),
        }]);

        let row = ExportService::respondent_row(&record, &questions);

        // Date + Respondent + 3 questions x 2 columns
        assert_eq!(row.len(), 8);
        assert_eq!(&row[2..4], &[String::new(), String::new()]);
        assert_eq!(row[4], "AGREE");
        assert_eq!(row[5], "มีข้อสังเกต");
        assert_eq!(&row[6..8], &[String::new(), String::new()]);
    }

    #[test]
    fn test_respondent_row_columns_follow_question_order() {
        let questions = vec![question("q1", 1, "ข้อ 1"), question("q2", 2, "ข้อ 2")];
        let record = record_with_answers(vec![
            RespondentAnswer {
                question_id: "q2".to_string(),
                question_text: "ข้อ 2".to_string(),
                order: 2,
                answer: VoteChoice::Disagree,
                comment: None,
            },
            RespondentAnswer {
                question_id: "q1".to_string(),
                question_text: "ข้อ 1".to_string(),
                order: 1,
                answer: VoteChoice::Agree,
                comment: None,
            },
        ]);

        let row = ExportService::respondent_row(&record, &questions);

        assert_eq!(row[2], "AGREE");
        assert_eq!(row[4], "DISAGREE");
    }
}
