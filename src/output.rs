use itertools::Itertools;
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::import::{ImportReport, RowIssue};
use crate::question::QuestionRecord;
use crate::store::StoredQuestion;

#[derive(Debug)]
pub enum Message {
    ImportRefused(String),
    ImportFailed(String),
    ImportCompleted(ImportReport),
    QuestionList(Vec<StoredQuestion>),
    QuestionDeleted(Uuid),
    TemplateWritten(PathBuf),
}

fn write_issue(f: &mut fmt::Formatter<'_>, issue: &RowIssue) -> fmt::Result {
    match &issue.question_id {
        Some(id) => writeln!(f, "  Row {} ({}): {}", issue.row, id, issue.reason),
        None => writeln!(f, "  Row {}: {}", issue.row, issue.reason),
    }
}

fn write_question(f: &mut fmt::Formatter<'_>, question: &StoredQuestion) -> fmt::Result {
    let record = &question.record;
    writeln!(
        f,
        "{} [{}] {}{}",
        question.id,
        record.difficulty,
        record
            .external_id
            .as_ref()
            .map(|id| format!("{}: ", id))
            .unwrap_or_default(),
        record.prompt
    )?;
    let options = record
        .options
        .iter()
        .zip(1..)
        .map(|(text, index)| format!("{}) {}", QuestionRecord::option_label(index), text))
        .join("  ");
    writeln!(f, "    {}", options)?;
    writeln!(
        f,
        "    Correct answer: Option {} - {}",
        record.correct_option,
        record.correct_answer().unwrap_or("?")
    )
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::ImportRefused(reason) => writeln!(f, "Upload refused: {}", reason),
            Message::ImportFailed(reason) => {
                writeln!(f, "Upload failed: failed to process the CSV file ({})", reason)
            }
            Message::ImportCompleted(report) => {
                writeln!(f, "Questions uploaded: {}", report.accepted_count)?;
                writeln!(f, "Errors: {}", report.rejected_rows.len())?;
                for issue in &report.rejected_rows {
                    write_issue(f, issue)?;
                }
                if !report.warnings.is_empty() {
                    writeln!(f, "Warnings: {}", report.warnings.len())?;
                    for issue in &report.warnings {
                        write_issue(f, issue)?;
                    }
                }
                Ok(())
            }
            Message::QuestionList(questions) => {
                if questions.is_empty() {
                    return writeln!(f, "No questions uploaded yet.");
                }
                writeln!(f, "{} questions", questions.len())?;
                for question in questions {
                    write_question(f, question)?;
                }
                Ok(())
            }
            Message::QuestionDeleted(id) => writeln!(f, "Question {} deleted", id),
            Message::TemplateWritten(path) => {
                writeln!(f, "Template written to {}", path.display())
            }
        }
    }
}
