use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::question::{Difficulty, QuestionRecord, UserId};

pub mod file;
#[cfg(test)]
pub mod mock;

pub use self::file::CsvQuestionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a question with id {0:?} already exists")]
    DuplicateQuestionId(String),
    #[error("no question with id {0}")]
    NotFound(Uuid),
    #[error("question store is unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("question store is corrupted: {0}")]
    Csv(#[from] csv::Error),
    #[error("question {id} in the store is corrupted: {reason}")]
    Corrupt { id: Uuid, reason: String },
    #[error("{0}")]
    Rejected(String),
}

#[derive(Clone, Debug)]
pub struct NewQuestion {
    pub record: QuestionRecord,
    pub created_by: UserId,
}

#[derive(Clone, Debug)]
pub struct StoredQuestion {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
    pub record: QuestionRecord,
}

#[derive(Clone, Debug, Default)]
pub struct QuestionFilter {
    pub difficulty: Option<Difficulty>,
    pub created_by: Option<UserId>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &StoredQuestion) -> bool {
        let difficulty_ok = self
            .difficulty
            .map_or(true, |d| question.record.difficulty == d);
        let author_ok = self
            .created_by
            .as_ref()
            .map_or(true, |user| &question.created_by == user);
        difficulty_ok && author_ok
    }
}

/// The question table of the backing data store.
pub trait QuestionStore {
    fn insert(&self, question: NewQuestion) -> Result<StoredQuestion, StoreError>;

    /// Newest first.
    fn list(&self, filter: &QuestionFilter) -> Result<Vec<StoredQuestion>, StoreError>;

    fn delete(&self, id: &Uuid) -> Result<(), StoreError>;
}

impl<T: QuestionStore + ?Sized> QuestionStore for &T {
    fn insert(&self, question: NewQuestion) -> Result<StoredQuestion, StoreError> {
        (**self).insert(question)
    }

    fn list(&self, filter: &QuestionFilter) -> Result<Vec<StoredQuestion>, StoreError> {
        (**self).list(filter)
    }

    fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}
