use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::store::{NewQuestion, QuestionFilter, QuestionStore, StoreError, StoredQuestion};

#[derive(Clone, Default)]
pub struct MockQuestionStore {
    questions: Arc<RwLock<Vec<StoredQuestion>>>,
    attempts: Arc<RwLock<Vec<NewQuestion>>>,
    failing_attempts: Arc<RwLock<HashSet<usize>>>,
}

impl MockQuestionStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes the n-th insert call (1-based) fail.
    pub fn fail_attempt(&self, attempt: usize) {
        self.failing_attempts.write().insert(attempt);
    }

    pub fn attempts(&self) -> Vec<NewQuestion> {
        self.attempts.read().clone()
    }

    pub fn stored(&self) -> Vec<StoredQuestion> {
        self.questions.read().clone()
    }
}

impl QuestionStore for MockQuestionStore {
    fn insert(&self, question: NewQuestion) -> Result<StoredQuestion, StoreError> {
        let attempt = {
            let mut attempts = self.attempts.write();
            attempts.push(question.clone());
            attempts.len()
        };
        if self.failing_attempts.read().contains(&attempt) {
            return Err(StoreError::Rejected(format!(
                "insert #{} violates a table constraint",
                attempt
            )));
        }
        let stored = StoredQuestion {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            created_by: question.created_by,
            record: question.record,
        };
        self.questions.write().push(stored.clone());
        Ok(stored)
    }

    fn list(&self, filter: &QuestionFilter) -> Result<Vec<StoredQuestion>, StoreError> {
        Ok(self
            .questions
            .read()
            .iter()
            .rev()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        let mut questions = self.questions.write();
        let count = questions.len();
        questions.retain(|q| &q.id != id);
        if questions.len() == count {
            return Err(StoreError::NotFound(*id));
        }
        Ok(())
    }
}
