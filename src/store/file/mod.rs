use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::TryFrom;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::question::{Difficulty, QuestionRecord, UserId, OPTION_COUNT};
use crate::store::{NewQuestion, QuestionFilter, QuestionStore, StoreError, StoredQuestion};


#[derive(Debug, Deserialize, Serialize)]
struct QuestionRow {
    id: Uuid,
    question_id: Option<String>,
    question: String,
    option_1: String,
    option_2: String,
    option_3: String,
    option_4: String,
    correct_option: u8,
    difficulty_level: Difficulty,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl From<StoredQuestion> for QuestionRow {
    fn from(stored: StoredQuestion) -> Self {
        let [option_1, option_2, option_3, option_4] = stored.record.options;
        QuestionRow {
            id: stored.id,
            question_id: stored.record.external_id,
            question: stored.record.prompt,
            option_1,
            option_2,
            option_3,
            option_4,
            correct_option: stored.record.correct_option,
            difficulty_level: stored.record.difficulty,
            created_by: stored.created_by,
            created_at: stored.created_at,
        }
    }
}

impl TryFrom<QuestionRow> for StoredQuestion {
    type Error = StoreError;

    fn try_from(row: QuestionRow) -> Result<Self, StoreError> {
        if row.correct_option < 1 || usize::from(row.correct_option) > OPTION_COUNT {
            return Err(StoreError::Corrupt {
                id: row.id,
                reason: format!("correct_option {} is not between 1 and 4", row.correct_option),
            });
        }
        Ok(StoredQuestion {
            id: row.id,
            created_at: row.created_at,
            created_by: row.created_by,
            record: QuestionRecord {
                external_id: row.question_id,
                prompt: row.question,
                options: [row.option_1, row.option_2, row.option_3, row.option_4],
                correct_option: row.correct_option,
                difficulty: row.difficulty_level,
            },
        })
    }
}

/// Question table kept in a single CSV file. Question ids are unique when present.
#[derive(Debug)]
pub struct CsvQuestionStore {
    path: PathBuf,
    // Question ids present in the file, kept in step with every write.
    question_ids: Mutex<HashSet<String>>,
}

impl CsvQuestionStore {
    pub fn open(path: &Path) -> Result<CsvQuestionStore, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut store = CsvQuestionStore {
            path: path.to_path_buf(),
            question_ids: Mutex::new(HashSet::new()),
        };
        let question_ids: HashSet<String> = store
            .read_rows()?
            .into_iter()
            .filter_map(|row| row.question_id)
            .collect();
        *store.question_ids.get_mut() = question_ids;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<QuestionRow>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rows = Vec::new();
        let mut csv_reader = csv::Reader::from_path(&self.path)?;
        for row in csv_reader.deserialize() {
            let row: QuestionRow = row?;
            rows.push(row);
        }
        Ok(rows)
    }

    fn append_row(&self, row: &QuestionRow) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        csv_writer.serialize(row)?;
        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the whole table next to the current file, then swaps it in.
    fn rewrite_rows(&self, rows: &[QuestionRow]) -> Result<(), StoreError> {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        let result = || -> Result<(), StoreError> {
            let mut csv_writer = csv::Writer::from_path(&staging)?;
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
            Ok(())
        }();
        if let Err(e) = result {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl QuestionStore for CsvQuestionStore {
    fn insert(&self, question: NewQuestion) -> Result<StoredQuestion, StoreError> {
        let mut question_ids = self.question_ids.lock();

        if let Some(external_id) = &question.record.external_id {
            if question_ids.contains(external_id) {
                return Err(StoreError::DuplicateQuestionId(external_id.clone()));
            }
        }

        let stored = StoredQuestion {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            created_by: question.created_by,
            record: question.record,
        };
        self.append_row(&stored.clone().into())?;
        if let Some(external_id) = &stored.record.external_id {
            question_ids.insert(external_id.clone());
        }
        debug!("Stored question {} in {:?}", stored.id, self.path);
        Ok(stored)
    }

    fn list(&self, filter: &QuestionFilter) -> Result<Vec<StoredQuestion>, StoreError> {
        let _guard = self.question_ids.lock();
        let mut questions = Vec::new();
        for row in self.read_rows()? {
            let question = StoredQuestion::try_from(row)?;
            if filter.matches(&question) {
                questions.push(question);
            }
        }
        questions.reverse();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions)
    }

    fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        let mut question_ids = self.question_ids.lock();
        let (removed, kept): (Vec<QuestionRow>, Vec<QuestionRow>) = self
            .read_rows()?
            .into_iter()
            .partition(|row| &row.id == id);
        if removed.is_empty() {
            return Err(StoreError::NotFound(*id));
        }
        self.rewrite_rows(&kept)?;
        for question_id in removed.into_iter().filter_map(|row| row.question_id) {
            question_ids.remove(&question_id);
        }
        Ok(())
    }
}
