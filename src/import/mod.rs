use log::{debug, info, warn};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::identity::IdentityProvider;
use crate::store::{NewQuestion, QuestionStore};

mod parse;
mod template;

pub use self::parse::{parse_questions, tokenize_line, ParsedFile, RowIssue, MIN_FIELDS};
pub use self::template::{write_template, TEMPLATE, TEMPLATE_FILE_NAME};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("you must be signed in to upload questions")]
    NotAuthenticated,
    #[error("an upload is already in progress")]
    Busy,
    #[error("{0:?} is not a CSV file")]
    UnsupportedFile(PathBuf),
    #[error("failed to read {path:?} as text: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ImportReport {
    pub accepted_count: usize,
    pub rejected_rows: Vec<RowIssue>,
    pub warnings: Vec<RowIssue>,
}

impl ImportReport {
    pub fn attempted(&self) -> usize {
        self.accepted_count + self.rejected_rows.len()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected_rows.is_empty()
    }
}

pub struct Importer<S, I> {
    store: S,
    identity: I,
    in_progress: Mutex<()>,
}

impl<S: QuestionStore, I: IdentityProvider> Importer<S, I> {
    pub fn new(store: S, identity: I) -> Self {
        Importer {
            store,
            identity,
            in_progress: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_busy(&self) -> bool {
        self.in_progress.is_locked()
    }

    pub fn import_file(&self, path: &Path) -> Result<ImportReport, ImportError> {
        let is_csv = path
            .extension()
            .map_or(false, |extension| extension.eq_ignore_ascii_case("csv"));
        self.run(|| {
            if !is_csv {
                return Err(ImportError::UnsupportedFile(path.to_path_buf()));
            }
            fs::read_to_string(path).map_err(|source| ImportError::Unreadable {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    pub fn import_text(&self, text: &str) -> Result<ImportReport, ImportError> {
        self.run(|| Ok(text.to_owned()))
    }

    fn run<F>(&self, load: F) -> Result<ImportReport, ImportError>
    where
        F: FnOnce() -> Result<String, ImportError>,
    {
        let user = self
            .identity
            .current_user()
            .ok_or(ImportError::NotAuthenticated)?;
        let _guard = self.in_progress.try_lock().ok_or(ImportError::Busy)?;

        let text = load()?;
        let parsed = parse_questions(&text);
        info!(
            "Uploading {} questions for {} ({} rows rejected while parsing)",
            parsed.candidates.len(),
            user,
            parsed.rejections.len()
        );

        let mut report = ImportReport {
            accepted_count: 0,
            rejected_rows: parsed.rejections,
            warnings: parsed.warnings,
        };

        for (row, record) in parsed.candidates {
            let question_id = record.external_id.clone();
            let question = NewQuestion {
                record,
                created_by: user.clone(),
            };
            match self.store.insert(question) {
                Ok(stored) => {
                    debug!("Row {} stored as {}", row, stored.id);
                    report.accepted_count += 1;
                }
                Err(e) => {
                    warn!("Row {} was refused by the store: {}", row, e);
                    report.rejected_rows.push(RowIssue {
                        row,
                        question_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.rejected_rows.sort_by_key(|issue| issue.row);
        info!(
            "Upload finished: {} stored, {} rejected",
            report.accepted_count,
            report.rejected_rows.len()
        );
        Ok(report)
    }
}
