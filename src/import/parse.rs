use log::warn;

use crate::question::{parse_correct_option, Difficulty, QuestionRecord};

pub const MIN_FIELDS: usize = 8;

/// A problem attached to one data row. Rows are numbered from 1, header excluded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowIssue {
    pub row: usize,
    pub question_id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ParsedFile {
    pub candidates: Vec<(usize, QuestionRecord)>,
    pub rejections: Vec<RowIssue>,
    pub warnings: Vec<RowIssue>,
}

/// Splits one line on commas that are outside double quotes.
/// Quotes only toggle the quoted state and are dropped; `""` is not an escape.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_owned());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_owned());
    fields
}

fn non_empty(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_owned())
    }
}

pub fn parse_questions(text: &str) -> ParsedFile {
    let mut parsed = ParsedFile::default();

    // The first non-blank line is the header and is not validated.
    let rows = text.split('\n').filter(|line| !line.trim().is_empty()).skip(1);

    for (index, line) in rows.enumerate() {
        let row = index + 1;
        let fields = tokenize_line(line);
        let question_id = fields.get(0).and_then(|id| non_empty(id));

        if fields.len() < MIN_FIELDS {
            warn!("Skipping row {}: only {} fields", row, fields.len());
            parsed.rejections.push(RowIssue {
                row,
                question_id,
                reason: format!(
                    "expected at least {} fields, found {}",
                    MIN_FIELDS,
                    fields.len()
                ),
            });
            continue;
        }

        let correct_option = match parse_correct_option(&fields[6]) {
            Ok(index) => index,
            Err(e) => {
                warn!("Skipping row {}: {}", row, e);
                parsed.rejections.push(RowIssue {
                    row,
                    question_id,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let (difficulty, defaulted) = Difficulty::normalize(&fields[7]);
        if defaulted {
            warn!(
                "Row {}: unknown difficulty {:?}, using {}",
                row, fields[7], difficulty
            );
            parsed.warnings.push(RowIssue {
                row,
                question_id: question_id.clone(),
                reason: format!(
                    "unknown difficulty {:?}, defaulted to {}",
                    fields[7], difficulty
                ),
            });
        }

        let record = QuestionRecord {
            external_id: question_id,
            prompt: fields[1].clone(),
            options: [
                fields[2].clone(),
                fields[3].clone(),
                fields[4].clone(),
                fields[5].clone(),
            ],
            correct_option,
            difficulty,
        };
        parsed.candidates.push((row, record));
    }

    parsed
}
