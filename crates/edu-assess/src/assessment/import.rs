//! Offline answer-sheet ingestion for the CLI grading path.
//!
//! Sheets are CSV exports with a header row and `question_id,selected_option`
//! columns. Rows are graded against the catalog as they are read; a row that
//! does not resolve fails the whole import.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::Catalog;

use super::domain::AssessmentAnswer;

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: String,
    selected_option: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerSheetImportError {
    #[error("failed to open answer sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse answer sheet: {0}")]
    Csv(#[from] csv::Error),
    #[error("answer sheet references unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("selected option {selected_option} is out of range for question '{question_id}'")]
    OptionOutOfRange {
        question_id: String,
        selected_option: usize,
    },
    #[error("answer sheet contains no rows")]
    EmptySheet,
}

pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path(
        path: impl AsRef<Path>,
        catalog: &Catalog,
    ) -> Result<Vec<AssessmentAnswer>, AnswerSheetImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &Catalog,
    ) -> Result<Vec<AssessmentAnswer>, AnswerSheetImportError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut answers = Vec::new();

        for row in csv_reader.deserialize::<AnswerRow>() {
            let row = row?;
            let question = catalog
                .question(&row.question_id)
                .map_err(|_| AnswerSheetImportError::UnknownQuestion(row.question_id.clone()))?;
            if row.selected_option >= question.options.len() {
                return Err(AnswerSheetImportError::OptionOutOfRange {
                    question_id: row.question_id,
                    selected_option: row.selected_option,
                });
            }

            answers.push(AssessmentAnswer {
                correct: row.selected_option == question.correct_option,
                question_id: row.question_id,
                selected_option: row.selected_option,
            });
        }

        if answers.is_empty() {
            return Err(AnswerSheetImportError::EmptySheet);
        }
        Ok(answers)
    }
}
