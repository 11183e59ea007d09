use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

pub const OPTION_COUNT: usize = 4;

#[derive(Embed)]
#[folder = "assets/quiz/"]
struct QuizAssets;

const BUNDLED_BANK: &str = "questions.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(alias = "correct")]
    pub correct_index: usize,
}

impl Question {
    pub fn new(text: &str, options: [&str; OPTION_COUNT], correct_index: usize) -> Self {
        Self {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
        }
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }

    fn validate(&self, index: usize) -> Result<(), QuizError> {
        if self.text.trim().is_empty() {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: "empty question text".to_string(),
            });
        }
        if self.options.len() != OPTION_COUNT {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: format!(
                    "expected {OPTION_COUNT} options, found {}",
                    self.options.len()
                ),
            });
        }
        if self.correct_index >= OPTION_COUNT {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: format!("correct index {} out of range", self.correct_index),
            });
        }
        Ok(())
    }
}

/// Parse and validate a JSON array of questions read from `source`.
pub fn parse_questions(json: &str, source: &Path) -> Result<Vec<Question>, QuizError> {
    let questions: Vec<Question> = serde_json::from_str(json).map_err(|e| QuizError::Load {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_all(&questions)?;
    Ok(questions)
}

pub fn validate_all(questions: &[Question]) -> Result<(), QuizError> {
    if questions.is_empty() {
        return Err(QuizError::EmptyQuestionSet);
    }
    for (i, q) in questions.iter().enumerate() {
        q.validate(i + 1)?;
    }
    Ok(())
}

pub fn load_bundled() -> Result<Vec<Question>, QuizError> {
    let file = QuizAssets::get(BUNDLED_BANK).ok_or_else(|| QuizError::Load {
        path: BUNDLED_BANK.into(),
        reason: "bundled question bank missing".to_string(),
    })?;
    let content = std::str::from_utf8(file.data.as_ref()).map_err(|e| QuizError::Load {
        path: BUNDLED_BANK.into(),
        reason: e.to_string(),
    })?;
    parse_questions(content, Path::new(BUNDLED_BANK))
}

pub fn load_from_file(path: &Path) -> Result<Vec<Question>, QuizError> {
    let content = fs::read_to_string(path).map_err(|e| QuizError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_questions(&content, path)
}

pub fn shuffle<R: Rng>(questions: &mut [Question], rng: &mut R) {
    questions.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn bundled_bank_loads_and_validates() {
        let questions = load_bundled().unwrap();
        assert_eq!(questions.len(), 10);
        for q in &questions {
            assert_eq!(q.options.len(), OPTION_COUNT);
            assert!(q.correct_index < OPTION_COUNT);
        }
    }

    #[test]
    fn accepts_alternate_field_names() {
        let json = r#"[{"question": "2 + 2?", "options": ["1", "2", "3", "4"], "correct": 3}]"#;
        let questions = parse_questions(json, Path::new("bank.json")).unwrap();
        assert_eq!(questions[0].text, "2 + 2?");
        assert_eq!(questions[0].correct_index, 3);
    }

    #[test]
    fn rejects_wrong_option_count() {
        let json = r#"[{"text": "q", "options": ["a", "b", "c"], "correct_index": 0}]"#;
        let err = parse_questions(json, Path::new("bank.json")).unwrap_err();
        assert!(matches!(err, QuizError::InvalidQuestion { index: 1, .. }));
        assert!(err.to_string().contains("expected 4 options"));
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let json = r#"[{"text": "q", "options": ["a", "b", "c", "d"], "correct_index": 4}]"#;
        assert!(matches!(
            parse_questions(json, Path::new("bank.json")),
            Err(QuizError::InvalidQuestion { index: 1, .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = parse_questions("[{", Path::new("bank.json")).unwrap_err();
        assert!(matches!(err, QuizError::Load { .. }));
        assert!(err.to_string().contains("bank.json"));
    }

    #[test]
    fn rejects_empty_set() {
        assert!(matches!(validate_all(&[]), Err(QuizError::EmptyQuestionSet)));
    }

    #[test]
    fn load_from_missing_file_reports_path() {
        let err = load_from_file(Path::new("/nonexistent_zzz/q.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent_zzz/q.json"));
    }

    #[test]
    fn load_from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(
            &path,
            r#"[{"text": "Capital of France?", "options": ["Rome", "Paris", "Oslo", "Bern"], "correct_index": 1}]"#,
        )
        .unwrap();
        let questions = load_from_file(&path).unwrap();
        assert_eq!(questions.len(), 1);
        assert!(questions[0].is_correct(1));
    }

    #[test]
    fn shuffle_keeps_every_question() {
        let mut questions = load_bundled().unwrap();
        let mut before: Vec<String> = questions.iter().map(|q| q.text.clone()).collect();
        let mut rng = SmallRng::seed_from_u64(7);
        shuffle(&mut questions, &mut rng);
        let mut after: Vec<String> = questions.iter().map(|q| q.text.clone()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
