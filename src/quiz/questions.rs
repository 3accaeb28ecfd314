use std::io::ErrorKind;
use std::path::PathBuf;

use rand::seq::SliceRandom;
use serde::Deserialize;

use super::QuizError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    /// Filled in by the loader from the file name, not read from JSON.
    #[serde(skip_deserializing, default)]
    pub category: String,
    #[serde(alias = "prompt", alias = "text")]
    pub question: String,
    #[serde(alias = "choices")]
    pub options: Vec<String>,
    /// Index into `options`.
    #[serde(alias = "correct")]
    pub answer: usize,
}

/// Per-category question banks stored as `<dir>/<category>.json`.
///
/// Nothing is cached, every load reads the file again so edits show up on the next request.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    dir: PathBuf,
}

impl QuestionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn load(&self, category: &str) -> Result<Vec<Question>, QuizError> {
        if !is_valid_category(category) {
            return Err(QuizError::NotFound(category.to_owned()));
        }
        let path = self.dir.join(format!("{category}.json"));
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(QuizError::NotFound(category.to_owned()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut questions: Vec<Question> = serde_json::from_slice(&raw)
            .map_err(|e| QuizError::Malformed(format!("{}: {e}", path.display())))?;
        for (n, q) in questions.iter_mut().enumerate() {
            if q.answer >= q.options.len() {
                return Err(QuizError::Malformed(format!(
                    "{}: question {n} points to answer {} out of {} options",
                    path.display(),
                    q.answer,
                    q.options.len()
                )));
            }
            q.category = category.to_owned();
        }
        Ok(questions)
    }

    pub async fn load_shuffled(&self, category: &str) -> Result<Vec<Question>, QuizError> {
        let mut questions = self.load(category).await?;
        questions.shuffle(&mut rand::thread_rng());
        Ok(questions)
    }

    /// Names of all question banks in the directory, sorted.
    pub async fn categories(&self) -> Result<Vec<String>, QuizError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        let mut categories = vec![];
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if is_valid_category(stem) {
                        categories.push(stem.to_owned());
                    }
                }
            }
        }
        categories.sort();
        Ok(categories)
    }
}

// only plain file stems, so a category can't point outside of the questions dir
fn is_valid_category(category: &str) -> bool {
    !category.is_empty()
        && category
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
