pub mod game;
pub mod questions;

pub use game::{GameState, Step, CORRECT_ANSWER_REWARD};
pub use questions::{Question, QuestionStore};

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Category {0:?} not found")]
    NotFound(String),
    #[error("Malformed data: {0}")]
    Malformed(String),
    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
