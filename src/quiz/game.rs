use super::{Question, QuizError};

pub const CORRECT_ANSWER_REWARD: u64 = 10_000;

/// Progress of a single game. It lives in hidden form fields on the page,
/// the server keeps nothing between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub username: String,
    pub category: String,
    pub score: u64,
    /// 1-based number of the question currently shown.
    pub qnum: usize,
}

#[derive(Debug)]
pub enum Step {
    Next { state: GameState, question: Question },
    Finished(GameState),
}

impl GameState {
    pub fn start(username: String, category: String) -> Self {
        Self {
            username,
            category,
            score: 0,
            qnum: 1,
        }
    }

    /// Returns whether the answer was right.
    pub fn grade(&mut self, answer: i64, correct: i64) -> bool {
        let is_correct = answer == correct;
        if is_correct {
            self.score = self.score.saturating_add(CORRECT_ANSWER_REWARD);
        }
        is_correct
    }

    /// Picks the next question out of a freshly loaded (and reshuffled) bank.
    ///
    /// `qnum` is only compared against the length of that bank, so the question at
    /// the next position may be one that was already shown earlier in the game.
    pub fn advance(self, mut questions: Vec<Question>) -> Step {
        if self.qnum < questions.len() {
            let question = questions.swap_remove(self.qnum);
            Step::Next {
                state: GameState {
                    qnum: self.qnum + 1,
                    ..self
                },
                question,
            }
        } else {
            Step::Finished(self)
        }
    }
}

pub fn first_question(category: &str, questions: Vec<Question>) -> Result<Question, QuizError> {
    questions
        .into_iter()
        .next()
        .ok_or_else(|| QuizError::Malformed(format!("category {category:?} has no questions")))
}
