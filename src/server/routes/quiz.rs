use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::results::insert_result,
    quiz::{game::first_question, GameState, Question, QuestionStore, QuizError, Step},
    server::app::AppState,
    telemetry::record_answer,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct StartForm {
    category: String,
    username: String,
}

#[derive(Deserialize)]
struct AnswerForm {
    answer: i64,
    correct: i64,
    category: String,
    score: u64,
    qnum: usize,
    username: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexPage {
    categories: Vec<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "quiz.html")]
struct QuestionPage {
    question: Question,
    state: GameState,
    total: usize,
}

#[derive(Template, WebTemplate)]
#[template(path = "final.html")]
struct FinalPage {
    state: GameState,
}

fn malformed(rejection: FormRejection) -> QuizError {
    QuizError::Malformed(rejection.body_text())
}

async fn index(State(store): State<QuestionStore>) -> ApiResponse<IndexPage> {
    let categories = store.categories().await?;
    Ok(IndexPage { categories })
}

async fn start_quiz(
    State(store): State<QuestionStore>,
    form: Result<Form<StartForm>, FormRejection>,
) -> ApiResponse<QuestionPage> {
    let Form(form) = form.map_err(malformed)?;
    let questions = store.load_shuffled(&form.category).await?;
    let total = questions.len();
    let question = first_question(&form.category, questions)?;
    let state = GameState::start(form.username, form.category);
    tracing::info!(
        "{} started a quiz in {} ({total} questions)",
        state.username,
        state.category
    );
    Ok(QuestionPage {
        question,
        state,
        total,
    })
}

async fn answer(
    State(store): State<QuestionStore>,
    State(pool): State<SqlitePool>,
    form: Result<Form<AnswerForm>, FormRejection>,
) -> ApiResponse<Response> {
    let Form(form) = form.map_err(malformed)?;
    let mut state = GameState {
        username: form.username,
        category: form.category,
        score: form.score,
        qnum: form.qnum,
    };
    let is_correct = state.grade(form.answer, form.correct);
    record_answer(&state.category, is_correct);
    tracing::debug!(
        "{} answered question {} in {}: correct={is_correct}",
        state.username,
        state.qnum,
        state.category
    );

    let questions = store.load_shuffled(&state.category).await?;
    let total = questions.len();
    match state.advance(questions) {
        Step::Next { state, question } => Ok(QuestionPage {
            question,
            state,
            total,
        }
        .into_response()),
        Step::Finished(state) => {
            let score = i64::try_from(state.score)
                .map_err(|_| QuizError::Malformed(format!("score {} is too large", state.score)))?;
            let id = insert_result(&pool, &state.username, score).await?;
            tracing::info!(
                "{} finished {} with {score} points (result {id})",
                state.username,
                state.category
            );
            Ok(FinalPage { state }.into_response())
        }
    }
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/quiz", post(start_quiz))
        .route("/answer", post(answer))
        .with_state(state)
}
