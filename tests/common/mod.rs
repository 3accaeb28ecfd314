use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;
use trivia_quiz::db::{establish_connection, run_migrations};
use trivia_quiz::server::app::{router, AppState};
use trivia_quiz::settings::Settings;

pub const HISTORY: &str = r#"[
    {"question": "First question", "options": ["a", "b", "c"], "answer": 0},
    {"question": "Second question", "options": ["a", "b"], "answer": 1},
    {"question": "Third question", "options": ["a", "b", "c", "d"], "answer": 3}
]"#;

#[allow(dead_code)]
pub struct TestApp {
    pub dir: TempDir,
    pub pool: SqlitePool,
    pub router: Router,
    pub export_path: PathBuf,
}

#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn spawn_app() -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let questions_dir = dir.path().join("questions");
    std::fs::create_dir_all(&questions_dir).unwrap();
    std::fs::write(questions_dir.join("history.json"), HISTORY).unwrap();

    let settings = Settings {
        bind_addr: "127.0.0.1:0".to_owned(),
        db_path: dir.path().join("results.db"),
        questions_dir,
        static_dir: dir.path().join("static"),
        export_path: dir.path().join("results.csv"),
        export_name_header: "Name".to_owned(),
        export_score_header: "Reward amount".to_owned(),
    };
    let pool = establish_connection(&settings.db_path)
        .await
        .expect("Failed to open database");
    run_migrations(&pool).await.expect("Migrations failed");

    TestApp {
        router: router(AppState::new(pool.clone(), &settings)),
        export_path: settings.export_path,
        pool,
        dir,
    }
}

#[allow(dead_code)]
impl TestApp {
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: String) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn start(&self, category: &str, username: &str) -> TestResponse {
        self.post_form("/quiz", format!("category={category}&username={username}"))
            .await
    }

    /// Submits `answer` for the question shown on `page`, echoing its hidden fields.
    pub async fn answer(&self, page: &str, answer: &str) -> TestResponse {
        let body = format!(
            "answer={answer}&correct={}&category={}&score={}&qnum={}&username={}",
            hidden(page, "correct"),
            hidden(page, "category"),
            hidden(page, "score"),
            hidden(page, "qnum"),
            hidden(page, "username"),
        );
        self.post_form("/answer", body).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

/// Value of a hidden form input on a question page.
#[allow(dead_code)]
pub fn hidden(page: &str, name: &str) -> String {
    between(page, &format!("name=\"{name}\" value=\""), "\"")
}

pub fn between(page: &str, start: &str, end: &str) -> String {
    let from = page
        .find(start)
        .unwrap_or_else(|| panic!("{start:?} not found in page:\n{page}"))
        + start.len();
    let len = page[from..].find(end).expect("unterminated value");
    page[from..from + len].trim().to_owned()
}
