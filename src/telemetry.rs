use prometheus::register_int_counter_vec;
use prometheus::IntCounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref ANSWER_CNTR: IntCounterVec = register_int_counter_vec!(
        "quiz_answers_total",
        "Number of graded answers",
        &["category", "correct"]
    )
    .unwrap();
}

pub fn record_answer(category: &str, correct: bool) {
    let correct = if correct { "true" } else { "false" };
    ANSWER_CNTR.with_label_values(&[category, correct]).inc();
}

const DEFAULT_FILTER: &str = "info,sqlx=warn,tower_http=debug";

pub fn init_tracing() {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
