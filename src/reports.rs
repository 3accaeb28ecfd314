use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::db::queries::results::get_all_results;
use crate::db::GameResult;
use crate::quiz::QuizError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub results: Vec<GameResult>,
    pub total_games: usize,
    pub top_player: Option<GameResult>,
    pub average_score: i64,
}

impl Summary {
    pub fn from_results(results: Vec<GameResult>) -> Self {
        let total_games = results.len();
        // on ties the earliest game wins
        let top_player = results
            .iter()
            .fold(None::<&GameResult>, |best, r| match best {
                Some(b) if b.score >= r.score => Some(b),
                _ => Some(r),
            })
            .cloned();
        let average_score = if total_games > 0 {
            let sum: i64 = results.iter().map(|r| r.score).sum();
            sum.div_euclid(total_games as i64)
        } else {
            0
        };
        Summary {
            results,
            total_games,
            top_player,
            average_score,
        }
    }
}

/// Column titles of the exported file.
#[derive(Debug, Clone)]
pub struct ExportHeaders {
    pub name: String,
    pub score: String,
}

/// Writes all results to one fixed CSV file.
///
/// Exports are serialized with a lock, and the database is read while holding it,
/// so the file always holds the latest complete snapshot.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
    headers: ExportHeaders,
    lock: Arc<Mutex<()>>,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>, headers: ExportHeaders) -> Self {
        Self {
            path: path.into(),
            headers,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Name offered to the browser for the download.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "results.csv".to_owned())
    }

    /// Regenerates the export file and returns its contents.
    pub async fn export(&self, pool: &SqlitePool) -> Result<Vec<u8>, QuizError> {
        let _guard = self.lock.lock().await;
        let results = get_all_results(pool).await?;
        let data = render_csv(&results, &self.headers)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, &data).await?;
        tracing::info!(
            "Exported {} results to {}",
            results.len(),
            self.path.display()
        );
        Ok(data)
    }
}

pub fn render_csv(results: &[GameResult], headers: &ExportHeaders) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([headers.name.as_str(), headers.score.as_str()])?;
    for result in results {
        wtr.write_record([result.username.as_str(), result.score.to_string().as_str()])?;
    }
    wtr.flush()?;
    wtr.into_inner().map_err(|e| e.into_error().into())
}
