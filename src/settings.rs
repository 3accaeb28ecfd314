use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::reports::ExportHeaders;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub questions_dir: PathBuf,
    pub static_dir: PathBuf,
    pub export_path: PathBuf,
    pub export_name_header: String,
    pub export_score_header: String,
}

impl Settings {
    /// Defaults, then `config_file` if it exists, then `QUIZ__*` environment variables.
    pub fn load(config_file: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("db_path", "data/results.db")?
            .set_default("questions_dir", "questions")?
            .set_default("static_dir", "static")?
            .set_default("export_path", "results.csv")?
            .set_default("export_name_header", "Name")?
            .set_default("export_score_header", "Reward amount")?
            .add_source(File::from(config_file).required(false))
            .add_source(Environment::with_prefix("QUIZ").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn export_headers(&self) -> ExportHeaders {
        ExportHeaders {
            name: self.export_name_header.clone(),
            score: self.export_score_header.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("quiz.toml")).unwrap();
        assert_eq!(settings.questions_dir, PathBuf::from("questions"));
        assert_eq!(settings.export_path, PathBuf::from("results.csv"));
        assert_eq!(settings.export_headers().name, "Name");
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(
            &path,
            "db_path = \"/var/lib/quiz/results.db\"\nexport_name_header = \"Ism\"\nexport_score_header = \"Mukofot (so‘m)\"\n",
        )
        .unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.db_path, PathBuf::from("/var/lib/quiz/results.db"));
        assert_eq!(settings.export_headers().name, "Ism");
        assert_eq!(settings.export_headers().score, "Mukofot (so‘m)");
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
    }
}
