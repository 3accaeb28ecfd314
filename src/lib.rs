pub mod db;
pub mod quiz;
pub mod reports;
pub mod server;
pub mod settings;
pub mod telemetry;
