use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),

    #[error("GPA calculation failed: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Failed to write the results export: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write the results export: {0}")]
    Io(#[from] std::io::Error),
}
