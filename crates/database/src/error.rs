use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database configuration: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("No {entity} with id {id} exists.")]
    NotFound { entity: &'static str, id: i64 },

    #[error("A student with roll number '{0}' already exists.")]
    DuplicateRollNo(String),

    #[error("The mark references a student or subject that does not exist.")]
    DanglingReference,
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}
