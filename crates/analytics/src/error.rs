use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// A mark points at a subject that does not exist. This is a data-integrity
    /// failure, not something the caller can correct by retrying.
    #[error("Mark {mark_id} references subject {subject_id}, which does not exist")]
    SubjectNotFound { mark_id: i64, subject_id: i64 },
}
