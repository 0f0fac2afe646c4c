use thiserror::Error;

/// Validation failures for user-supplied records.
///
/// The display strings are shown verbatim to whoever submitted the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Roll No and Name required")]
    MissingStudentIdentity,

    #[error("Credit must be a positive integer")]
    NonPositiveCredit(i32),

    #[error("Marks must be between 0 and 100")]
    MarksOutOfRange(i32),
}
