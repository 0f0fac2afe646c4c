use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The highest score a single mark can carry.
pub const MAX_MARKS: i32 = 100;

/// A registered student. Rows are never updated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    /// Unique, non-empty roll number.
    pub roll_no: String,
    pub name: String,
    /// Class or section label, if one was given.
    pub class_name: Option<String>,
}

/// A subject and the credit weight it contributes to the GPA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: i64,
    pub subject_name: String,
    pub credit: i32,
}

/// One recorded score for one student in one subject.
///
/// The same (student, subject) pair may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Mark {
    pub id: i64,
    pub marks: i32,
    pub student_id: i64,
    pub subject_id: i64,
}

/// Input for registering a student, as submitted by the registration form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub roll_no: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl NewStudent {
    pub fn new(roll_no: impl Into<String>, name: impl Into<String>, class_name: Option<&str>) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            class_name: class_name.map(str::to_string),
        }
    }

    /// Both the roll number and the name are required.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.roll_no.trim().is_empty() || self.name.trim().is_empty() {
            return Err(CoreError::MissingStudentIdentity);
        }
        Ok(())
    }

    /// The class label to persist. Blank labels are stored as absent.
    pub fn class_label(&self) -> Option<&str> {
        self.class_name
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

/// Input for registering a subject.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubject {
    #[serde(default)]
    pub subject_name: String,
    pub credit: i32,
}

impl NewSubject {
    pub fn new(subject_name: impl Into<String>, credit: i32) -> Self {
        Self { subject_name: subject_name.into(), credit }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.credit < 1 {
            return Err(CoreError::NonPositiveCredit(self.credit));
        }
        Ok(())
    }
}

/// Input for recording a mark.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMark {
    pub student_id: i64,
    pub subject_id: i64,
    pub marks: i32,
}

impl NewMark {
    pub fn new(student_id: i64, subject_id: i64, marks: i32) -> Self {
        Self { student_id, subject_id, marks }
    }

    /// Scores must fall within `0..=MAX_MARKS`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0..=MAX_MARKS).contains(&self.marks) {
            return Err(CoreError::MarksOutOfRange(self.marks));
        }
        Ok(())
    }
}
