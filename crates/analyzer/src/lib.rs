use crate::error::AnalyzerError;
use analytics::{GpaCalculator, ResultRow, SubjectCredits};
use database::{DbError, DbRepository};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::path::Path;

pub mod error;
pub mod export;

pub use export::{write_csv, CSV_HEADER};

/// Joins every student with their computed GPA.
#[derive(Debug, Default, Clone)]
pub struct ResultsAggregator {
    calculator: GpaCalculator,
}

impl ResultsAggregator {
    /// Computes the GPA of a single student.
    ///
    /// Subjects are resolved one by one through the repository. A mark whose subject
    /// cannot be found fails the whole computation.
    pub async fn student_gpa(
        &self,
        db_repo: &DbRepository,
        student_id: i64,
    ) -> Result<Decimal, AnalyzerError> {
        let marks = db_repo.list_marks_for_student(student_id).await?;

        let mut credits = SubjectCredits::new();
        let subject_ids: BTreeSet<i64> = marks.iter().map(|m| m.subject_id).collect();
        for subject_id in subject_ids {
            match db_repo.get_subject(subject_id).await {
                Ok(subject) => credits.insert(subject.id, subject.credit),
                // Left out on purpose; the calculator reports which mark dangles.
                Err(DbError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(self.calculator.calculate(student_id, &marks, &credits)?)
    }

    /// Builds one result row per student, in the order the repository lists them.
    pub async fn run(&self, db_repo: &DbRepository) -> Result<Vec<ResultRow>, AnalyzerError> {
        // 1. Fetch
        let students = db_repo.list_students().await?;
        let subjects = db_repo.list_subjects().await?;
        let credits = SubjectCredits::from_subjects(&subjects);

        // 2. Score
        let mut rows = Vec::with_capacity(students.len());
        for student in &students {
            let marks = db_repo.list_marks_for_student(student.id).await?;
            let gpa = self
                .calculator
                .calculate(student.id, &marks, &credits)
                .inspect_err(|e| tracing::error!(student_id = student.id, error = %e, "GPA calculation failed."))?;
            rows.push(ResultRow::new(student, gpa));
        }

        tracing::debug!(students = rows.len(), "Results aggregated.");
        Ok(rows)
    }

    /// Aggregates the results and writes them to `path` as CSV.
    ///
    /// Returns the number of student rows written.
    pub async fn export(&self, db_repo: &DbRepository, path: &Path) -> Result<usize, AnalyzerError> {
        let rows = self.run(db_repo).await?;
        write_csv(&rows, path)
    }
}
