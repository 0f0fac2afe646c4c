use crate::error::AnalyticsError;
use core_types::{Mark, Subject, MAX_MARKS};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Number of decimal places a GPA is reported with.
pub const GPA_SCALE: u32 = 2;

/// Grade point awarded for a perfect score.
pub const MAX_GRADE_POINT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Credit weights keyed by subject id.
#[derive(Debug, Clone, Default)]
pub struct SubjectCredits {
    credits: HashMap<i64, i32>,
}

impl SubjectCredits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_subjects<'a>(subjects: impl IntoIterator<Item = &'a Subject>) -> Self {
        let mut credits = Self::new();
        for subject in subjects {
            credits.insert(subject.id, subject.credit);
        }
        credits
    }

    pub fn insert(&mut self, subject_id: i64, credit: i32) {
        self.credits.insert(subject_id, credit);
    }

    pub fn credit_for(&self, subject_id: i64) -> Option<i32> {
        self.credits.get(&subject_id).copied()
    }
}

/// A stateless calculator for the credit-weighted grade-point average.
#[derive(Debug, Default, Clone, Copy)]
pub struct GpaCalculator {}

impl GpaCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the GPA of `student_id` from their marks.
    ///
    /// Each score maps linearly onto a 0-5 grade point (`score / 20`) and is weighted by
    /// its subject's credit. The weighted mean is rounded half-up to [`GPA_SCALE`]
    /// places. A student without marks has a GPA of zero.
    ///
    /// Marks in `marks` that belong to other students are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::SubjectNotFound`] when a mark references a subject
    /// missing from `credits`.
    pub fn calculate(
        &self,
        student_id: i64,
        marks: &[Mark],
        credits: &SubjectCredits,
    ) -> Result<Decimal, AnalyticsError> {
        let mut weighted_points = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;

        for mark in marks.iter().filter(|m| m.student_id == student_id) {
            let credit = credits
                .credit_for(mark.subject_id)
                .map(Decimal::from)
                .ok_or(AnalyticsError::SubjectNotFound {
                    mark_id: mark.id,
                    subject_id: mark.subject_id,
                })?;

            weighted_points += grade_point(mark.marks) * credit;
            total_credits += credit;
        }

        if total_credits.is_zero() {
            tracing::debug!(student_id, "No marks recorded; GPA is zero.");
            return Ok(round_gpa(Decimal::ZERO));
        }

        Ok(round_gpa(weighted_points / total_credits))
    }
}

/// Maps a 0-100 score onto the 0-5 grade-point scale.
pub fn grade_point(marks: i32) -> Decimal {
    Decimal::from(marks) * MAX_GRADE_POINT / Decimal::from(MAX_MARKS)
}

/// Rounds half-up and pins the scale so the value always renders as e.g. `3.60`.
fn round_gpa(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(GPA_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(GPA_SCALE);
    rounded
}
