use core_types::Student;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the results report: a student and their GPA.
///
/// This struct is the output of the results aggregation and feeds both the HTML
/// results view and the CSV export, so the two always show the same figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub roll_no: String,
    pub name: String,
    pub class_name: Option<String>,
    /// Serialized as a string with exactly two decimals, e.g. `"3.60"`.
    pub gpa: Decimal,
}

impl ResultRow {
    pub fn new(student: &Student, gpa: Decimal) -> Self {
        Self {
            roll_no: student.roll_no.clone(),
            name: student.name.clone(),
            class_name: student.class_name.clone(),
            gpa,
        }
    }

    /// The class label, or an empty string when the student has none.
    pub fn class_label(&self) -> &str {
        self.class_name.as_deref().unwrap_or_default()
    }
}
