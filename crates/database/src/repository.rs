use crate::DbError;
use core_types::{Mark, NewMark, NewStudent, NewSubject, Student, Subject};
use sqlx::sqlite::SqlitePool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Listings are returned in ascending id order, which is insertion order.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a student. The roll number must not already be taken.
    pub async fn create_student(&self, new: &NewStudent) -> Result<Student, DbError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO student (roll_no, name, class_name)
            VALUES (?, ?, ?)
            RETURNING id, roll_no, name, class_name
            "#,
        )
        .bind(new.roll_no.trim())
        .bind(new.name.trim())
        .bind(new.class_label())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::DuplicateRollNo(new.roll_no.trim().to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(student_id = student.id, roll_no = %student.roll_no, "Student registered.");
        Ok(student)
    }

    /// Inserts a subject.
    pub async fn create_subject(&self, new: &NewSubject) -> Result<Subject, DbError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"
            INSERT INTO subject (subject_name, credit)
            VALUES (?, ?)
            RETURNING id, subject_name, credit
            "#,
        )
        .bind(&new.subject_name)
        .bind(new.credit)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(subject_id = subject.id, credit = subject.credit, "Subject registered.");
        Ok(subject)
    }

    /// Records a mark for an existing student and subject.
    pub async fn create_mark(&self, new: &NewMark) -> Result<Mark, DbError> {
        let mark = sqlx::query_as::<_, Mark>(
            r#"
            INSERT INTO marks (marks, student_id, subject_id)
            VALUES (?, ?, ?)
            RETURNING id, marks, student_id, subject_id
            "#,
        )
        .bind(new.marks)
        .bind(new.student_id)
        .bind(new.subject_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                DbError::DanglingReference
            }
            other => other.into(),
        })?;

        tracing::info!(
            mark_id = mark.id,
            student_id = mark.student_id,
            subject_id = mark.subject_id,
            "Mark recorded."
        );
        Ok(mark)
    }

    /// Fetches a single student by id.
    pub async fn get_student(&self, id: i64) -> Result<Student, DbError> {
        sqlx::query_as::<_, Student>("SELECT id, roll_no, name, class_name FROM student WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound { entity: "student", id })
    }

    /// Fetches a single subject by id.
    pub async fn get_subject(&self, id: i64) -> Result<Subject, DbError> {
        sqlx::query_as::<_, Subject>("SELECT id, subject_name, credit FROM subject WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound { entity: "subject", id })
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, DbError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, roll_no, name, class_name FROM student ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>, DbError> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, subject_name, credit FROM subject ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(subjects)
    }

    /// Fetches every mark, across all students.
    pub async fn list_marks(&self) -> Result<Vec<Mark>, DbError> {
        let marks = sqlx::query_as::<_, Mark>(
            "SELECT id, marks, student_id, subject_id FROM marks ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(marks)
    }

    /// Fetches all marks recorded for one student. An unknown student simply has none.
    pub async fn list_marks_for_student(&self, student_id: i64) -> Result<Vec<Mark>, DbError> {
        let marks = sqlx::query_as::<_, Mark>(
            "SELECT id, marks, student_id, subject_id FROM marks WHERE student_id = ? ORDER BY id ASC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(marks)
    }

    pub async fn count_students(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_marks(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM marks")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect_and_migrate;
    use configuration::DatabaseSettings;

    async fn repo() -> DbRepository {
        let pool = connect_and_migrate(&DatabaseSettings::in_memory()).await.unwrap();
        DbRepository::new(pool)
    }

    #[tokio::test]
    async fn students_round_trip_in_insertion_order() {
        let repo = repo().await;
        let b = repo.create_student(&NewStudent::new("R2", "Bilal", Some("10B"))).await.unwrap();
        let a = repo.create_student(&NewStudent::new("R1", "Asha", None)).await.unwrap();

        let students = repo.list_students().await.unwrap();
        assert_eq!(students, vec![b, a.clone()]);
        assert_eq!(repo.get_student(a.id).await.unwrap().class_name, None);
        assert_eq!(repo.count_students().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn blank_class_label_is_stored_as_null() {
        let repo = repo().await;
        let student = repo.create_student(&NewStudent::new("R1", "Asha", Some(""))).await.unwrap();
        assert_eq!(student.class_name, None);
    }

    #[tokio::test]
    async fn duplicate_roll_no_is_rejected() {
        let repo = repo().await;
        repo.create_student(&NewStudent::new("R1", "Asha", None)).await.unwrap();
        let err = repo.create_student(&NewStudent::new("R1", "Other", None)).await.unwrap_err();
        assert!(matches!(err, DbError::DuplicateRollNo(ref roll) if roll == "R1"));
        assert_eq!(repo.count_students().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let repo = repo().await;
        let err = repo.get_subject(99).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { entity: "subject", id: 99 }));
        assert!(repo.get_student(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn marks_are_filtered_by_student() {
        let repo = repo().await;
        let asha = repo.create_student(&NewStudent::new("R1", "Asha", None)).await.unwrap();
        let bilal = repo.create_student(&NewStudent::new("R2", "Bilal", None)).await.unwrap();
        let maths = repo.create_subject(&NewSubject::new("Maths", 3)).await.unwrap();
        assert_eq!(repo.get_subject(maths.id).await.unwrap(), maths);

        let first = repo.create_mark(&NewMark::new(asha.id, maths.id, 80)).await.unwrap();
        repo.create_mark(&NewMark::new(bilal.id, maths.id, 55)).await.unwrap();
        let again = repo.create_mark(&NewMark::new(asha.id, maths.id, 90)).await.unwrap();

        let marks = repo.list_marks_for_student(asha.id).await.unwrap();
        assert_eq!(marks, vec![first, again]);
        assert_eq!(repo.list_marks().await.unwrap().len(), 3);
        assert!(repo.list_marks_for_student(404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mark_for_unknown_student_is_rejected() {
        let repo = repo().await;
        let maths = repo.create_subject(&NewSubject::new("Maths", 3)).await.unwrap();
        let err = repo.create_mark(&NewMark::new(7, maths.id, 50)).await.unwrap_err();
        assert!(matches!(err, DbError::DanglingReference));
        assert_eq!(repo.count_marks().await.unwrap(), 0);
    }
}
