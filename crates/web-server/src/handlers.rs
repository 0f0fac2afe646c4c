use crate::{error::AppError, views, AppState};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use core_types::{NewMark, NewStudent, NewSubject};
use database::DbError;
use serde_json::json;
use std::sync::Arc;

/// # GET /
pub async fn home() -> Redirect {
    Redirect::to("/results")
}

/// # GET /add-student
pub async fn add_student_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render(views::ADD_STUDENT, &json!({}))?))
}

/// # POST /add-student
pub async fn add_student(
    State(state): State<Arc<AppState>>,
    Form(new_student): Form<NewStudent>,
) -> Result<Response, AppError> {
    new_student.validate()?;

    match state.db_repo.create_student(&new_student).await {
        Ok(_) => Ok(Redirect::to("/results").into_response()),
        Err(DbError::DuplicateRollNo(_)) => {
            Err(AppError::Validation("Roll No already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// # GET /add-subject
pub async fn add_subject_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render(views::ADD_SUBJECT, &json!({}))?))
}

/// # POST /add-subject
/// Redirects back to the form so several subjects can be entered in a row.
pub async fn add_subject(
    State(state): State<Arc<AppState>>,
    Form(new_subject): Form<NewSubject>,
) -> Result<Response, AppError> {
    new_subject.validate()?;
    state.db_repo.create_subject(&new_subject).await?;
    Ok(Redirect::to("/add-subject").into_response())
}

/// # GET /add-marks
/// The form offers every registered student and subject.
pub async fn add_marks_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let students = state.db_repo.list_students().await?;
    let subjects = state.db_repo.list_subjects().await?;
    let html = state.templates.render(
        views::ADD_MARKS,
        &json!({ "students": students, "subjects": subjects }),
    )?;
    Ok(Html(html))
}

/// # POST /add-marks
pub async fn add_marks(
    State(state): State<Arc<AppState>>,
    Form(new_mark): Form<NewMark>,
) -> Result<Response, AppError> {
    new_mark.validate()?;

    state
        .db_repo
        .get_student(new_mark.student_id)
        .await
        .map_err(|e| reject_missing(e, "Student not found"))?;
    state
        .db_repo
        .get_subject(new_mark.subject_id)
        .await
        .map_err(|e| reject_missing(e, "Subject not found"))?;

    state.db_repo.create_mark(&new_mark).await?;
    Ok(Redirect::to("/results").into_response())
}

/// Turns a failed lookup of a referenced record into a validation message.
fn reject_missing(err: DbError, message: &str) -> AppError {
    if err.is_not_found() {
        AppError::Validation(message.to_string())
    } else {
        err.into()
    }
}

/// # GET /results
pub async fn view_results(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let results = state.aggregator.run(&state.db_repo).await?;
    let html = state.templates.render(views::VIEW_RESULTS, &json!({ "results": results }))?;
    Ok(Html(html))
}

/// # GET /export
/// Writes the results CSV to the configured path, replacing any previous export.
pub async fn export_results(State(state): State<Arc<AppState>>) -> Result<String, AppError> {
    state.aggregator.export(&state.db_repo, &state.export_path).await?;
    Ok(format!("Results exported to {}", state.export_path.display()))
}
