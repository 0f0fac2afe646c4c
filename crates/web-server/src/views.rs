//! Embedded handlebars templates for the HTML pages.

use handlebars::{Handlebars, TemplateError};

pub const ADD_STUDENT: &str = "add_student";
pub const ADD_SUBJECT: &str = "add_subject";
pub const ADD_MARKS: &str = "add_marks";
pub const VIEW_RESULTS: &str = "view_results";

/// Builds the template registry. Values are HTML-escaped when rendered.
pub fn registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut templates = Handlebars::new();
    templates.register_partial("nav", include_str!("../templates/nav.hbs"))?;
    templates.register_template_string(ADD_STUDENT, include_str!("../templates/add_student.hbs"))?;
    templates.register_template_string(ADD_SUBJECT, include_str!("../templates/add_subject.hbs"))?;
    templates.register_template_string(ADD_MARKS, include_str!("../templates/add_marks.hbs"))?;
    templates.register_template_string(VIEW_RESULTS, include_str!("../templates/view_results.hbs"))?;
    Ok(templates)
}
