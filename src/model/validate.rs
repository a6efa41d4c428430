// File: ./src/model/validate.rs
// Checks a caller must run on a draft before handing it to task creation.
use crate::model::item::{ParsedTaskDraft, Project};

pub const MAX_TITLE_CHARS: usize = 200;

pub fn validate_draft(draft: &ParsedTaskDraft) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push("Title is required".to_string());
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        errors.push(format!(
            "Title must be less than {} characters",
            MAX_TITLE_CHARS
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Fails when the draft points at a project missing from `projects`,
/// e.g. after the list was replaced between parsing and submission.
pub fn validate_project_ref(draft: &ParsedTaskDraft, projects: &[Project]) -> Result<(), String> {
    match &draft.project_id {
        Some(id) if !projects.iter().any(|p| &p.id == id) => {
            Err(format!("Unknown project '{}'", id))
        }
        _ => Ok(()),
    }
}
