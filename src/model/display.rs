// File: ./src/model/display.rs
use crate::model::item::{ParseResult, ParsedTaskDraft, Priority, Project};
use crate::model::parser::{DATE_MARKER, FEATURE_MARKER, PRIORITY_MARKER, PROJECT_MARKER};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// `None` when the week would begin before the first representable date.
    fn start_of_week(self, date: NaiveDate) -> Option<NaiveDate> {
        let offset = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        date.checked_sub_days(Days::new(u64::from(offset)))
    }
}

pub trait DraftDisplay {
    fn to_smart_string(&self, projects: &[Project]) -> String;
}

impl DraftDisplay for ParsedTaskDraft {
    /// Renders the draft back into annotated text for editing.
    ///
    /// Annotations come first so they win over any same-marker token still
    /// left in the title when the text is parsed again. Dates are always
    /// written as `YYYY-MM-DD`. A project is written with its name cut at the
    /// first whitespace or marker, which may resolve to another project when
    /// names share a prefix.
    fn to_smart_string(&self, projects: &[Project]) -> String {
        let mut parts = Vec::new();
        if let Some(d) = self.due_date {
            parts.push(format!("{}{}", DATE_MARKER, d.format("%Y-%m-%d")));
        }
        if let Some(p) = self.priority {
            parts.push(format!("{}{}", PRIORITY_MARKER, p));
        }
        if let Some(name) = self
            .project_id
            .as_ref()
            .and_then(|id| projects.iter().find(|p| &p.id == id))
            .map(|p| token_safe_prefix(&p.name))
            && !name.is_empty()
        {
            parts.push(format!("{}{}", PROJECT_MARKER, name));
        }
        if self.is_feature == Some(true) {
            parts.push(format!("{}feat", FEATURE_MARKER));
        }
        if !self.title.is_empty() {
            parts.push(self.title.clone());
        }
        parts.join(" ")
    }
}

fn token_safe_prefix(name: &str) -> &str {
    let end = name
        .find(|c: char| {
            c.is_whitespace()
                || [DATE_MARKER, PRIORITY_MARKER, PROJECT_MARKER, FEATURE_MARKER].contains(&c)
        })
        .unwrap_or(name.len());
    &name[..end]
}

/// Human label for a due date: `Today`, `Tomorrow`, a weekday name within the
/// current week, else `Mar 4` (with the year when it is not the current one).
pub fn format_relative_date(date: NaiveDate, today: NaiveDate, week_start: WeekStart) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.succ_opt() == Some(date) {
        return "Tomorrow".to_string();
    }
    if let (Some(a), Some(b)) = (week_start.start_of_week(date), week_start.start_of_week(today))
        && a == b
    {
        return date.format("%A").to_string();
    }
    if date.year() == today.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Stable sort, most urgent first. Drafts without priority rank with `Low`.
pub fn sort_by_priority(drafts: &mut [ParsedTaskDraft]) {
    drafts.sort_by_key(|d| std::cmp::Reverse(Priority::rank(d.priority)));
}

/// Whether a live preview of `result` is worth showing.
pub fn should_preview(result: &ParseResult, threshold: f64) -> bool {
    !result.draft.title.is_empty() && result.confidence >= threshold
}
