// File: ./src/model/mod.rs
pub mod display;
pub mod item;
pub mod parser;
pub mod validate;

pub use display::{DraftDisplay, WeekStart, format_relative_date, should_preview, sort_by_priority};
pub use item::{ParseResult, ParsedTaskDraft, Priority, Project};
pub use parser::{SyntaxToken, SyntaxType, TaskParser};
pub use validate::{validate_draft, validate_project_ref};
