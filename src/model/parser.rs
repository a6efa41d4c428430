// File: src/model/parser.rs
use crate::model::{ParseResult, ParsedTaskDraft, Priority, Project};
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

pub const DATE_MARKER: char = '#';
pub const PRIORITY_MARKER: char = '!';
pub const PROJECT_MARKER: char = '$';
pub const FEATURE_MARKER: char = '%';

const MARKERS: [char; 4] = [DATE_MARKER, PRIORITY_MARKER, PROJECT_MARKER, FEATURE_MARKER];

// Confidence is tracked in tenths so that 0.8 + 0.1 + 0.1 lands exactly on 1.0.
const BASE_CONFIDENCE_TENTHS: u8 = 8;
const MAX_CONFIDENCE_TENTHS: u8 = 10;

const SUGGESTED_PROJECTS: usize = 3;
const USAGE_HINTS: [&str; 4] = [
    "Use #tomorrow, #monday, or #2024-01-15 for due dates",
    "Use !high, !medium, or !low for priority",
    "Use $projectname to assign to a project",
    "Use %Feat to mark as a feature",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SyntaxType {
    Text,
    DueDate,
    Priority,
    Project,
    Feature,
}

impl SyntaxType {
    /// Annotation kinds in the order they are extracted.
    const EXTRACTION_ORDER: [SyntaxType; 4] = [
        SyntaxType::DueDate,
        SyntaxType::Priority,
        SyntaxType::Project,
        SyntaxType::Feature,
    ];

    pub fn marker(self) -> Option<char> {
        match self {
            SyntaxType::Text => None,
            SyntaxType::DueDate => Some(DATE_MARKER),
            SyntaxType::Priority => Some(PRIORITY_MARKER),
            SyntaxType::Project => Some(PROJECT_MARKER),
            SyntaxType::Feature => Some(FEATURE_MARKER),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SyntaxToken {
    pub kind: SyntaxType,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone)]
enum Resolved {
    Date(NaiveDate),
    Priority(Priority),
    Project(String),
    Feature,
}

#[derive(Debug, Clone)]
struct Annotation {
    kind: SyntaxType,
    start: usize,
    end: usize,
    value: Resolved,
}

/// Turns free-text task entries into structured drafts.
///
/// Holds the project list used to resolve `$project` tokens. The list is
/// replaced wholesale through [`TaskParser::set_projects`]; parsing itself
/// never mutates anything and performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct TaskParser {
    projects: Vec<Project>,
}

impl TaskParser {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    /// Parses `input` relative to the local calendar date.
    pub fn parse(&self, input: &str) -> ParseResult {
        self.parse_on(input, Local::now().date_naive())
    }

    /// Parses `input` with `today` as the reference date for relative keywords.
    pub fn parse_on(&self, input: &str, today: NaiveDate) -> ParseResult {
        let clean = input.trim();
        if clean.is_empty() {
            return ParseResult {
                draft: ParsedTaskDraft::default(),
                confidence: 0.0,
                suggestions: Vec::new(),
            };
        }

        let annotations = self.resolve_annotations(clean, today);
        let mut draft = ParsedTaskDraft::default();
        for annotation in &annotations {
            match &annotation.value {
                Resolved::Date(d) => draft.due_date = Some(*d),
                Resolved::Priority(p) => draft.priority = Some(*p),
                Resolved::Project(id) => draft.project_id = Some(id.clone()),
                Resolved::Feature => draft.is_feature = Some(true),
            }
        }

        let remaining = strip_spans(clean, &annotations);
        draft.title = if remaining.is_empty() {
            clean.to_string()
        } else {
            remaining
        };

        let tenths = (BASE_CONFIDENCE_TENTHS + annotations.len() as u8).min(MAX_CONFIDENCE_TENTHS);

        ParseResult {
            draft,
            confidence: f64::from(tenths) / 10.0,
            suggestions: self.suggestions(),
        }
    }

    /// Splits `input` into highlight spans relative to the local calendar date.
    pub fn tokenize(&self, input: &str) -> Vec<SyntaxToken> {
        self.tokenize_on(input, Local::now().date_naive())
    }

    /// Splits `input` into contiguous spans. A span carries an annotation kind
    /// exactly when [`TaskParser::parse_on`] would strip it from the title;
    /// everything else, unresolved tokens included, is `Text`.
    pub fn tokenize_on(&self, input: &str, today: NaiveDate) -> Vec<SyntaxToken> {
        let offset = input.len() - input.trim_start().len();
        let annotations = self.resolve_annotations(input.trim(), today);

        let mut tokens = Vec::new();
        let mut cursor = 0;
        for annotation in annotations {
            let start = annotation.start + offset;
            let end = annotation.end + offset;
            if start > cursor {
                tokens.push(SyntaxToken {
                    kind: SyntaxType::Text,
                    start: cursor,
                    end: start,
                });
            }
            tokens.push(SyntaxToken {
                kind: annotation.kind,
                start,
                end,
            });
            cursor = end;
        }
        if cursor < input.len() {
            tokens.push(SyntaxToken {
                kind: SyntaxType::Text,
                start: cursor,
                end: input.len(),
            });
        }
        tokens
    }

    pub fn suggestions(&self) -> Vec<String> {
        let mut suggestions: Vec<String> = USAGE_HINTS.iter().map(|s| s.to_string()).collect();
        if !self.projects.is_empty() {
            let names: Vec<String> = self
                .projects
                .iter()
                .take(SUGGESTED_PROJECTS)
                .map(|p| format!("{}{}", PROJECT_MARKER, p.name))
                .collect();
            suggestions.push(format!("Available projects: {}", names.join(", ")));
        }
        suggestions
    }

    // Removed tokens never contain another marker, so every later token reads
    // the same in the original text as in the partially stripped one. That lets
    // all spans be located on `text` directly.
    fn resolve_annotations(&self, text: &str, today: NaiveDate) -> Vec<Annotation> {
        let mut found = Vec::new();
        for kind in SyntaxType::EXTRACTION_ORDER {
            let Some(marker) = kind.marker() else {
                continue;
            };
            let Some((start, end)) = find_token(text, marker) else {
                continue;
            };
            let value = &text[start + marker.len_utf8()..end];
            let resolved = match kind {
                SyntaxType::DueDate => resolve_date(value, today).map(Resolved::Date),
                SyntaxType::Priority => resolve_priority(value).map(Resolved::Priority),
                SyntaxType::Project => {
                    find_project(&self.projects, value).map(|p| Resolved::Project(p.id.clone()))
                }
                SyntaxType::Feature => resolve_feature(value).then_some(Resolved::Feature),
                SyntaxType::Text => None,
            };
            if let Some(value) = resolved {
                found.push(Annotation {
                    kind,
                    start,
                    end,
                    value,
                });
            }
        }
        found.sort_by_key(|a| a.start);
        found
    }
}

fn is_token_boundary(c: char) -> bool {
    c.is_whitespace() || MARKERS.contains(&c)
}

/// Byte span of the first `marker` followed by at least one non-boundary character.
fn find_token(text: &str, marker: char) -> Option<(usize, usize)> {
    for (idx, c) in text.char_indices() {
        if c != marker {
            continue;
        }
        let value_start = idx + c.len_utf8();
        let value_end = text[value_start..]
            .find(is_token_boundary)
            .map_or(text.len(), |off| value_start + off);
        if value_end > value_start {
            return Some((idx, value_end));
        }
    }
    None
}

// `annotations` is sorted by start and spans never overlap.
fn strip_spans(text: &str, annotations: &[Annotation]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for a in annotations {
        out.push_str(&text[cursor..a.start]);
        cursor = a.end;
    }
    out.push_str(&text[cursor..]);
    out.trim().to_string()
}

// --- DATE PARSING HELPERS ---

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next occurrence of `target` strictly after `from` (1 to 7 days ahead).
/// `None` past the last representable date.
pub fn next_weekday(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let ahead = (target.num_days_from_sunday() + 7 - from.weekday().num_days_from_sunday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    from.checked_add_days(Days::new(u64::from(ahead)))
}

#[derive(Debug, Clone, Copy)]
enum DateOrder {
    YearMonthDay,
    MonthDayYear,
    MonthDay,
}

const DATE_PATTERNS: [(char, DateOrder); 5] = [
    ('-', DateOrder::YearMonthDay),
    ('-', DateOrder::MonthDayYear),
    ('/', DateOrder::MonthDayYear),
    ('/', DateOrder::MonthDay),
    ('-', DateOrder::MonthDay),
];

fn digits_of_len(s: &str, min: usize, max: usize) -> Option<u32> {
    if s.len() < min || s.len() > max || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Matches the shape of one explicit date pattern, returning (year, month, day).
fn match_date_pattern(
    value: &str,
    sep: char,
    order: DateOrder,
    current_year: i32,
) -> Option<(i32, u32, u32)> {
    let parts: Vec<&str> = value.split(sep).collect();
    match (order, parts.as_slice()) {
        (DateOrder::YearMonthDay, [y, m, d]) => Some((
            digits_of_len(y, 4, 4)? as i32,
            digits_of_len(m, 1, 2)?,
            digits_of_len(d, 1, 2)?,
        )),
        (DateOrder::MonthDayYear, [m, d, y]) => {
            let month = digits_of_len(m, 1, 2)?;
            let day = digits_of_len(d, 1, 2)?;
            Some((digits_of_len(y, 4, 4)? as i32, month, day))
        }
        (DateOrder::MonthDay, [m, d]) => Some((
            current_year,
            digits_of_len(m, 1, 2)?,
            digits_of_len(d, 1, 2)?,
        )),
        _ => None,
    }
}

fn parse_explicit_date(value: &str, current_year: i32) -> Option<NaiveDate> {
    for (sep, order) in DATE_PATTERNS {
        if let Some((y, m, d)) = match_date_pattern(value, sep, order, current_year) {
            // The first pattern with the right shape decides; an impossible
            // calendar date fails instead of falling through.
            return NaiveDate::from_ymd_opt(y, m, d);
        }
    }
    None
}

/// Resolves the value of a `#date` token.
pub fn resolve_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = value.to_lowercase();
    match lower.as_str() {
        "today" | "now" => return Some(today),
        "tomorrow" | "tmr" => return today.succ_opt(),
        "thisweek" | "week" => return next_weekday(today, Weekday::Fri),
        "nextweek" => {
            return next_weekday(today, Weekday::Fri)?.checked_add_days(Days::new(7));
        }
        _ => {}
    }
    if let Some(day) = parse_weekday(&lower) {
        return next_weekday(today, day);
    }
    parse_explicit_date(value, today.year())
}

// --- OTHER RESOLVERS ---

/// Resolves the value of a `!priority` token. Numeric aliases follow the
/// established table: 1 and 3 are both high.
pub fn resolve_priority(value: &str) -> Option<Priority> {
    if let Ok(p) = value.parse::<Priority>() {
        return Some(p);
    }
    match value.to_lowercase().as_str() {
        "urgent" | "important" | "critical" | "asap" | "1" | "3" => Some(Priority::High),
        "normal" | "moderate" | "2" => Some(Priority::Medium),
        "minor" | "someday" | "maybe" | "0" => Some(Priority::Low),
        _ => None,
    }
}

pub fn resolve_feature(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "feat" | "feature")
}

/// Exact case-insensitive name match first, then the first project in list
/// order whose name contains `value` or is contained in it.
pub fn find_project<'a>(projects: &'a [Project], value: &str) -> Option<&'a Project> {
    let needle = value.to_lowercase();
    projects
        .iter()
        .find(|p| p.name.to_lowercase() == needle)
        .or_else(|| {
            projects.iter().find(|p| {
                let name = p.name.to_lowercase();
                name.contains(&needle) || needle.contains(&name)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_token_skips_bare_markers() {
        assert_eq!(find_token("a ! !high", '!'), Some((4, 9)));
        assert_eq!(find_token("!!high", '!'), Some((1, 6)));
        assert_eq!(find_token("nothing here", '#'), None);
        assert_eq!(find_token("ends with #", '#'), None);
    }

    #[test]
    fn find_token_stops_at_other_markers() {
        let text = "x #today!high";
        assert_eq!(find_token(text, '#'), Some((2, 8)));
        assert_eq!(find_token(text, '!'), Some((8, 13)));
    }

    #[test]
    fn explicit_date_shapes() {
        assert_eq!(
            parse_explicit_date("2025-3-7", 2000),
            NaiveDate::from_ymd_opt(2025, 3, 7)
        );
        assert_eq!(
            parse_explicit_date("03-07-2025", 2000),
            NaiveDate::from_ymd_opt(2025, 3, 7)
        );
        assert_eq!(
            parse_explicit_date("3/7", 2031),
            NaiveDate::from_ymd_opt(2031, 3, 7)
        );
        assert_eq!(parse_explicit_date("123-4-5", 2000), None);
        assert_eq!(parse_explicit_date("3/7/25", 2000), None);
        assert_eq!(parse_explicit_date("2025-02-30", 2000), None);
    }

    #[test]
    fn empty_project_list_never_matches() {
        assert!(find_project(&[], "anything").is_none());
    }
}
