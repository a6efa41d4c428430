// File: tests/draft_display.rs
use chrono::{Duration, NaiveDate};
use cockpit::model::{
    DraftDisplay, ParseResult, ParsedTaskDraft, Priority, Project, TaskParser, WeekStart,
    format_relative_date, should_preview, sort_by_priority,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(title: &str, priority: Option<Priority>) -> ParsedTaskDraft {
    ParsedTaskDraft {
        title: title.to_string(),
        priority,
        ..Default::default()
    }
}

// --- SMART STRING ---

#[test]
fn test_smart_string_reparses_to_same_draft() {
    let projects = vec![Project::new("p1", "Website"), Project::new("p2", "Garden")];
    let parser = TaskParser::new(projects.clone());
    let today = ymd(2025, 1, 15);

    let original = parser
        .parse_on("Launch page #friday !urgent $garden %feat", today)
        .draft;
    let text = original.to_smart_string(&projects);
    assert_eq!(text, "#2025-01-17 !high $Garden %feat Launch page");

    let reparsed = parser.parse_on(&text, today).draft;
    assert_eq!(reparsed, original);
}

#[test]
fn test_smart_string_plain_title() {
    assert_eq!(draft("Buy milk", None).to_smart_string(&[]), "Buy milk");
}

#[test]
fn test_smart_string_project_name_with_spaces() {
    let projects = vec![Project::new("p1", "Home Office")];
    let d = ParsedTaskDraft {
        title: "Tidy desk".to_string(),
        project_id: Some("p1".to_string()),
        ..Default::default()
    };
    assert_eq!(d.to_smart_string(&projects), "$Home Tidy desk");

    // Unknown id is dropped rather than rendered.
    assert_eq!(d.to_smart_string(&[]), "Tidy desk");
}

#[test]
fn test_smart_string_annotations_win_over_title_tokens() {
    let parser = TaskParser::default();
    let today = ymd(2025, 1, 15);

    let original = parser.parse_on("!low Plan !high", today).draft;
    assert_eq!(original.title, "Plan !high");
    assert_eq!(original.priority, Some(Priority::Low));

    let text = original.to_smart_string(&[]);
    assert_eq!(text, "!low Plan !high");
    assert_eq!(parser.parse_on(&text, today).draft, original);

    // Fallback title made only of tokens.
    let original = parser.parse_on("#today !high", today).draft;
    assert_eq!(original.title, "#today !high");
    let text = original.to_smart_string(&[]);
    assert_eq!(text, "#2025-01-15 !high #today !high");
    assert_eq!(parser.parse_on(&text, today).draft, original);
}

// --- RELATIVE DATES ---

#[test]
fn test_relative_labels() {
    let today = ymd(2025, 1, 15); // Wednesday
    let sunday = WeekStart::Sunday;
    assert_eq!(format_relative_date(today, today, sunday), "Today");
    assert_eq!(format_relative_date(ymd(2025, 1, 16), today, sunday), "Tomorrow");
    assert_eq!(format_relative_date(ymd(2025, 1, 18), today, sunday), "Saturday");
    assert_eq!(format_relative_date(ymd(2025, 1, 13), today, sunday), "Monday");
    assert_eq!(format_relative_date(ymd(2025, 3, 4), today, sunday), "Mar 4");
    assert_eq!(format_relative_date(ymd(2026, 2, 3), today, sunday), "Feb 3, 2026");
}

#[test]
fn test_week_start_changes_window() {
    let today = ymd(2025, 1, 15);
    let next_sunday = ymd(2025, 1, 19);
    assert_eq!(
        format_relative_date(next_sunday, today, WeekStart::Sunday),
        "Jan 19"
    );
    assert_eq!(
        format_relative_date(next_sunday, today, WeekStart::Monday),
        "Sunday"
    );
}

#[test]
fn test_relative_labels_at_calendar_start() {
    let first = NaiveDate::MIN;
    let second = first + Duration::days(1);
    let third = first + Duration::days(2);
    for week_start in [WeekStart::Sunday, WeekStart::Monday] {
        assert_eq!(format_relative_date(first, first, week_start), "Today");
        assert_eq!(format_relative_date(second, first, week_start), "Tomorrow");
        // The week holding the first date may start before the calendar does.
        let label = format_relative_date(first, third, week_start);
        assert!(
            label == first.format("%A").to_string() || label == "Jan 1",
            "{}",
            label
        );
    }
}

// --- ORDERING & PREVIEW ---

#[test]
fn test_sort_by_priority_is_stable() {
    let mut drafts = vec![
        draft("a", None),
        draft("b", Some(Priority::High)),
        draft("c", Some(Priority::Low)),
        draft("d", Some(Priority::Medium)),
        draft("e", Some(Priority::High)),
    ];
    sort_by_priority(&mut drafts);
    let titles: Vec<&str> = drafts.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "e", "d", "a", "c"]);
}

#[test]
fn test_preview_threshold() {
    let parser = TaskParser::default();
    let plain = parser.parse("Buy milk");
    assert!(should_preview(&plain, 0.5));
    assert!(should_preview(&plain, 0.8));
    assert!(!should_preview(&plain, 0.9));

    let empty = parser.parse("   ");
    assert!(!should_preview(&empty, 0.0));

    let manual = ParseResult {
        draft: draft("x", None),
        confidence: 0.4,
        suggestions: Vec::new(),
    };
    assert!(!should_preview(&manual, 0.5));
}
