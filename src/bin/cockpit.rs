use anyhow::Result;
use chrono::Local;
use cockpit::cli::{self, Command};
use cockpit::config::Config;
use cockpit::context::{AppContext, StandardContext};
use cockpit::model::{
    ParseResult, format_relative_date, should_preview, validate_draft, validate_project_ref,
};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;

fn main() -> Result<()> {
    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'cockpit --help' for usage.");
            std::process::exit(2);
        }
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    if args.command == Command::Help {
        cli::print_help("cockpit");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());

    match args.command {
        Command::Parse { text, json } => {
            let config = Config::load_or_default(&ctx)?;
            let result = config.parser().parse(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result, &config);
            }
        }
        Command::Highlight { text } => {
            let config = Config::load_or_default(&ctx)?;
            for token in config.parser().tokenize(&text) {
                println!(
                    "{:<9} {:>3}..{:<3} {:?}",
                    format!("{:?}", token.kind),
                    token.start,
                    token.end,
                    &text[token.start..token.end]
                );
            }
        }
        Command::Projects => {
            let config = Config::load_or_default(&ctx)?;
            if config.projects.is_empty() {
                println!(
                    "No projects configured. Add [[projects]] entries to {}",
                    ctx.get_config_file_path()?.display()
                );
            }
            for project in &config.projects {
                println!("{:<12} {}", project.id, project.name);
            }
        }
        Command::ConfigPath => {
            println!("{}", Config::get_path_string(&ctx)?);
        }
        Command::Help => {}
    }

    Ok(())
}

fn print_result(result: &ParseResult, config: &Config) {
    let draft = &result.draft;
    let today = Local::now().date_naive();

    println!("Title:      {}", draft.title);
    if let Some(due) = draft.due_date {
        println!(
            "Due:        {} ({})",
            due.format("%Y-%m-%d"),
            format_relative_date(due, today, config.week_starts_on)
        );
    }
    if let Some(p) = draft.priority {
        println!("Priority:   {}", p);
    }
    if let Some(id) = &draft.project_id {
        let name = config
            .projects
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        println!("Project:    {} ({})", name, id);
    }
    if draft.is_feature == Some(true) {
        println!("Feature:    yes");
    }
    println!("Confidence: {:.1}", result.confidence);
    if !should_preview(result, config.preview_threshold) {
        println!("(below preview threshold {:.1})", config.preview_threshold);
    }

    let mut problems = validate_draft(draft).err().unwrap_or_default();
    if let Err(e) = validate_project_ref(draft, &config.projects) {
        problems.push(e);
    }
    for problem in &problems {
        log::warn!("Draft not ready for creation: {}", problem);
    }

    if !result.suggestions.is_empty() {
        println!();
        println!("Hints:");
        for hint in &result.suggestions {
            println!("  - {}", hint);
        }
    }
}
