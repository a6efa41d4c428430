// File: ./src/cli.rs
//! Command-line argument handling and help output for the `cockpit` binary.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Parse { text: String, json: bool },
    Highlight { text: String },
    Projects,
    ConfigPath,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

/// Parses arguments (without the binary name). Flags are recognized until the
/// entry text of `parse`/`highlight` begins or until `--`; from there on every
/// argument is joined into the entry text as written.
pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut root = None;
    let mut verbose = false;
    let mut json = false;
    let mut positional: Vec<String> = Vec::new();
    let mut literal = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if literal {
            positional.push(arg);
            continue;
        }
        match arg.as_str() {
            "--" => literal = true,
            "-h" | "--help" => {
                return Ok(CliArgs {
                    root,
                    verbose,
                    command: Command::Help,
                });
            }
            "-r" | "--root" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("Missing value for '{}'", arg))?;
                root = Some(PathBuf::from(path));
            }
            "-v" | "--verbose" => verbose = true,
            "--json" => json = true,
            _ => {
                positional.push(arg);
                literal = positional.len() > 1 && takes_text(&positional[0]);
            }
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None | Some("help") => Command::Help,
        Some("parse") => Command::Parse {
            text: positional.collect::<Vec<_>>().join(" "),
            json,
        },
        Some("highlight") => Command::Highlight {
            text: positional.collect::<Vec<_>>().join(" "),
        },
        Some("projects") => Command::Projects,
        Some("config-path") => Command::ConfigPath,
        Some(other) => return Err(format!("Unknown command '{}'", other)),
    };

    Ok(CliArgs {
        root,
        verbose,
        command,
    })
}

fn takes_text(command: &str) -> bool {
    matches!(command, "parse" | "highlight")
}

pub fn print_help(binary_name: &str) {
    println!(
        "Cockpit v{} - task entry parser for the task and ritual cockpit",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} parse [--json] [--] <text...>", binary_name);
    println!("    {} highlight [--] <text...>", binary_name);
    println!("    {} projects", binary_name);
    println!("    {} config-path", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    -v, --verbose         Log debug output to stderr.");
    println!("    --json                Print the parse result as JSON.");
    println!("    -h, --help            Show this help message.");
    println!("    --                    Treat every following argument as entry text.");
    println!("    Options are not read once the entry text has started.");
    println!();
    println!("ANNOTATION SYNTAX:");
    println!("    #date             Due date (#today, #tmr, #friday, #week, #nextweek,");
    println!("                      #2025-01-15, #01/15/2025, #1/15, #1-15)");
    println!("    !priority         Priority (!high, !medium, !low, !urgent, !someday, !1)");
    println!("    $project          Project by name, exact or partial ($web -> Website)");
    println!("    %feat             Mark as a feature (%feat, %feature)");
    println!("    Unrecognized annotations stay in the title as plain text.");
    println!();
    println!("EXAMPLES:");
    println!("    {} parse \"Ship it #tomorrow !high\"", binary_name);
    println!("    {} parse --json \"Fix login bug $web !urgent\"", binary_name);
    println!("    {} highlight \"%feat Launch page #friday\"", binary_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_joins_entry_text() {
        let cli = parse_args(args(&["--json", "parse", "Ship", "it", "#tomorrow"])).unwrap();
        assert_eq!(
            cli.command,
            Command::Parse {
                text: "Ship it #tomorrow".to_string(),
                json: true
            }
        );
    }

    #[test]
    fn entry_text_keeps_flag_like_words() {
        let cli = parse_args(args(&["parse", "Fix", "-h", "flag", "--json"])).unwrap();
        assert_eq!(
            cli.command,
            Command::Parse {
                text: "Fix -h flag --json".to_string(),
                json: false
            }
        );

        let cli = parse_args(args(&["-v", "parse", "--json", "--", "-r", "now"])).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.root, None);
        assert_eq!(
            cli.command,
            Command::Parse {
                text: "-r now".to_string(),
                json: true
            }
        );

        let cli = parse_args(args(&["highlight", "--", "--help"])).unwrap();
        assert_eq!(
            cli.command,
            Command::Highlight {
                text: "--help".to_string()
            }
        );
    }

    #[test]
    fn global_flags_anywhere() {
        let cli = parse_args(args(&["-v", "projects", "--root", "/tmp/x"])).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(cli.command, Command::Projects);
    }

    #[test]
    fn errors() {
        assert!(parse_args(args(&["frobnicate"])).is_err());
        assert!(parse_args(args(&["projects", "--root"])).is_err());
        assert_eq!(parse_args(args(&[])).unwrap().command, Command::Help);
    }
}
