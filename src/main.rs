//! Line-oriented demo shell over the search engine.
//!
//! ```text
//! launcher-search [--config PATH] APPS_FILE
//! ```
//!
//! `APPS_FILE` lists one app per line, either `package<TAB>label` or just a
//! label. Every stdin line is then treated as the drawer's text field and
//! the outcome is printed. A line `:launch LABEL` records a launch so the
//! empty query shows it among the recents.
//!
//! Exit codes: 2 for bad arguments, 1 when loading or running fails.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use launcher_search::infrastructure::{expand_tilde, get_config_path};
use launcher_search::observability::init_tracing;
use launcher_search::ranking::highlight_ranges;
use launcher_search::{initialize, AppEntry, Config, LauncherError, SearchEngine, SearchOutcome};

const LAUNCH_COMMAND: &str = ":launch ";

#[derive(Parser, Debug)]
#[command(name = "launcher-search")]
#[command(about = "Rank apps and route provider prefixes for each line read from stdin")]
#[command(version)]
struct Cli {
    /// Configuration file (default: config.toml in the data directory)
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// App list, one `package<TAB>label` or bare label per line
    apps_file: String,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config
            .as_deref()
            .map_or_else(get_config_path, expand_tilde)
    }

    fn apps_path(&self) -> PathBuf {
        expand_tilde(&self.apps_file)
    }
}

fn main() {
    // clap exits with status 2 on argument errors.
    let cli = Cli::parse();

    if let Err(error) = run(&cli) {
        eprintln!("[launcher-search] {error}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), LauncherError> {
    let config_path = cli.config_path();
    let config = Config::load(&config_path)?;
    init_tracing(&config);

    let apps = load_apps(&cli.apps_path())?;
    tracing::info!(apps = apps.len(), config = ?config_path, "shell ready");

    let mut engine = initialize(&config);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if let Some(label) = line.strip_prefix(LAUNCH_COMMAND) {
            launch(&mut engine, &apps, label.trim(), &mut out)?;
            continue;
        }
        print_outcome(&mut out, &line, engine.search(&line, &apps))?;
    }
    Ok(())
}

fn load_apps(path: &std::path::Path) -> Result<Vec<AppEntry>, LauncherError> {
    let source = std::fs::read_to_string(path)?;
    Ok(source
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((package, label)) => AppEntry::new(package.trim(), label.trim()),
            None => AppEntry::new(line.trim(), line.trim()),
        })
        .collect())
}

fn launch(
    engine: &mut SearchEngine,
    apps: &[AppEntry],
    label: &str,
    out: &mut impl Write,
) -> io::Result<()> {
    match apps.iter().find(|app| app.label == label) {
        Some(app) => {
            engine.record_launch(app);
            writeln!(out, "launched {}", app.label)
        }
        None => writeln!(out, "no app labelled {label:?}"),
    }
}

fn print_outcome(
    out: &mut impl Write,
    input: &str,
    outcome: SearchOutcome<'_, AppEntry>,
) -> io::Result<()> {
    match outcome {
        SearchOutcome::Provider(parsed) => {
            let name = parsed.config.as_ref().map_or("?", |config| config.display_name.as_str());
            writeln!(out, "→ {name}: {:?}", parsed.query)
        }
        SearchOutcome::Recents(recents) => {
            if recents.is_empty() {
                return writeln!(out, "(no recent apps)");
            }
            for app in recents {
                writeln!(out, "  {}", app.label)?;
            }
            Ok(())
        }
        SearchOutcome::Items(items) => {
            if items.is_empty() {
                writeln!(out, "(no matches)")?;
            }
            for item in items {
                let ranges = highlight_ranges(&item.candidate.label, input);
                let label = emphasize(&item.candidate.label, &ranges);
                writeln!(out, "  {:<13} {label}", format!("{:?}", item.tier))?;
            }
            Ok(())
        }
    }
}

/// Wraps each highlighted char range of `text` in brackets.
fn emphasize(text: &str, ranges: &[(usize, usize)]) -> String {
    let mut result = String::with_capacity(text.len() + ranges.len() * 2);
    let mut ranges = ranges.iter().peekable();

    for (index, ch) in text.chars().enumerate() {
        if ranges.peek().is_some_and(|(start, _)| *start == index) {
            result.push('[');
        }
        result.push(ch);
        if ranges.peek().is_some_and(|(_, end)| *end == index + 1) {
            result.push(']');
            ranges.next();
        }
    }
    result
}
