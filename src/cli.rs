use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::case_file::CaseFile;
use crate::config::presets::{CasePresets, DEFAULT_PRESET};
use crate::config::types::{MoveRejection, VerdictStatus};
use crate::config::validator::validate_case;
use crate::evidence::AttributionTable;
use crate::explore::{
    explore_from, ClueMap, CommandSource, Cursor, Discovery, ExplorationObserver,
    ExplorationSummary, LineCommands, ScriptedCommands,
};
use crate::graph::{LocationGraph, Side};
use crate::observability::journal::{self, events};
use crate::verdict::{CaseReport, Verdict, VerdictClassifier};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Case file (JSON); defaults to ./case.json, then the built-in preset
    #[arg(long, global = true)]
    case: Option<PathBuf>,
    /// Built-in case to use when no case file is found
    #[arg(long, global = true, default_value = DEFAULT_PRESET)]
    preset: String,
    /// Append structured session events to this file (JSON lines)
    #[arg(long, global = true)]
    journal: Option<PathBuf>,
    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore the case, collect clues and accuse a suspect (default)
    Play {
        /// Read navigation commands from this file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
        /// Accused name; prompted for when omitted
        #[arg(long)]
        accuse: Option<String>,
        /// Print a JSON report on stdout; narration goes to stderr
        #[arg(long)]
        json: bool,
        /// Exit with status 1 unless the accusation is upheld
        #[arg(long)]
        strict_exit: bool,
    },
    /// Print the location tree
    Map,
    /// List the suspects named by the attribution dataset
    Suspects,
    /// Validate the case and report warnings
    Validate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    journal::init_case_journal(cli.journal.clone())?;

    let case = resolve_case(cli.case.as_deref(), &cli.preset)?;

    match cli.command.unwrap_or(Commands::Play {
        script: None,
        accuse: None,
        json: false,
        strict_exit: false,
    }) {
        Commands::Play {
            script,
            accuse,
            json,
            strict_exit,
        } => {
            let verdict = play(&case, script.as_deref(), accuse, json)?;
            if strict_exit && !verdict.is_upheld() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Map => {
            let graph = LocationGraph::from_case(&case)?;
            print!("{}", render_map(&case, &graph));
            Ok(())
        }
        Commands::Suspects => {
            validate_case(&case)?;
            let table = AttributionTable::from_rows(&case.attributions);
            for suspect in table.suspects() {
                println!("{}", suspect);
            }
            Ok(())
        }
        Commands::Validate => {
            let report = validate_case(&case)?;
            println!(
                "case '{}' is valid ({} locations, {} attributions)",
                case.name,
                case.locations.len(),
                case.attributions.len()
            );
            for warning in &report.warnings {
                println!("  warning: {}", warning);
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// --case, then ./case.json, then the named preset
fn resolve_case(path: Option<&Path>, preset: &str) -> Result<CaseFile> {
    if let Some(path) = path {
        log::info!("loading case file {}", path.display());
        return Ok(CaseFile::load_from_file(path)?);
    }

    if let Some(case) = CaseFile::load_default()? {
        log::info!("loaded case '{}' from ./case.json", case.name);
        return Ok(case);
    }

    let presets = CasePresets::new();
    presets.get(preset).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "unknown preset '{}' (available: {})",
            preset,
            presets.list().join(", ")
        )
    })
}

fn play(
    case: &CaseFile,
    script: Option<&Path>,
    accuse: Option<String>,
    json: bool,
) -> Result<Verdict> {
    let graph = LocationGraph::from_case(case)?;
    let clue_map = ClueMap::from_case(case);
    let table = AttributionTable::from_rows(&case.attributions);

    events::session_start(&case.name);

    let out: Box<dyn Write> = if json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut console = Console::new(out);

    console.say(format_args!(
        "Case '{}': explore the locations and collect clues.",
        case.name
    ));
    console.say(format_args!("Commands: l = left, r = right, b = back, f = finish."));

    let stdin = io::stdin();
    let mut commands: Box<dyn CommandSource> = match script {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                anyhow::anyhow!("failed to read script {}: {}", path.display(), e)
            })?;
            Box::new(ScriptedCommands::parse(content.lines()))
        }
        None => Box::new(LineCommands::new(stdin.lock())),
    };

    let exploration = explore_from(&graph, &clue_map, commands.as_mut(), &mut console);
    drop(commands);

    console.say(format_args!("\n--- Collected clues (sorted) ---"));
    if exploration.clues.is_empty() {
        console.say(format_args!("No clues collected."));
    } else {
        for clue in &exploration.clues {
            console.say(format_args!("  - {}", clue));
        }
    }

    let verdict = if VerdictClassifier::can_judge(&exploration.clues) {
        let accused = match accuse {
            Some(name) => Some(name),
            None => {
                console.say(format_args!("\nSuspects: {}", table.suspects().join(", ")));
                console.prompt(format_args!("Who do you accuse? "));
                read_accused(&mut stdin.lock())
            }
        };
        if let Some(name) = accused.as_deref().filter(|n| !n.is_empty()) {
            events::accusation_made(name);
        }
        VerdictClassifier::verify(&exploration.clues, &table, accused.as_deref())
    } else {
        VerdictClassifier::verify(&exploration.clues, &table, None)
    };

    events::verdict_issued(
        verdict.provenance.accused.as_deref(),
        verdict.status,
        verdict.supporting_count(),
    );
    console.say(format_args!("\n{}", describe_verdict(&verdict)));

    if json {
        let clues = exploration.clues.iter().map(str::to_string).collect();
        let report = CaseReport::new(
            &case.name,
            journal::session_id().map(|id| id.to_string()),
            exploration.summary.clone(),
            graph
                .name(exploration.summary.final_location)
                .unwrap_or_default(),
            clues,
            verdict.clone(),
        );
        println!("{}", report.to_json()?);
    }

    events::session_end(&case.name);
    Ok(verdict)
}

/// One line from the reader minus its line terminator; None at end of input.
/// Invalid UTF-8 is decoded lossily rather than treated as end of input.
fn read_accused<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut line = Vec::new();
    match reader.read_until(b'\n', &mut line) {
        Ok(0) => None,
        Ok(_) => Some(
            String::from_utf8_lossy(&line)
                .trim_end_matches(['\r', '\n'])
                .to_string(),
        ),
        Err(e) => {
            log::warn!("failed to read accused name: {}", e);
            None
        }
    }
}

fn describe_verdict(verdict: &Verdict) -> String {
    let accused = verdict.provenance.accused.as_deref().unwrap_or("");
    match verdict.status {
        VerdictStatus::Upheld => format!(
            "Accusation upheld: {} clues point to '{}'. The culprit is under arrest.",
            verdict.supporting_count(),
            accused
        ),
        VerdictStatus::Insufficient => format!(
            "Only 1 clue points to '{}'. Not enough to convict.",
            accused
        ),
        VerdictStatus::Unfounded => {
            format!("No clue points to '{}'. The accusation is unfounded.", accused)
        }
        VerdictStatus::CannotJudge => "No clues were collected. Nothing to judge.".to_string(),
        VerdictStatus::Cancelled => "Empty name. Accusation cancelled.".to_string(),
    }
}

fn render_map(case: &CaseFile, graph: &LocationGraph) -> String {
    let mut out = String::new();
    for entry in graph.walk() {
        let Some(name) = graph.name(entry.id) else {
            continue;
        };
        let marker = match entry.side {
            None => "",
            Some(Side::Left) => "[L] ",
            Some(Side::Right) => "[R] ",
        };
        let clue = case
            .location(name)
            .and_then(|spec| spec.clue.as_deref())
            .map(|c| format!("  (clue: {})", c))
            .unwrap_or_default();
        out.push_str(&format!(
            "{}{}{}{}\n",
            "    ".repeat(entry.depth),
            marker,
            name,
            clue
        ));
    }
    out
}

/// Console narration of the exploration
struct Console {
    out: Box<dyn Write>,
}

impl Console {
    fn new(out: Box<dyn Write>) -> Self {
        Self { out }
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            log::warn!("console write failed: {}", e);
        }
    }

    fn prompt(&mut self, args: fmt::Arguments<'_>) {
        let result = write!(self.out, "{}", args).and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("console write failed: {}", e);
        }
    }
}

impl ExplorationObserver for Console {
    fn on_visit(&mut self, cursor: &Cursor<'_>, discovery: &Discovery) {
        let graph = cursor.graph();
        self.say(format_args!("\nYou are in: {}", cursor.location().name()));
        match discovery {
            Discovery::New(clue) => self.say(format_args!("  -> You found a clue: \"{}\"", clue)),
            Discovery::AlreadyKnown(clue) => {
                self.say(format_args!("  -> Already noted here: \"{}\"", clue))
            }
            Discovery::Nothing => self.say(format_args!("  -> Nothing of interest here.")),
        }

        let exits = cursor.exits();
        self.say(format_args!("Options:"));
        if let Some(left) = exits.left {
            self.say(format_args!("  l - go left ({})", graph.name(left).unwrap_or("?")));
        }
        if let Some(right) = exits.right {
            self.say(format_args!("  r - go right ({})", graph.name(right).unwrap_or("?")));
        }
        if let Some(back) = exits.back {
            self.say(format_args!("  b - go back ({})", graph.name(back).unwrap_or("?")));
        }
        self.say(format_args!("  f - finish exploring"));
        self.prompt(format_args!("Choose (l/r/b/f): "));
    }

    fn on_rejected(&mut self, _cursor: &Cursor<'_>, rejection: &MoveRejection) {
        self.say(format_args!("Cannot do that: {}.", rejection));
        self.prompt(format_args!("Choose (l/r/b/f): "));
    }

    fn on_finished(&mut self, summary: &ExplorationSummary) {
        self.say(format_args!(
            "\nExploration over: {} visit(s), {} distinct clue(s).",
            summary.visits, summary.distinct_clues
        ));
    }
}
