/// Case journal: structured events for one investigation session
///
/// Every event goes to the `log` facade. When a journal path is configured
/// the event is also appended to that file as one JSON object per line,
/// tagged with the session id.
use crate::config::types::{CaseError, Result, VerdictStatus};
use chrono::{DateTime, Utc};
use log::{error, Level};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseEventKind {
    SessionStart,
    LocationVisited,
    ClueDiscovered,
    ClueRevisited,
    MoveRejected,
    ExplorationFinished,
    AccusationMade,
    VerdictIssued,
    SessionEnd,
}

impl CaseEventKind {
    /// Log level for this kind of event
    pub fn level(&self) -> Level {
        match self {
            CaseEventKind::LocationVisited | CaseEventKind::ClueRevisited => Level::Debug,
            CaseEventKind::MoveRejected => Level::Debug,
            _ => Level::Info,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseEvent {
    pub kind: CaseEventKind,
    pub timestamp: DateTime<Utc>,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<VerdictStatus>,
}

impl CaseEvent {
    pub fn new(kind: CaseEventKind, details: String) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            details,
            location: None,
            clue: None,
            suspect: None,
            verdict: None,
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn with_clue(mut self, clue: &str) -> Self {
        self.clue = Some(clue.to_string());
        self
    }

    pub fn with_suspect(mut self, suspect: &str) -> Self {
        self.suspect = Some(suspect.to_string());
        self
    }

    pub fn with_verdict(mut self, verdict: VerdictStatus) -> Self {
        self.verdict = Some(verdict);
        self
    }
}

#[derive(Serialize)]
struct JournalLine<'a> {
    session_id: &'a Uuid,
    #[serde(flatten)]
    event: &'a CaseEvent,
}

pub struct CaseJournal {
    session_id: Uuid,
    sink: Option<Mutex<File>>,
    path: Option<PathBuf>,
}

impl CaseJournal {
    /// Create a journal; with no path, events are only logged
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let sink = match &path {
            Some(path) => Some(Mutex::new(open_journal_file(path)?)),
            None => None,
        };

        Ok(Self {
            session_id: Uuid::new_v4(),
            sink,
            path,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self, event: &CaseEvent) {
        emit_log(event);

        let Some(sink) = &self.sink else {
            return;
        };

        let line = JournalLine {
            session_id: &self.session_id,
            event,
        };
        let encoded = match serde_json::to_string(&line) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("Failed to encode journal event: {}", e);
                return;
            }
        };

        match sink.lock() {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", encoded) {
                    error!("Failed to write to case journal: {}", e);
                }
                if let Err(e) = file.flush() {
                    error!("Failed to flush case journal: {}", e);
                }
            }
            Err(_) => error!("Failed to acquire lock on case journal"),
        }
    }
}

fn open_journal_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CaseError::Journal(format!("Failed to create journal directory: {}", e))
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CaseError::Journal(format!("Failed to open case journal: {}", e)))
}

fn emit_log(event: &CaseEvent) {
    let mut context = String::new();
    if let Some(location) = &event.location {
        context.push_str(&format!(" location={:?}", location));
    }
    if let Some(clue) = &event.clue {
        context.push_str(&format!(" clue={:?}", clue));
    }
    if let Some(suspect) = &event.suspect {
        context.push_str(&format!(" suspect={:?}", suspect));
    }
    if let Some(verdict) = event.verdict {
        context.push_str(&format!(" verdict={}", verdict));
    }
    log::log!(
        event.kind.level(),
        "{:?}: {}{}",
        event.kind,
        event.details,
        context
    );
}

/// Global journal instance
static CASE_JOURNAL: OnceLock<CaseJournal> = OnceLock::new();

/// Initialize the global case journal
pub fn init_case_journal(path: Option<PathBuf>) -> Result<()> {
    let journal = CaseJournal::new(path)?;
    let session_id = journal.session_id();
    if CASE_JOURNAL.set(journal).is_err() {
        error!("Case journal already initialized");
    } else {
        log::info!("Case journal initialized (session {})", session_id);
    }
    Ok(())
}

/// Session id of the global journal, if initialized
pub fn session_id() -> Option<Uuid> {
    CASE_JOURNAL.get().map(CaseJournal::session_id)
}

/// Record an event; falls back to plain logging before initialization
pub fn log_case_event(event: CaseEvent) {
    match CASE_JOURNAL.get() {
        Some(journal) => journal.record(&event),
        None => emit_log(&event),
    }
}

/// Convenience functions for the events the engine emits
pub mod events {
    use super::*;
    use crate::config::types::MoveRejection;

    pub fn session_start(case_name: &str) {
        log_case_event(CaseEvent::new(
            CaseEventKind::SessionStart,
            format!("Investigation of case '{}' started", case_name),
        ));
    }

    pub fn location_visited(location: &str) {
        log_case_event(
            CaseEvent::new(CaseEventKind::LocationVisited, "Entered location".to_string())
                .with_location(location),
        );
    }

    pub fn clue_discovered(location: &str, clue: &str) {
        log_case_event(
            CaseEvent::new(CaseEventKind::ClueDiscovered, "New clue indexed".to_string())
                .with_location(location)
                .with_clue(clue),
        );
    }

    pub fn clue_revisited(location: &str, clue: &str) {
        log_case_event(
            CaseEvent::new(
                CaseEventKind::ClueRevisited,
                "Clue already indexed".to_string(),
            )
            .with_location(location)
            .with_clue(clue),
        );
    }

    pub fn move_rejected(location: &str, rejection: &MoveRejection) {
        log_case_event(
            CaseEvent::new(CaseEventKind::MoveRejected, rejection.to_string())
                .with_location(location),
        );
    }

    pub fn exploration_finished(details: String) {
        log_case_event(CaseEvent::new(CaseEventKind::ExplorationFinished, details));
    }

    pub fn accusation_made(accused: &str) {
        log_case_event(
            CaseEvent::new(CaseEventKind::AccusationMade, "Accusation filed".to_string())
                .with_suspect(accused),
        );
    }

    pub fn verdict_issued(accused: Option<&str>, status: VerdictStatus, supporting: usize) {
        let event = CaseEvent::new(
            CaseEventKind::VerdictIssued,
            format!("{} supporting clue(s)", supporting),
        )
        .with_verdict(status);
        let event = match accused {
            Some(name) => event.with_suspect(name),
            None => event,
        };
        log_case_event(event);
    }

    pub fn session_end(case_name: &str) {
        log_case_event(CaseEvent::new(
            CaseEventKind::SessionEnd,
            format!("Investigation of case '{}' closed", case_name),
        ));
    }
}
