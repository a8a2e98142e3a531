/// Exploration loop
///
/// Drives a `Cursor` from a `CommandSource` until the source finishes or
/// runs dry. Every visit (the initial one and each accepted move) asks the
/// clue assignment for the current location and indexes what it yields.
use crate::config::case_file::CaseFile;
use crate::config::types::{ExplorationEnd, MoveRejection, NavCommand};
use crate::evidence::ClueIndex;
use crate::explore::cursor::{Cursor, MoveOutcome};
use crate::graph::{LocationGraph, LocationId};
use crate::observability::journal::events;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::io::BufRead;

/// Supplier of navigation commands; `None` means input is exhausted
pub trait CommandSource {
    fn next_command(&mut self) -> Option<NavCommand>;
}

/// Commands from a fixed list
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    queue: VecDeque<NavCommand>,
}

impl ScriptedCommands {
    pub fn new(commands: impl IntoIterator<Item = NavCommand>) -> Self {
        Self {
            queue: commands.into_iter().collect(),
        }
    }

    /// Parse one command per entry
    pub fn parse<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self::new(lines.into_iter().map(|l| NavCommand::parse(l.as_ref())))
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self) -> Option<NavCommand> {
        self.queue.pop_front()
    }
}

/// Commands read line by line from any buffered reader. Lines that are not
/// valid UTF-8 are decoded lossily and come out as unrecognized commands.
pub struct LineCommands<R> {
    reader: R,
    line: Vec<u8>,
}

impl<R: BufRead> LineCommands<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
        }
    }
}

impl<R: BufRead> CommandSource for LineCommands<R> {
    fn next_command(&mut self) -> Option<NavCommand> {
        self.line.clear();
        match self.reader.read_until(b'\n', &mut self.line) {
            Ok(0) => None,
            Ok(_) => Some(NavCommand::parse(&String::from_utf8_lossy(&self.line))),
            Err(e) => {
                log::warn!("command input failed, treating as end of input: {}", e);
                None
            }
        }
    }
}

/// Static per-location clue placement
pub trait ClueAssignment {
    fn clue_for(&self, location: &str) -> Option<&str>;
}

/// Clue placement keyed by exact location name
#[derive(Debug, Clone, Default)]
pub struct ClueMap {
    by_location: HashMap<String, String>,
}

impl ClueMap {
    pub fn from_case(case: &CaseFile) -> Self {
        Self {
            by_location: case
                .placed_clues()
                .map(|(location, clue)| (location.to_string(), clue.to_string()))
                .collect(),
        }
    }

    pub fn place(&mut self, location: &str, clue: &str) {
        self.by_location
            .insert(location.to_string(), clue.to_string());
    }

    pub fn len(&self) -> usize {
        self.by_location.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }
}

impl ClueAssignment for ClueMap {
    fn clue_for(&self, location: &str) -> Option<&str> {
        self.by_location.get(location).map(String::as_str)
    }
}

/// What a single visit turned up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Nothing,
    New(String),
    AlreadyKnown(String),
}

/// Hooks for rendering progress; every method defaults to a no-op
pub trait ExplorationObserver {
    fn on_visit(&mut self, _cursor: &Cursor<'_>, _discovery: &Discovery) {}
    fn on_rejected(&mut self, _cursor: &Cursor<'_>, _rejection: &MoveRejection) {}
    fn on_finished(&mut self, _summary: &ExplorationSummary) {}
}

/// Observer that ignores everything
pub struct Silent;

impl ExplorationObserver for Silent {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationSummary {
    /// Visits, the initial one included
    pub visits: usize,
    pub accepted_moves: usize,
    pub rejected_commands: usize,
    pub distinct_clues: usize,
    pub end: ExplorationEnd,
    /// Where the cursor stood when exploration ended
    pub final_location: LocationId,
}

/// Clue index plus bookkeeping from one exploration
#[derive(Debug, Clone)]
pub struct Exploration {
    pub clues: ClueIndex,
    pub summary: ExplorationSummary,
}

/// Explore from the root, returning only the collected clue index
pub fn explore<C, S>(graph: &LocationGraph, clues: &C, commands: &mut S) -> ClueIndex
where
    C: ClueAssignment + ?Sized,
    S: CommandSource + ?Sized,
{
    explore_from(graph, clues, commands, &mut Silent).clues
}

/// Run the exploration loop from the graph root
pub fn explore_from<C, S, O>(
    graph: &LocationGraph,
    clues: &C,
    commands: &mut S,
    observer: &mut O,
) -> Exploration
where
    C: ClueAssignment + ?Sized,
    S: CommandSource + ?Sized,
    O: ExplorationObserver + ?Sized,
{
    let mut cursor = Cursor::new(graph);
    let mut index = ClueIndex::new();
    let mut visits = 0;
    let mut accepted_moves = 0;
    let mut rejected_commands = 0;

    let visit = |cursor: &Cursor<'_>, index: &mut ClueIndex, observer: &mut O| {
        let name = cursor.location().name();
        events::location_visited(name);
        let discovery = match clues.clue_for(name) {
            Some(clue) if index.insert(clue) => {
                events::clue_discovered(name, clue);
                Discovery::New(clue.to_string())
            }
            Some(clue) => {
                events::clue_revisited(name, clue);
                Discovery::AlreadyKnown(clue.to_string())
            }
            None => Discovery::Nothing,
        };
        observer.on_visit(cursor, &discovery);
    };

    visit(&cursor, &mut index, &mut *observer);
    visits += 1;

    let end = loop {
        let Some(command) = commands.next_command() else {
            break ExplorationEnd::InputExhausted;
        };

        match cursor.apply(&command) {
            MoveOutcome::Moved(_) => {
                log::debug!("{} to '{}'", command.name(), cursor.location().name());
                accepted_moves += 1;
                visit(&cursor, &mut index, &mut *observer);
                visits += 1;
            }
            MoveOutcome::Rejected(rejection) => {
                rejected_commands += 1;
                events::move_rejected(cursor.location().name(), &rejection);
                observer.on_rejected(&cursor, &rejection);
            }
            MoveOutcome::Finished => break ExplorationEnd::Finished,
        }
    };

    let summary = ExplorationSummary {
        visits,
        accepted_moves,
        rejected_commands,
        distinct_clues: index.len(),
        end,
        final_location: cursor.position(),
    };
    events::exploration_finished(format!(
        "{:?} after {} visit(s), {} rejected command(s), {} distinct clue(s)",
        summary.end, summary.visits, summary.rejected_commands, summary.distinct_clues
    ));
    observer.on_finished(&summary);

    Exploration {
        clues: index,
        summary,
    }
}
