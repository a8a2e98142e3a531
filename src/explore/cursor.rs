/// Exploration cursor state machine
///
/// States: a position in the location graph plus an "exploring" flag.
/// Moves toward missing children, or back from the root, are rejected and
/// leave the cursor where it was. `Finish` is terminal.
use crate::config::types::{MoveRejection, NavCommand};
use crate::graph::{Location, LocationGraph, LocationId};

/// Result of applying one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(LocationId),
    Rejected(MoveRejection),
    Finished,
}

/// Moves available from the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exits {
    pub left: Option<LocationId>,
    pub right: Option<LocationId>,
    pub back: Option<LocationId>,
}

/// Cursor over a borrowed, read-only graph
#[derive(Debug, Clone)]
pub struct Cursor<'g> {
    graph: &'g LocationGraph,
    position: LocationId,
    here: &'g Location,
    exploring: bool,
}

impl<'g> Cursor<'g> {
    /// Start at the graph root, exploring
    pub fn new(graph: &'g LocationGraph) -> Self {
        Self {
            graph,
            position: graph.root(),
            here: graph.root_location(),
            exploring: true,
        }
    }

    pub fn graph(&self) -> &'g LocationGraph {
        self.graph
    }

    pub fn position(&self) -> LocationId {
        self.position
    }

    pub fn location(&self) -> &'g Location {
        self.here
    }

    pub fn is_exploring(&self) -> bool {
        self.exploring
    }

    pub fn exits(&self) -> Exits {
        Exits {
            left: self.here.left(),
            right: self.here.right(),
            back: self.here.parent(),
        }
    }

    /// Apply a command. Only accepted moves change the position.
    pub fn apply(&mut self, command: &NavCommand) -> MoveOutcome {
        if !self.exploring {
            return MoveOutcome::Rejected(MoveRejection::NotExploring);
        }

        let graph = self.graph;
        let resolve =
            |id: Option<LocationId>| id.and_then(|id| Some((id, graph.location(id)?)));
        let exits = self.exits();
        let target = match command {
            NavCommand::MoveLeft => resolve(exits.left).ok_or(MoveRejection::NoLeftChild),
            NavCommand::MoveRight => resolve(exits.right).ok_or(MoveRejection::NoRightChild),
            NavCommand::MoveBack => resolve(exits.back).ok_or(MoveRejection::AtRoot),
            NavCommand::Finish => {
                self.exploring = false;
                return MoveOutcome::Finished;
            }
            NavCommand::Unrecognized(raw) => Err(MoveRejection::UnknownCommand(raw.clone())),
        };

        match target {
            Ok((next, location)) => {
                self.position = next;
                self.here = location;
                MoveOutcome::Moved(next)
            }
            Err(rejection) => MoveOutcome::Rejected(rejection),
        }
    }
}
