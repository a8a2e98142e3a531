/// Arena-backed location tree
use crate::config::case_file::CaseFile;
use crate::config::types::{CaseError, Result};
use crate::config::validator::validate_case;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Handle to a location inside one `LocationGraph`. Handles can be
/// deserialized or carried over from another graph, so every lookup by id
/// is checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(usize);

/// Which child slot a location occupies under its parent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// A named node of the location tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    name: String,
    left: Option<LocationId>,
    right: Option<LocationId>,
    parent: Option<LocationId>,
}

impl Location {
    fn new(name: &str, parent: Option<LocationId>) -> Self {
        Self {
            name: name.to_string(),
            left: None,
            right: None,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn left(&self) -> Option<LocationId> {
        self.left
    }

    pub fn right(&self) -> Option<LocationId> {
        self.right
    }

    pub fn parent(&self) -> Option<LocationId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// One line of a pre-order walk, used for map rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapEntry {
    pub id: LocationId,
    pub depth: usize,
    /// None for the root
    pub side: Option<Side>,
}

/// Immutable location tree.
///
/// Built once through `LocationGraphBuilder` or `from_case`; every
/// non-root node has exactly one parent, so there are no cycles.
#[derive(Debug, Clone)]
pub struct LocationGraph {
    nodes: Vec<Location>,
    by_name: HashMap<String, LocationId>,
}

impl LocationGraph {
    /// Build the graph described by a case file
    pub fn from_case(case: &CaseFile) -> Result<Self> {
        validate_case(case)?;

        let mut builder = LocationGraphBuilder::new(&case.root);
        let mut queue = VecDeque::from([(builder.root(), case.root.as_str())]);

        while let Some((id, name)) = queue.pop_front() {
            let spec = case.location(name).ok_or_else(|| {
                CaseError::Topology(format!("location '{}' vanished during build", name))
            })?;
            if let Some(left) = spec.left.as_deref() {
                queue.push_back((builder.attach(id, Side::Left, left)?, left));
            }
            if let Some(right) = spec.right.as_deref() {
                queue.push_back((builder.attach(id, Side::Right, right)?, right));
            }
        }

        let graph = builder.build();
        log::debug!(
            "built location graph for case '{}': {} locations",
            case.name,
            graph.len()
        );
        Ok(graph)
    }

    pub fn root(&self) -> LocationId {
        LocationId(0)
    }

    /// The root location; the builder never produces a graph without one
    pub fn root_location(&self) -> &Location {
        &self.nodes[0]
    }

    /// Location behind a handle; None for a handle outside this graph
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.nodes.get(id.0)
    }

    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(Location::name)
    }

    pub fn left(&self, id: LocationId) -> Option<LocationId> {
        self.location(id).and_then(Location::left)
    }

    pub fn right(&self, id: LocationId) -> Option<LocationId> {
        self.location(id).and_then(Location::right)
    }

    pub fn parent(&self, id: LocationId) -> Option<LocationId> {
        self.location(id).and_then(Location::parent)
    }

    pub fn child(&self, id: LocationId, side: Side) -> Option<LocationId> {
        match side {
            Side::Left => self.left(id),
            Side::Right => self.right(id),
        }
    }

    /// Exact, case-sensitive lookup by name
    pub fn find(&self, name: &str) -> Option<LocationId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a graph holds at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: LocationId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Pre-order walk (node, left subtree, right subtree)
    pub fn walk(&self) -> Vec<MapEntry> {
        let mut entries = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![MapEntry {
            id: self.root(),
            depth: 0,
            side: None,
        }];

        while let Some(entry) = stack.pop() {
            entries.push(entry);
            // Right pushed first so the left subtree is emitted first.
            for side in [Side::Right, Side::Left] {
                if let Some(child) = self.child(entry.id, side) {
                    stack.push(MapEntry {
                        id: child,
                        depth: entry.depth + 1,
                        side: Some(side),
                    });
                }
            }
        }

        entries
    }
}

/// Incremental tree builder.
///
/// Nodes can only be attached under an existing node, which keeps the
/// result a tree rooted at the first node.
#[derive(Debug)]
pub struct LocationGraphBuilder {
    nodes: Vec<Location>,
    by_name: HashMap<String, LocationId>,
}

impl LocationGraphBuilder {
    pub fn new(root_name: &str) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert(root_name.to_string(), LocationId(0));
        Self {
            nodes: vec![Location::new(root_name, None)],
            by_name,
        }
    }

    pub fn root(&self) -> LocationId {
        LocationId(0)
    }

    /// Attach a new location in the given child slot of `parent`
    pub fn attach(&mut self, parent: LocationId, side: Side, name: &str) -> Result<LocationId> {
        if parent.0 >= self.nodes.len() {
            return Err(CaseError::Topology(format!(
                "parent handle {} does not belong to this graph",
                parent.0
            )));
        }
        if self.by_name.contains_key(name) {
            return Err(CaseError::Topology(format!(
                "location '{}' already exists",
                name
            )));
        }

        let slot = match side {
            Side::Left => &self.nodes[parent.0].left,
            Side::Right => &self.nodes[parent.0].right,
        };
        if let Some(existing) = slot {
            return Err(CaseError::Topology(format!(
                "{:?} slot of '{}' already holds '{}'",
                side, self.nodes[parent.0].name, self.nodes[existing.0].name
            )));
        }

        let id = LocationId(self.nodes.len());
        self.nodes.push(Location::new(name, Some(parent)));
        self.by_name.insert(name.to_string(), id);
        match side {
            Side::Left => self.nodes[parent.0].left = Some(id),
            Side::Right => self.nodes[parent.0].right = Some(id),
        }

        Ok(id)
    }

    pub fn build(self) -> LocationGraph {
        LocationGraph {
            nodes: self.nodes,
            by_name: self.by_name,
        }
    }
}
