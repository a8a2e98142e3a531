/// Clue-to-suspect attribution table
///
/// Fixed-size hash table with separate chaining. Keys hash with djb2 folded
/// into `BUCKET_COUNT` buckets. Within a bucket the most recently inserted
/// entry wins, so re-inserting a key shadows the older attribution without
/// removing it.
use crate::config::case_file::AttributionRow;
use std::collections::BTreeSet;

/// Number of hash buckets (prime)
pub const BUCKET_COUNT: usize = 101;

/// Bucket index for a clue text
pub fn bucket_for(clue: &str) -> usize {
    let mut hash: u64 = 5381;
    for byte in clue.bytes() {
        hash = (hash << 5).wrapping_add(hash).wrapping_add(u64::from(byte));
    }
    (hash % BUCKET_COUNT as u64) as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributionEntry {
    clue: String,
    suspect: String,
}

/// Chain statistics, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketStats {
    pub entries: usize,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
}

#[derive(Debug, Clone)]
pub struct AttributionTable {
    /// Chains in insertion order; lookups scan from the back
    buckets: Vec<Vec<AttributionEntry>>,
    entries: usize,
}

impl AttributionTable {
    pub fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); BUCKET_COUNT],
            entries: 0,
        }
    }

    /// Build a table from dataset rows, inserted in order
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a AttributionRow>,
    {
        let mut table = Self::new();
        for row in rows {
            table.insert(&row.clue, &row.suspect);
        }
        log::debug!("attribution table loaded: {:?}", table.stats());
        table
    }

    /// Add an attribution at the head of the clue's chain
    pub fn insert(&mut self, clue: &str, suspect: &str) {
        self.buckets[bucket_for(clue)].push(AttributionEntry {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
        });
        self.entries += 1;
    }

    /// Suspect for an exact clue key; the most recent insertion wins
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        self.buckets[bucket_for(clue)]
            .iter()
            .rev()
            .find(|entry| entry.clue == clue)
            .map(|entry| entry.suspect.as_str())
    }

    /// Total entries, shadowed duplicates included
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Distinct suspect names, sorted
    pub fn suspects(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .buckets
            .iter()
            .flatten()
            .map(|entry| entry.suspect.as_str())
            .collect();
        names.into_iter().collect()
    }

    pub fn stats(&self) -> BucketStats {
        BucketStats {
            entries: self.entries,
            occupied_buckets: self.buckets.iter().filter(|b| !b.is_empty()).count(),
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}

impl Default for AttributionTable {
    fn default() -> Self {
        Self::new()
    }
}
