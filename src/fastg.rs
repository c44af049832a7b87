pub mod orientation;

pub use self::orientation::*;

use fnv::FnvHashSet;

use std::iter::FromIterator;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// This module defines the assembly-graph edge record types and the
/// EdgeTable container, and some utility functions and types.

/// A strand-tagged edge identifier. The base name is the identifier
/// as it appears inside a descriptor; the orientation is the `+`/`-`
/// strand suffix it is displayed with.
#[derive(Default, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct EdgeName {
    pub base: String,
    pub orientation: Orientation,
}

impl EdgeName {
    pub fn new<S: Into<String>>(base: S, orientation: Orientation) -> Self {
        EdgeName {
            base: base.into(),
            orientation,
        }
    }

    pub fn forward<S: Into<String>>(base: S) -> Self {
        Self::new(base, Orientation::Forward)
    }

    pub fn reverse<S: Into<String>>(base: S) -> Self {
        Self::new(base, Orientation::Backward)
    }
}

/// Displays as the base name followed by exactly one strand suffix,
/// e.g. "3-".
impl std::fmt::Display for EdgeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.base, self.orientation)
    }
}

impl std::str::FromStr for EdgeName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let orientation = if s.ends_with('+') {
            Orientation::Forward
        } else if s.ends_with('-') {
            Orientation::Backward
        } else {
            return Err("Edge name is missing its strand suffix");
        };
        let base = &s[..s.len() - 1];
        if base.is_empty() {
            return Err("Edge name is missing an identifier");
        }
        Ok(EdgeName::new(base, orientation))
    }
}

/// One edge of an assembly graph: a contiguous sequence segment
/// together with the names of the edges overlapping its terminal
/// k-mer. The abundance fields and raw edge tags are only populated
/// by the bcalm dialect.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct EdgeRecord {
    pub name: EdgeName,
    pub length: u64,
    pub coverage: f64,
    pub sequence: String,
    pub neighbors: Vec<EdgeName>,
    pub total_abundance: Option<u64>,
    pub avg_abundance: Option<f64>,
    pub edge_tags: Vec<String>,
}

impl EdgeRecord {
    pub fn new(
        name: EdgeName,
        length: u64,
        coverage: f64,
        sequence: String,
        neighbors: Vec<EdgeName>,
    ) -> Self {
        EdgeRecord {
            name,
            length,
            coverage,
            sequence,
            neighbors,
            total_abundance: None,
            avg_abundance: None,
            edge_tags: Vec::new(),
        }
    }
}

/// An insertion-ordered collection of edge records, as produced by
/// one parse of an assembly-graph file. Records are never mutated in
/// place after parsing; derived tables are built by `select`.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct EdgeTable {
    records: Vec<EdgeRecord>,
}

impl EdgeTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, record: EdgeRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgeRecord> {
        self.records.iter()
    }

    /// Iterator over the name column, in row order
    pub fn names(&self) -> impl Iterator<Item = &'_ EdgeName> {
        self.records.iter().map(|r| &r.name)
    }

    /// The name column as a set
    pub fn name_set(&self) -> FnvHashSet<EdgeName> {
        self.names().cloned().collect()
    }

    /// Linear lookup of a record by name
    pub fn get(&self, name: &EdgeName) -> Option<&EdgeRecord> {
        self.records.iter().find(|r| &r.name == name)
    }

    /// Filters the table to the rows whose name is in `names`,
    /// preserving row order. The result is a new table that owns its
    /// rows, not a view into this one.
    pub fn select(&self, names: &FnvHashSet<EdgeName>) -> EdgeTable {
        self.records
            .iter()
            .filter(|r| names.contains(&r.name))
            .cloned()
            .collect()
    }
}

impl FromIterator<EdgeRecord> for EdgeTable {
    fn from_iter<I: IntoIterator<Item = EdgeRecord>>(iter: I) -> Self {
        EdgeTable {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EdgeTable {
    type Item = EdgeRecord;
    type IntoIter = std::vec::IntoIter<EdgeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdgeTable {
    type Item = &'a EdgeRecord;
    type IntoIter = std::slice::Iter<'a, EdgeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
