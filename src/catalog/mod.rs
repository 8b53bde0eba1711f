//! Machine catalog and the parent/clone index built from it.
//!
//! A catalog lists every machine (ROM set) once, optionally naming the
//! parent set it is a clone of. `build_clone_graph` folds those records into
//! a `CloneGraph`:
//!
//! - a record without parent adds its own name to the parent names;
//! - a clone record adds its *parent's* name to the parent names (filtered
//!   listings may omit the parent's own record) and appends the
//!   `(parent, clone)` edge unless already present.
//!
//! Clone names are deliberately not parent names, so classification can tell
//! the two apart. Duplicate machine names are tolerated and logged.

mod graph;
mod parser;

pub use graph::CloneGraph;
pub use parser::{load_catalog, parse_catalog, parse_catalog_str};

use log::{debug, warn};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog {path}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("machine element at byte {position} has no name attribute")]
    MissingName { position: usize },
    #[error("catalog has no root element")]
    NoRoot,
    #[error("catalog ends at byte {position} inside {depth} unclosed element(s)")]
    Truncated { position: usize, depth: usize },
    #[error("catalog lists no machine or game elements")]
    NoMachines,
}

/// One machine entry of the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineRecord {
    pub name: String,
    /// `None` for parent sets, the parent's name for clones.
    pub parent_name: Option<String>,
}

impl MachineRecord {
    /// Build a record; an empty parent name means "no parent".
    pub fn new(name: impl Into<String>, parent_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.filter(|p| !p.is_empty()),
        }
    }

    pub fn parent(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    pub fn clone_of(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(name, Some(parent.into()))
    }

    pub fn is_clone(&self) -> bool {
        self.parent_name.is_some()
    }
}

/// Fold catalog records into a parent/clone index.
pub fn build_clone_graph<'a, I>(records: I) -> CloneGraph
where
    I: IntoIterator<Item = &'a MachineRecord>,
{
    let mut graph = CloneGraph::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates = 0usize;

    for record in records {
        if !seen.insert(record.name.as_str()) {
            duplicates += 1;
            warn!("duplicate machine name '{}' in catalog", record.name);
        }
        match &record.parent_name {
            None => {
                debug!("machine {} (parent set)", record.name);
                graph.insert_parent(&record.name);
            }
            Some(parent) => {
                debug!("machine {}, clone of {}", record.name, parent);
                graph.insert_parent(parent);
                if graph.insert_edge(parent, &record.name) {
                    let parents = graph.parents_of(&record.name);
                    if parents.len() > 1 {
                        warn!(
                            "machine '{}' is listed as a clone of {} parents: {}",
                            record.name,
                            parents.len(),
                            parents.join(", ")
                        );
                    }
                }
            }
        }
    }

    debug!(
        "clone graph: {} parent sets, {} clone edges, {} duplicate names",
        graph.parent_names().len(),
        graph.clone_edges().len(),
        duplicates
    );
    graph
}
