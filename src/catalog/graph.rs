use std::collections::{HashMap, HashSet};

/// Parent/clone index over a machine catalog.
///
/// Insertion order is kept for parent names and clone edges; lookups go
/// through hashed side tables. Immutable once `build_clone_graph` returns.
#[derive(Clone, Debug, Default)]
pub struct CloneGraph {
    parent_names: Vec<String>,
    parent_set: HashSet<String>,
    clone_edges: Vec<(String, String)>,
    edge_set: HashSet<(String, String)>,
    clones_by_parent: HashMap<String, Vec<String>>,
    parents_by_clone: HashMap<String, Vec<String>>,
}

impl CloneGraph {
    pub(crate) fn insert_parent(&mut self, name: &str) {
        if self.parent_set.insert(name.to_owned()) {
            self.parent_names.push(name.to_owned());
        }
    }

    /// Returns false when the edge was already present.
    pub(crate) fn insert_edge(&mut self, parent: &str, clone: &str) -> bool {
        let edge = (parent.to_owned(), clone.to_owned());
        if !self.edge_set.insert(edge.clone()) {
            return false;
        }
        self.clone_edges.push(edge);
        self.clones_by_parent
            .entry(parent.to_owned())
            .or_default()
            .push(clone.to_owned());
        self.parents_by_clone
            .entry(clone.to_owned())
            .or_default()
            .push(parent.to_owned());
        true
    }

    /// Parent set names in first-seen order.
    pub fn parent_names(&self) -> &[String] {
        &self.parent_names
    }

    /// `(parent, clone)` pairs in catalog order.
    pub fn clone_edges(&self) -> &[(String, String)] {
        &self.clone_edges
    }

    pub fn is_parent(&self, name: &str) -> bool {
        self.parent_set.contains(name)
    }

    pub fn is_clone(&self, name: &str) -> bool {
        self.parents_by_clone.contains_key(name)
    }

    /// True when `name` appears on either side of any clone edge.
    pub fn in_family(&self, name: &str) -> bool {
        self.clones_by_parent.contains_key(name) || self.is_clone(name)
    }

    /// Any name the catalog mentions, as a parent set or as a clone.
    pub fn is_known_set(&self, name: &str) -> bool {
        self.is_parent(name) || self.is_clone(name)
    }

    /// Clones of `parent` in catalog order; empty for unknown names.
    pub fn clones_of(&self, parent: &str) -> &[String] {
        self.clones_by_parent
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First parent recorded for `clone`.
    pub fn parent_of(&self, clone: &str) -> Option<&str> {
        self.parents_of(clone).first().map(String::as_str)
    }

    /// Every parent recorded for `clone` (more than one only with duplicate
    /// machine names).
    pub fn parents_of(&self, clone: &str) -> &[String] {
        self.parents_by_clone
            .get(clone)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
