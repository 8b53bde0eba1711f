use crate::catalog::CloneGraph;
use serde::Serialize;

/// How a set name relates to the clone graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SetClass {
    /// Parent set that no clone refers to.
    LoneParent,
    /// Parent set with at least one clone edge.
    ParentWithClones,
    /// Clone of some parent set.
    Clone,
    /// Not mentioned by the catalog.
    Unmatched,
}

pub fn classify(set_name: &str, graph: &CloneGraph) -> SetClass {
    match (graph.is_parent(set_name), graph.in_family(set_name)) {
        (true, false) => SetClass::LoneParent,
        (true, true) => SetClass::ParentWithClones,
        (false, true) => SetClass::Clone,
        (false, false) => SetClass::Unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_clone_graph, MachineRecord};

    #[test]
    fn every_class_is_reachable() {
        let records = vec![
            MachineRecord::parent("galaga"),
            MachineRecord::parent("pacman"),
            MachineRecord::clone_of("puckman", "pacman"),
        ];
        let graph = build_clone_graph(&records);
        assert_eq!(classify("galaga", &graph), SetClass::LoneParent);
        assert_eq!(classify("pacman", &graph), SetClass::ParentWithClones);
        assert_eq!(classify("puckman", &graph), SetClass::Clone);
        assert_eq!(classify("ghost", &graph), SetClass::Unmatched);
    }
}
