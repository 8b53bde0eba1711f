use super::*;
use crate::catalog::{build_clone_graph, MachineRecord};
use std::fs;
use std::path::Path;

fn touch(dir: &Path, name: &str, body: &str) -> ArtifactFile {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    ArtifactFile::from_path(&path).unwrap()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

fn family(parent: &str, clones: &[&str]) -> CloneGraph {
    let mut records = vec![MachineRecord::parent(parent)];
    records.extend(clones.iter().map(|c| MachineRecord::clone_of(*c, parent)));
    build_clone_graph(&records)
}

fn options(dir: &Path, policy: UnmatchedPolicy) -> PropagationOptions {
    PropagationOptions::new(policy, dir.join(DEFAULT_QUARANTINE_DIR))
}

#[test]
fn parent_fills_missing_clones_only() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("A", &["B", "C"]);
    let opts = options(dir.path(), UnmatchedPolicy::Ignore);
    fs::write(dir.path().join("C.png"), "own art").unwrap();

    let file = touch(dir.path(), "A.png", "parent art");
    let report = propagate_file(&file, &graph, &opts);

    assert_eq!(report.class, Some(SetClass::ParentWithClones));
    assert_eq!(report.action, Action::Copied(1));
    assert_eq!(read(dir.path(), "B.png"), "parent art");
    assert_eq!(read(dir.path(), "C.png"), "own art");
}

#[test]
fn parent_without_clones_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("galaga", &[]);
    let file = touch(dir.path(), "galaga.info", "{}");
    let report = propagate_file(&file, &graph, &options(dir.path(), UnmatchedPolicy::Delete));
    assert_eq!(report.class, Some(SetClass::LoneParent));
    assert_eq!(report.action, Action::NoOp);
    assert!(file.path.exists());
}

#[test]
fn clone_claims_missing_parent_before_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("P", &["X", "Y"]);
    let file = touch(dir.path(), "X.png", "x art");

    let report = propagate_file(&file, &graph, &options(dir.path(), UnmatchedPolicy::Ignore));

    assert_eq!(report.class, Some(SetClass::Clone));
    assert_eq!(report.action, Action::Copied(1));
    assert_eq!(read(dir.path(), "P.png"), "x art");
    assert!(!dir.path().join("Y.png").exists());
}

#[test]
fn clone_fills_siblings_when_parent_has_art() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("P", &["X", "Y", "Z"]);
    fs::write(dir.path().join("P.png"), "parent art").unwrap();
    fs::write(dir.path().join("Z.png"), "z art").unwrap();
    let file = touch(dir.path(), "X.png", "x art");

    let report = propagate_file(&file, &graph, &options(dir.path(), UnmatchedPolicy::Ignore));

    assert_eq!(report.action, Action::Copied(1));
    assert_eq!(read(dir.path(), "P.png"), "parent art");
    assert_eq!(read(dir.path(), "Y.png"), "x art");
    assert_eq!(read(dir.path(), "Z.png"), "z art");
}

#[test]
fn clone_of_parent_without_own_record_is_handled() {
    let dir = tempfile::tempdir().unwrap();
    let graph = build_clone_graph(&[MachineRecord::clone_of("sf2ce", "sf2")]);
    let file = touch(dir.path(), "sf2ce.lay", "<mamelayout/>");
    let report = propagate_file(&file, &graph, &options(dir.path(), UnmatchedPolicy::Ignore));
    assert_eq!(report.action, Action::Copied(1));
    assert_eq!(read(dir.path(), "sf2.lay"), "<mamelayout/>");
}

#[test]
fn unmatched_file_follows_policy() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("A", &["B"]);

    let file = touch(dir.path(), "ghost.png", "boo");
    let report = propagate_file(&file, &graph, &options(dir.path(), UnmatchedPolicy::Ignore));
    assert_eq!(report.action, Action::NoOp);
    assert!(file.path.exists());

    let report = propagate_file(&file, &graph, &options(dir.path(), UnmatchedPolicy::Delete));
    assert_eq!(report.class, Some(SetClass::Unmatched));
    assert_eq!(report.action, Action::Deleted);
    assert!(!file.path.exists());
}

#[test]
fn move_never_overwrites_quarantine() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("A", &[]);
    let opts = options(dir.path(), UnmatchedPolicy::Move);
    fs::create_dir_all(&opts.quarantine_dir).unwrap();
    fs::write(opts.quarantine_dir.join("ghost.png"), "older").unwrap();

    let file = touch(dir.path(), "ghost.png", "newer");
    let report = propagate_file(&file, &graph, &opts);

    assert_eq!(report.action, Action::SkippedExists);
    assert!(file.path.exists());
    assert_eq!(fs::read_to_string(opts.quarantine_dir.join("ghost.png")).unwrap(), "older");

    let other = touch(dir.path(), "spook.info", "{}");
    assert_eq!(propagate_file(&other, &graph, &opts).action, Action::Moved);
    assert!(opts.quarantine_dir.join("spook.info").exists());
}

#[test]
fn failed_delete_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("A", &[]);
    let file = ArtifactFile::from_path(&dir.path().join("vanished.png")).unwrap();
    let report = propagate_file(&file, &graph, &options(dir.path(), UnmatchedPolicy::Delete));
    assert_eq!(report.action, Action::NoOp);
    assert_eq!(report.failures.len(), 1);
    assert!(report.describe().contains("error"));
}

#[test]
fn tally_folds_reports() {
    let mk = |action, failures: usize| FileReport {
        path: "x".into(),
        class: None,
        action,
        failures: (0..failures)
            .map(|_| PropagationError::Delete {
                path: "x".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
            .collect(),
    };
    let reports = [
        mk(Action::Copied(3), 0),
        mk(Action::Copied(1), 1),
        mk(Action::Moved, 0),
        mk(Action::SkippedExists, 0),
        mk(Action::NotArtifact, 0),
        mk(Action::Deleted, 0),
    ];
    let (left, right) = reports.split_at(3);
    let fold = |rs: &[FileReport]| {
        rs.iter()
            .fold(PropagationTally::default(), |t, r| t.record(r))
    };
    let tally = fold(left).merge(fold(right));
    assert_eq!(tally.processed, 4);
    assert_eq!(tally.copies, 4);
    assert_eq!((tally.moved, tally.deleted), (1, 1));
    assert_eq!(tally.skipped(), 2);
    assert_eq!(tally.failures, 1);
    assert_eq!(tally, fold(&reports));
}
