mod common;

use bezel_tools::batch::run_propagation;
use bezel_tools::catalog::{build_clone_graph, load_catalog, CatalogError, MachineRecord};
use bezel_tools::propagate::{Action, PropagationOptions, UnmatchedPolicy, DEFAULT_QUARANTINE_DIR};
use bezel_tools::CloneGraph;
use common::{init_logger, read, touch};
use std::path::Path;

const CATALOG: &str = r#"<?xml version="1.0"?>
<mame build="0.250">
	<machine name="A" sourcefile="a.cpp">
		<description>Alpha</description>
	</machine>
	<machine name="B" sourcefile="a.cpp" cloneof="A" romof="A">
		<description>Alpha (set 2)</description>
	</machine>
	<machine name="C" sourcefile="a.cpp" cloneof="A" romof="A"/>
	<machine name="solo" sourcefile="s.cpp"/>
</mame>
"#;

fn family(parent: &str, clones: &[&str]) -> CloneGraph {
    let mut records = vec![MachineRecord::parent(parent)];
    records.extend(clones.iter().map(|c| MachineRecord::clone_of(*c, parent)));
    build_clone_graph(&records)
}

fn options(dir: &Path, policy: UnmatchedPolicy) -> PropagationOptions {
    PropagationOptions::new(policy, dir.join(DEFAULT_QUARANTINE_DIR))
}

#[test]
fn parent_artwork_reaches_every_clone_then_settles() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let graph = family("A", &["B", "C"]);
    touch(dir.path(), "A.png", "png bytes");
    touch(dir.path(), "A.info", "{}");
    let opts = options(dir.path(), UnmatchedPolicy::Ignore);

    let first = run_propagation(dir.path(), &graph, &opts, false).unwrap();
    assert_eq!(first.tally.processed, 2);
    assert_eq!(first.tally.copies, 4);
    for name in ["B.png", "C.png"] {
        assert_eq!(read(dir.path(), name), "png bytes");
    }
    for name in ["B.info", "C.info"] {
        assert_eq!(read(dir.path(), name), "{}");
    }

    let second = run_propagation(dir.path(), &graph, &opts, false).unwrap();
    assert_eq!(second.tally.processed, 6);
    assert_eq!(second.tally.copies, 0);
}

#[test]
fn lone_clone_fills_parent_then_parent_fills_sibling() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("P", &["X", "Y"]);
    touch(dir.path(), "X.png", "x art");
    let opts = options(dir.path(), UnmatchedPolicy::Ignore);

    let first = run_propagation(dir.path(), &graph, &opts, false).unwrap();
    assert_eq!(first.tally.copies, 1);
    assert_eq!(read(dir.path(), "P.png"), "x art");
    assert!(!dir.path().join("Y.png").exists());

    let second = run_propagation(dir.path(), &graph, &opts, false).unwrap();
    assert_eq!(second.tally.copies, 1);
    assert_eq!(read(dir.path(), "Y.png"), "x art");

    let third = run_propagation(dir.path(), &graph, &opts, false).unwrap();
    assert_eq!(third.tally.copies, 0);
}

#[test]
fn unmatched_artwork_is_deleted_or_quarantined() {
    let dir = tempfile::tempdir().unwrap();
    let graph = family("A", &["B"]);
    touch(dir.path(), "ghost.png", "boo");
    touch(dir.path(), "spook.lay", "<mamelayout/>");
    touch(dir.path(), "readme.txt", "keep me");

    let moved = run_propagation(
        dir.path(),
        &graph,
        &options(dir.path(), UnmatchedPolicy::Move),
        false,
    )
    .unwrap();
    assert_eq!(moved.tally.moved, 2);
    assert_eq!(moved.tally.not_artifact, 1);
    let quarantine = dir.path().join(DEFAULT_QUARANTINE_DIR);
    assert_eq!(read(&quarantine, "ghost.png"), "boo");
    assert!(quarantine.join("spook.lay").exists());
    assert!(!dir.path().join("ghost.png").exists());
    assert!(dir.path().join("readme.txt").exists());

    touch(dir.path(), "ghost.png", "boo again");
    let repeat = run_propagation(
        dir.path(),
        &graph,
        &options(dir.path(), UnmatchedPolicy::Move),
        false,
    )
    .unwrap();
    assert_eq!(repeat.tally.skipped_existing, 1);
    assert_eq!(read(&quarantine, "ghost.png"), "boo");

    let deleted = run_propagation(
        dir.path(),
        &graph,
        &options(dir.path(), UnmatchedPolicy::Delete),
        false,
    )
    .unwrap();
    assert_eq!(deleted.tally.deleted, 1);
    assert!(!dir.path().join("ghost.png").exists());
    assert!(dir.path().join("readme.txt").exists());
}

#[test]
fn parallel_run_never_overwrites_existing_artwork() {
    let dir = tempfile::tempdir().unwrap();
    let clones: Vec<String> = (0..16).map(|i| format!("c{i:02}")).collect();
    let names: Vec<&str> = clones.iter().map(String::as_str).collect();
    let graph = family("p", &names);
    for name in &names[..8] {
        touch(dir.path(), &format!("{name}.png"), name);
    }
    let opts = options(dir.path(), UnmatchedPolicy::Ignore);

    let run = run_propagation(dir.path(), &graph, &opts, true).unwrap();

    for name in &names[..8] {
        assert_eq!(&read(dir.path(), &format!("{name}.png")), name);
    }
    let parent = read(dir.path(), "p.png");
    assert!(names[..8].contains(&parent.as_str()));
    let copied: usize = run
        .reports
        .iter()
        .map(|r| match r.action {
            Action::Copied(n) => n,
            _ => 0,
        })
        .sum();
    assert_eq!(copied, run.tally.copies);
    assert!(run.tally.copies >= 1);
}

#[test]
fn catalog_file_drives_a_full_pass() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("mame.xml");
    std::fs::write(&catalog, CATALOG).unwrap();
    let art = dir.path().join("bezels");
    std::fs::create_dir(&art).unwrap();
    touch(&art, "B.png", "b art");
    touch(&art, "solo.png", "solo art");
    touch(&art, "nobody.info", "{}");

    let graph = build_clone_graph(&load_catalog(&catalog).unwrap());
    assert!(graph.is_parent("A"));
    assert!(graph.is_clone("C"));

    let run = run_propagation(
        &art,
        &graph,
        &options(&art, UnmatchedPolicy::Delete),
        false,
    )
    .unwrap();

    assert_eq!(read(&art, "A.png"), "b art");
    assert!(!art.join("C.png").exists());
    assert_eq!(read(&art, "solo.png"), "solo art");
    assert!(!art.join("nobody.info").exists());
    assert_eq!(run.tally.copies, 1);
    assert_eq!(run.tally.deleted, 1);
}

#[test]
fn cut_off_or_empty_catalog_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("mame.xml");
    let cut = &CATALOG[..CATALOG.find(r#"<machine name="C""#).unwrap() + 20];
    std::fs::write(&catalog, cut).unwrap();

    let err = load_catalog(&catalog).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Truncated { .. } | CatalogError::Xml { .. }
    ));
    assert!(matches!(
        load_catalog(&dir.path().join("empty.xml")),
        Err(CatalogError::Open { .. })
    ));
    std::fs::write(dir.path().join("empty.xml"), "").unwrap();
    assert!(matches!(
        load_catalog(&dir.path().join("empty.xml")),
        Err(CatalogError::NoRoot)
    ));
}
