use tempfile::TempDir;

use tidyfs::common::errors::TidyError;
use tidyfs::gate::Gate;
use tidyfs::rename::{canonical_name, normalize_dir, Disposition};

#[test]
fn test_collision_with_existing_file() {
    // "My File.txt" and "my-file.txt" in the same directory: normalizing the
    // first collides with the second -> 0 renamed, 1 collision, second file
    // untouched.
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("My File.txt"), "original").unwrap();
    std::fs::write(dir.path().join("my-file.txt"), "existing").unwrap();

    let gate = Gate::live();
    let report = normalize_dir(dir.path(), &gate).unwrap();

    assert_eq!(report.renamed, 0);
    assert_eq!(report.collisions, 1);
    assert!(dir.path().join("My File.txt").exists());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("my-file.txt")).unwrap(),
        "existing"
    );
}

#[test]
fn test_two_sources_one_target_yields_one_rename_one_collision() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("A B.txt"), "first").unwrap();
    std::fs::write(dir.path().join("a  b.txt"), "second").unwrap();

    let gate = Gate::live();
    let report = normalize_dir(dir.path(), &gate).unwrap();

    assert_eq!(report.renamed, 1);
    assert_eq!(report.collisions, 1);
    assert!(dir.path().join("a-b.txt").exists());
    // Exactly one source survives under its original name.
    let originals_left = ["A B.txt", "a  b.txt"]
        .iter()
        .filter(|n| dir.path().join(n).exists())
        .count();
    assert_eq!(originals_left, 1);
}

#[test]
fn test_already_canonical_names_are_noops() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("already-fine.txt"), "x").unwrap();
    std::fs::write(dir.path().join("also_ok.1.log"), "y").unwrap();

    let gate = Gate::live();
    let report = normalize_dir(dir.path(), &gate).unwrap();

    assert_eq!(report.renamed, 0);
    assert_eq!(report.collisions, 0);
    assert!(report
        .plan
        .iter()
        .all(|p| p.disposition == Disposition::Identical));
    assert!(gate.actions().is_empty());
}

#[test]
fn test_normalize_is_idempotent_across_runs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Some File.TXT"), "x").unwrap();

    let first = normalize_dir(dir.path(), &Gate::live()).unwrap();
    assert_eq!(first.renamed, 1);
    assert!(dir.path().join("some-file.txt").exists());

    let second = normalize_dir(dir.path(), &Gate::live()).unwrap();
    assert_eq!(second.renamed, 0);
    assert_eq!(second.collisions, 0);
}

#[test]
fn test_preview_matches_live() {
    let make_fixture = || {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("My Report.pdf"), "a").unwrap();
        std::fs::write(dir.path().join("Photo 001.JPG"), "b").unwrap();
        std::fs::write(dir.path().join("plain.txt"), "c").unwrap();
        dir
    };

    let preview_dir = make_fixture();
    let preview_gate = Gate::preview();
    let preview_report = normalize_dir(preview_dir.path(), &preview_gate).unwrap();

    // Preview touched nothing.
    assert!(preview_dir.path().join("My Report.pdf").exists());
    assert!(preview_dir.path().join("Photo 001.JPG").exists());

    let live_dir = make_fixture();
    let live_gate = Gate::live();
    let live_report = normalize_dir(live_dir.path(), &live_gate).unwrap();

    assert_eq!(preview_report.renamed, live_report.renamed);
    assert_eq!(preview_report.collisions, live_report.collisions);
    assert_eq!(preview_gate.actions().len(), live_gate.actions().len());
    assert!(live_dir.path().join("my-report.pdf").exists());
    assert!(live_dir.path().join("photo-001.jpg").exists());
}

#[test]
fn test_name_that_empties_out_is_skipped() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("№№№"), "x").unwrap();

    let gate = Gate::live();
    let report = normalize_dir(dir.path(), &gate).unwrap();

    assert_eq!(report.renamed, 0);
    assert_eq!(report.collisions, 1, "empty canonical names are never applied");
    assert!(dir.path().join("№№№").exists());
}

#[test]
fn test_non_recursive_leaves_subdirectories_alone() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("Sub Dir")).unwrap();
    std::fs::write(dir.path().join("Sub Dir/Inner File.txt"), "x").unwrap();
    std::fs::write(dir.path().join("Top File.txt"), "y").unwrap();

    let report = normalize_dir(dir.path(), &Gate::live()).unwrap();

    assert_eq!(report.renamed, 1);
    assert!(dir.path().join("top-file.txt").exists());
    // Directory itself and nested file untouched.
    assert!(dir.path().join("Sub Dir/Inner File.txt").exists());
}

#[test]
fn test_missing_dir_is_an_error() {
    let err = normalize_dir(std::path::Path::new("/no/such/dir"), &Gate::live()).unwrap_err();
    assert!(matches!(err, TidyError::MissingRoot(_)));
}

#[test]
fn test_canonical_transform_examples() {
    assert_eq!(canonical_name("My File.txt"), "my-file.txt");
    assert_eq!(canonical_name("my-file.txt"), "my-file.txt");
    assert_eq!(canonical_name("  A   B  "), "-a-b-");
}
