use std::path::PathBuf;

use tempfile::TempDir;

use tidyfs::common::errors::TidyError;
use tidyfs::gate::{Action, Gate, Outcome};

#[test]
fn test_preview_performs_no_mutations() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("keep.txt");
    std::fs::write(&file, "content").unwrap();

    let gate = Gate::preview();
    let outcome = gate
        .perform(Action::RemoveFile { path: file.clone() })
        .unwrap();

    assert_eq!(outcome, Outcome::Previewed);
    assert!(file.exists(), "preview must not delete anything");
    assert_eq!(gate.actions().len(), 1);
}

#[test]
fn test_live_removes_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("gone.txt");
    std::fs::write(&file, "content").unwrap();

    let gate = Gate::live();
    let outcome = gate
        .perform(Action::RemoveFile { path: file.clone() })
        .unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert!(!file.exists());
}

#[test]
fn test_live_remove_missing_file_is_ok() {
    let dir = TempDir::new().unwrap();
    let gate = Gate::live();
    let outcome = gate
        .perform(Action::RemoveFile {
            path: dir.path().join("never-existed.txt"),
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Applied);
}

#[test]
fn test_live_removes_directory_recursively() {
    let dir = TempDir::new().unwrap();
    let victim = dir.path().join("cache");
    std::fs::create_dir(&victim).unwrap();
    std::fs::write(victim.join("blob"), "x").unwrap();

    let gate = Gate::live();
    gate.perform(Action::RemoveDir {
        path: victim.clone(),
    })
    .unwrap();
    assert!(!victim.exists());
}

#[test]
fn test_rename_refuses_existing_destination_in_both_modes() {
    for gate in [Gate::preview(), Gate::live()] {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("source.txt");
        let to = dir.path().join("taken.txt");
        std::fs::write(&from, "source").unwrap();
        std::fs::write(&to, "already here").unwrap();

        let err = gate
            .perform(Action::Rename {
                from: from.clone(),
                to: to.clone(),
            })
            .unwrap_err();

        assert!(matches!(err, TidyError::DestinationExists(_)));
        assert!(from.exists());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "already here");
        assert!(gate.actions().is_empty(), "refusals are not logged as actions");
    }
}

#[test]
fn test_live_rename_applies() {
    let dir = TempDir::new().unwrap();
    let from = dir.path().join("Old Name.txt");
    let to = dir.path().join("old-name.txt");
    std::fs::write(&from, "content").unwrap();

    let gate = Gate::live();
    gate.perform(Action::Rename {
        from: from.clone(),
        to: to.clone(),
    })
    .unwrap();

    assert!(!from.exists());
    assert_eq!(std::fs::read_to_string(&to).unwrap(), "content");
}

#[test]
fn test_live_mutations_match_preview_actions() {
    let make_fixture = || {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::write(dir.path().join("b.txt"), "y").unwrap();
        dir
    };

    let relative_actions = |gate: &Gate, root: &std::path::Path| -> Vec<Action> {
        gate.actions()
            .into_iter()
            .map(|a| match a {
                Action::RemoveFile { path } => Action::RemoveFile {
                    path: path.strip_prefix(root).unwrap().to_path_buf(),
                },
                Action::RemoveDir { path } => Action::RemoveDir {
                    path: path.strip_prefix(root).unwrap().to_path_buf(),
                },
                Action::Rename { from, to } => Action::Rename {
                    from: from.strip_prefix(root).unwrap().to_path_buf(),
                    to: to.strip_prefix(root).unwrap().to_path_buf(),
                },
            })
            .collect()
    };

    let preview_dir = make_fixture();
    let preview_gate = Gate::preview();
    for name in ["a.txt", "b.txt"] {
        preview_gate
            .perform(Action::RemoveFile {
                path: preview_dir.path().join(name),
            })
            .unwrap();
    }

    let live_dir = make_fixture();
    let live_gate = Gate::live();
    for name in ["a.txt", "b.txt"] {
        live_gate
            .perform(Action::RemoveFile {
                path: live_dir.path().join(name),
            })
            .unwrap();
    }

    assert_eq!(
        relative_actions(&preview_gate, preview_dir.path()),
        relative_actions(&live_gate, live_dir.path()),
        "live mode must perform exactly what preview describes"
    );
    assert!(preview_dir.path().join("a.txt").exists());
    assert!(!live_dir.path().join("a.txt").exists());
}

#[test]
fn test_protected_path_refused() {
    let gate = Gate::live();
    let err = gate
        .perform(Action::RemoveDir {
            path: PathBuf::from("/etc"),
        })
        .unwrap_err();
    assert!(matches!(err, TidyError::ProtectedPath(_)));
}
