//! Create, list, show, pop and drop end to end

use crate::common::TestRepo;
use anyhow::Result;

#[test]
fn test_create_list_show() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("test.txt", "Hello, World!\n")?;

    let created = repo.cmd(&["-m", "first mini-commit"]).assert_success()?;
    let id = created.created_id().expect("create prints the short id");
    assert_eq!(id.len(), 8);
    assert!(created.contains_stdout("Message: first mini-commit"));
    assert!(created.contains_stdout("Created at: "));

    let listed = repo.cmd(&["list"]).assert_success()?;
    assert!(listed.contains_stdout("Mini-commits (1):"));
    assert_eq!(listed.listed_ids(), vec![id.clone()]);
    assert!(listed.contains_stdout("   Message: first mini-commit"));
    assert!(listed.contains_stdout("   Created: "));

    let shown = repo.cmd(&["show", &id]).assert_success()?;
    assert!(shown.contains_stdout(&format!("Mini-commit: {}", id)));
    assert!(shown.contains_stdout("\nDiff:\n---\n"));
    assert!(shown.contains_stdout("diff --git a/test.txt b/test.txt"));
    assert!(shown.contains_stdout("+Hello, World!"));

    // The staging area is left as it was
    assert_eq!(repo.staged_files()?, vec!["test.txt"]);

    Ok(())
}

#[test]
fn test_store_layout_on_disk() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("a.txt", "a\n")?;
    repo.cmd(&["-m", "layout"]).assert_success()?;

    let index = std::fs::read_to_string(repo.store_dir().join("index.json"))?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&index)?;
    assert_eq!(records.len(), 1);

    let id = records[0]["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 40);
    assert_eq!(records[0]["message"], "layout");
    assert!(records[0]["createdAt"].is_string());

    let blob = std::fs::read_to_string(repo.store_dir().join(format!("{}.patch", id)))?;
    assert_eq!(blob, records[0]["patch"].as_str().unwrap());
    assert_eq!(blob, repo.staged_diff()?);

    Ok(())
}

#[test]
fn test_list_order_is_creation_order() -> Result<()> {
    let repo = TestRepo::new()?;
    let mut ids = Vec::new();

    for i in 0..3 {
        repo.stage(&format!("file{}.txt", i), format!("content {}\n", i))?;
        let created = repo.cmd(&["-m", &format!("step {}", i)]).assert_success()?;
        ids.push(created.created_id().unwrap());
    }

    let listed = repo.cmd(&["list"]).assert_success()?;
    assert!(listed.contains_stdout("Mini-commits (3):"));
    assert_eq!(listed.listed_ids(), ids);
    assert!(listed.contains_stdout("1. ID: "));
    assert!(listed.contains_stdout("3. ID: "));

    Ok(())
}

#[test]
fn test_pop_restores_staging_area() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("test.txt", "Hello, World!\n")?;
    let expected = repo.staged_diff()?;

    let id = repo.cmd(&["-m", "to pop"]).assert_success()?.created_id().unwrap();

    repo.unstage_all()?;
    assert!(repo.staged_files()?.is_empty());

    let popped = repo.cmd(&["pop", &id]).assert_success()?;
    assert!(popped.contains_stdout(&format!("Applied mini-commit '{}' to staging area", id)));
    assert!(popped.contains_stdout("Message: to pop"));

    assert_eq!(repo.staged_diff()?, expected);

    // Pop keeps the mini-commit
    let listed = repo.cmd(&["list"]).assert_success()?;
    assert_eq!(listed.listed_ids(), vec![id]);

    Ok(())
}

#[test]
fn test_pop_modification_of_committed_file() -> Result<()> {
    let repo = TestRepo::with_initial_commit()?;
    repo.stage("README.md", "# test\n\nmore text\n")?;
    let expected = repo.staged_diff()?;

    let id = repo.cmd(&["-m", "edit readme"]).assert_success()?.created_id().unwrap();
    repo.unstage_all()?;

    repo.cmd(&["pop", &id]).assert_success()?;
    assert_eq!(repo.staged_diff()?, expected);

    Ok(())
}

#[test]
fn test_pop_with_drop() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("test.txt", "content\n")?;
    let id = repo.cmd(&["-m", "pop and drop"]).assert_success()?.created_id().unwrap();
    repo.unstage_all()?;

    let popped = repo.cmd(&["pop", "--drop", &id]).assert_success()?;
    assert!(popped.contains_stdout("Applied mini-commit"));
    assert!(popped.contains_stdout(&format!("Deleted mini-commit '{}'", id)));

    assert_eq!(repo.staged_files()?, vec!["test.txt"]);
    let listed = repo.cmd(&["list"]).assert_success()?;
    assert!(listed.contains_stdout("No mini-commits found"));

    Ok(())
}

#[test]
fn test_drop_removes_record_and_blob() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("test.txt", "content\n")?;
    let id = repo.cmd(&["-m", "to drop"]).assert_success()?.created_id().unwrap();

    let dropped = repo.cmd(&["drop", &id]).assert_success()?;
    assert!(dropped.contains_stdout(&format!("Deleted mini-commit '{}'", id)));

    let listed = repo.cmd(&["list"]).assert_success()?;
    assert!(listed.contains_stdout("No mini-commits found"));

    let patches = std::fs::read_dir(repo.store_dir())?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "patch"))
        .count();
    assert_eq!(patches, 0);

    Ok(())
}

#[test]
fn test_full_id_is_accepted() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("test.txt", "content\n")?;
    repo.cmd(&["-m", "full id"]).assert_success()?;

    let index = std::fs::read_to_string(repo.store_dir().join("index.json"))?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&index)?;
    let full = records[0]["id"].as_str().unwrap().to_string();

    let shown = repo.cmd(&["show", &full]).assert_success()?;
    assert!(shown.contains_stdout("Message: full id"));

    repo.cmd(&["drop", &full]).assert_success()?;
    Ok(())
}

#[test]
fn test_show_stat() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("a.txt", "one\ntwo\n")?;
    repo.stage("b.txt", "three\n")?;
    let id = repo.cmd(&["-m", "stat"]).assert_success()?.created_id().unwrap();

    let shown = repo.cmd(&["show", "--stat", &id]).assert_success()?;
    assert!(shown.contains_stdout("a.txt | 2 ++"));
    assert!(shown.contains_stdout("b.txt | 1 +"));
    assert!(shown.contains_stdout("2 files changed, 3 insertions(+)"));
    assert!(!shown.contains_stdout("diff --git"));

    Ok(())
}

#[test]
fn test_clear_with_confirmation() -> Result<()> {
    let repo = TestRepo::new()?;
    for i in 0..2 {
        repo.stage(&format!("f{}.txt", i), "x\n")?;
        repo.cmd(&["-m", &format!("m{}", i)]).assert_success()?;
    }

    let aborted = repo.cmd(&["clear"]).stdin("n\n").assert_success()?;
    assert!(aborted.contains_stdout("Aborted"));
    assert_eq!(repo.cmd(&["list"]).assert_success()?.listed_ids().len(), 2);

    let cleared = repo.cmd(&["clear"]).stdin("y\n").assert_success()?;
    assert!(cleared.contains_stdout("Deleted 2 mini-commit(s)"));
    assert!(repo.cmd(&["list"]).assert_success()?.contains_stdout("No mini-commits found"));

    Ok(())
}

#[test]
fn test_clear_yes_flag() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("f.txt", "x\n")?;
    repo.cmd(&["-m", "m"]).assert_success()?;

    let cleared = repo.cmd(&["clear", "-y"]).assert_success()?;
    assert!(cleared.contains_stdout("Deleted 1 mini-commit(s)"));

    let index = std::fs::read_to_string(repo.store_dir().join("index.json"))?;
    assert_eq!(index.trim(), "[]");

    Ok(())
}
