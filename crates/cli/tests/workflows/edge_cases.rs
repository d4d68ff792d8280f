//! Unicode, binary files, short ids and other corners

use crate::common::TestRepo;
use anyhow::Result;

#[test]
fn test_unicode_message_and_content() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("unicode.txt", "Hello, 世界! 🌍\n")?;
    let expected = repo.staged_diff()?;

    let created = repo.cmd(&["-m", "ユニコード 🚀 commit"]).assert_success()?;
    assert!(created.contains_stdout("Message: ユニコード 🚀 commit"));
    let id = created.created_id().unwrap();

    let listed = repo.cmd(&["list"]).assert_success()?;
    assert!(listed.contains_stdout("   Message: ユニコード 🚀 commit"));

    let shown = repo.cmd(&["show", &id]).assert_success()?;
    assert!(shown.contains_stdout("+Hello, 世界! 🌍"));

    repo.unstage_all()?;
    repo.cmd(&["pop", &id]).assert_success()?;
    assert_eq!(repo.staged_diff()?, expected);

    Ok(())
}

#[test]
fn test_binary_file_round_trip() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("image.bin", [0u8, 159, 146, 150, 0, 1, 2, 255])?;
    let expected = repo.staged_diff()?;

    let id = repo.cmd(&["-m", "binary"]).assert_success()?.created_id().unwrap();

    let stat = repo.cmd(&["show", "--stat", &id]).assert_success()?;
    assert!(stat.contains_stdout("image.bin | Bin"));

    repo.unstage_all()?;
    repo.cmd(&["pop", &id]).assert_success()?;
    assert_eq!(repo.staged_diff()?, expected);

    Ok(())
}

#[test]
fn test_short_prefix_and_case() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("test.txt", "content\n")?;
    let id = repo.cmd(&["-m", "prefix"]).assert_success()?.created_id().unwrap();

    let shown = repo.cmd(&["show", &id[..4]]).assert_success()?;
    assert!(shown.contains_stdout("Message: prefix"));

    let shown = repo.cmd(&["show", &id.to_uppercase()]).assert_success()?;
    assert!(shown.contains_stdout("Message: prefix"));

    // Shorter than four characters is never treated as a prefix
    let result = repo.cmd(&["show", &id[..3]]).assert_failure()?;
    assert!(result.contains_stderr("not found"));

    Ok(())
}

#[test]
fn test_same_patch_twice_gets_distinct_ids() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("test.txt", "same\n")?;

    let first = repo.cmd(&["-m", "one"]).assert_success()?.created_id().unwrap();
    let second = repo.cmd(&["-m", "two"]).assert_success()?.created_id().unwrap();
    assert_ne!(first, second);

    let listed = repo.cmd(&["list"]).assert_success()?;
    assert_eq!(listed.listed_ids(), vec![first, second]);

    Ok(())
}

#[test]
fn test_runs_from_subdirectory() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("nested/dir/file.txt", "deep\n")?;

    let mut cmd = crate::common::cli::McCommand::new(repo.path().join("nested/dir"));
    cmd.args(&["-m", "from subdir"])
        .env("MINI_COMMIT_CONFIG", &repo.config_path().to_string_lossy());
    cmd.assert_success()?;

    // Stored under the repository root, not the subdirectory
    assert!(repo.store_dir().join("index.json").exists());
    assert!(!repo.path().join("nested/dir/.git").exists());

    Ok(())
}

#[test]
fn test_multiline_message() -> Result<()> {
    let repo = TestRepo::new()?;
    repo.stage("test.txt", "content\n")?;

    repo.cmd(&["-m", "subject\n\nbody line"]).assert_success()?;

    let index = std::fs::read_to_string(repo.store_dir().join("index.json"))?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&index)?;
    assert_eq!(records[0]["message"], "subject\n\nbody line");

    Ok(())
}

#[test]
fn test_clear_empty_store() -> Result<()> {
    let repo = TestRepo::new()?;
    let result = repo.cmd(&["clear", "-y"]).assert_success()?;
    assert!(result.contains_stdout("No mini-commits found"));
    Ok(())
}
