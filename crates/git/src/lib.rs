//! Git integration for git-mini-commit
//!
//! Thin async wrapper over the `git` binary. Every function runs git inside
//! the given directory, so callers never depend on the process cwd.
//!
//! Patches are produced with `--binary --no-color --no-ext-diff` so user
//! configuration (`color.ui = always`, external diff drivers) cannot produce
//! output that `git apply` would later reject.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Errors from git subprocesses
#[derive(Debug, Error)]
pub enum GitError {
    /// git could not be started at all
    #[error("failed to run git {command}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// git ran and exited with an unexpected status
    #[error("git {command} failed (exit code {code}): {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// git output was not valid UTF-8
    #[error("git {command} produced output that is not valid UTF-8")]
    InvalidOutput { command: String },
}

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

const STAGED_DIFF_ARGS: &[&str] = &["diff", "--cached", "--binary", "--no-color", "--no-ext-diff"];

/// Whether `dir` is inside a git working tree
pub async fn is_working_tree(dir: &Path) -> bool {
    match run(dir, &["rev-parse", "--git-dir"], None).await {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

/// Top-level directory of the working tree containing `dir`
pub async fn repository_root(dir: &Path) -> Result<PathBuf> {
    let args = ["rev-parse", "--show-toplevel"];
    let output = checked(dir, &args, None).await?;
    let root = stdout_string(&args, output)?;
    Ok(PathBuf::from(root.trim_end_matches(['\n', '\r'])))
}

/// Whether anything is staged in the index
///
/// `git diff --cached --quiet` exits 1 when there are changes and 0 when
/// there are none; anything else is a failure.
pub async fn has_staged_changes(repo_root: &Path) -> Result<bool> {
    let args = ["diff", "--cached", "--quiet"];
    let output = run(repo_root, &args, None).await?;

    match output.status.code() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(command_failed(&args, &output)),
    }
}

/// The staged changes as a patch
pub async fn staged_changes(repo_root: &Path) -> Result<String> {
    let output = checked(repo_root, STAGED_DIFF_ARGS, None).await?;
    stdout_string(STAGED_DIFF_ARGS, output)
}

/// Apply `patch` to the index (not the working tree)
pub async fn apply_to_staging(repo_root: &Path, patch: &str) -> Result<()> {
    checked(repo_root, &["apply", "--cached"], Some(patch.as_bytes())).await?;
    Ok(())
}

/// Run git, failing on a non-zero exit status
async fn checked(dir: &Path, args: &[&str], stdin: Option<&[u8]>) -> Result<Output> {
    let output = run(dir, args, stdin).await?;
    if !output.status.success() {
        return Err(command_failed(args, &output));
    }
    Ok(output)
}

/// Run git, returning its output whatever the exit status
async fn run(dir: &Path, args: &[&str], stdin: Option<&[u8]>) -> Result<Output> {
    tracing::debug!("Running git {} in {}", args.join(" "), dir.display());

    let mut command = Command::new("git");
    command
        .args(args)
        .current_dir(dir)
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let spawn_error = |source| GitError::Spawn {
        command: args.join(" "),
        source,
    };

    let mut child = command.spawn().map_err(spawn_error)?;

    let Some(input) = stdin else {
        return child.wait_with_output().await.map_err(spawn_error);
    };

    let pipe = child.stdin.take();
    let write = async move {
        if let Some(mut pipe) = pipe {
            pipe.write_all(input).await?;
            pipe.shutdown().await?;
        }
        Ok::<_, io::Error>(())
    };

    // Feed stdin while draining stdout/stderr so large patches cannot deadlock
    let (written, output) = tokio::join!(write, child.wait_with_output());
    let output = output.map_err(spawn_error)?;

    match written {
        // git may stop reading early when it rejects the input; its exit status tells why
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(spawn_error(e)),
        _ => Ok(output),
    }
}

fn stdout_string(args: &[&str], output: Output) -> Result<String> {
    String::from_utf8(output.stdout).map_err(|_| GitError::InvalidOutput {
        command: args.join(" "),
    })
}

fn command_failed(args: &[&str], output: &Output) -> GitError {
    GitError::CommandFailed {
        command: args.join(" "),
        code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
