use crate::error::{Error, Result};
use crate::git::Git;
use crate::info;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use wax::{Glob, Program};

/// run a shell command in every directory matching the glob patterns,
/// or (with no pattern) on every local branch
///
/// the literal `-` separates patterns from the command words; the command
/// is joined with spaces and run through the shell so user-side
/// interpolation keeps working
pub fn run(git: &Git, args: &[String]) -> Result<()> {
    let separator = args.iter().position(|arg| arg == "-").ok_or_else(|| {
        Error::InvalidState("expected '-' between patterns and command".to_string())
    })?;
    let (patterns, command) = args.split_at(separator);
    let command = command[1..].join(" ");
    if command.is_empty() {
        return Err(Error::InvalidState("no command given".to_string()));
    }
    if patterns.is_empty() {
        run_on_branches(git, &command)
    } else {
        run_in_directories(git, Path::new("."), patterns, &command)
    }
}

fn run_in_directories(git: &Git, root: &Path, patterns: &[String], command: &str) -> Result<()> {
    let mut directories: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        directories.extend(matching_directories(root, pattern)?);
    }
    directories.sort();
    directories.dedup();
    for directory in directories {
        let inside = root.join(&directory);
        let resolved = fs::canonicalize(&inside).unwrap_or_else(|_| inside.clone());
        info!("Directory {}:", resolved.display());
        for line in git.shell(&inside, command)? {
            info!("  {line}");
        }
        info!();
    }
    Ok(())
}

/// directories under `root` matching the pattern, walking only as deep
/// as the pattern itself reaches
fn matching_directories(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let glob = Glob::new(pattern)
        .map_err(|e| Error::InvalidState(format!("invalid pattern '{pattern}': {e}")))?;
    let depth = pattern.split('/').count();
    let mut matches = Vec::new();
    for entry in WalkBuilder::new(root).max_depth(Some(depth)).build() {
        let entry = entry.map_err(|e| Error::InvalidState(e.to_string()))?;
        if entry.depth() == 0 {
            continue;
        }
        if entry.file_type().is_some_and(|kind| kind.is_dir())
            && let Ok(relative) = entry.path().strip_prefix(root)
            && glob.is_match(relative)
        {
            matches.push(relative.to_path_buf());
        }
    }
    matches.sort();
    Ok(matches)
}

/// check out each local branch in turn, run the command at the
/// repository root, and restore the original branch
fn run_on_branches(git: &Git, command: &str) -> Result<()> {
    let root = git.require_repository()?;
    git.require_clean_workspace()?;
    let original = git.current_branch()?;
    for branch in git.branches()? {
        git.run(&["checkout", "--quiet", &branch])?;
        info!("Branch {branch}:");
        for line in git.shell(&root, command)? {
            info!("  {line}");
        }
        info!();
    }
    git.run(&["checkout", "--quiet", &original])?;
    Ok(())
}
