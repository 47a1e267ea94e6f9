use crate::changes::{Change, Op, dirty_changes, span_changes};
use crate::error::{Error, Result};
use crate::git::Git;
use crate::resolve::CommitIndex;
use crate::status;

/// one planned commit: a single change, its generated message, and the
/// commit whose content it is staged from (span rewrites only; dirty
/// rewrites stage from the working tree)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommit {
    pub change: Change,
    pub message: String,
    pub source: Option<String>,
}

/// decompose a span of commits, or the dirty workspace, into one commit
/// per path transition
///
/// an explicit base selects the span above it and requires a clean
/// workspace; with no base, a dirty workspace is decomposed in place and
/// a clean one has its head commit decomposed
pub fn run(git: &Git, base: Option<&str>) -> Result<()> {
    git.require_repository()?;
    let mut index = CommitIndex::new(git)?;
    let (plan, reset_base) = match base {
        Some(reference) => {
            git.require_clean_workspace()?;
            plan_from(git, &mut index, reference)?
        }
        None if git.is_workspace_dirty() => (plan_dirty(dirty_changes(git)?), None),
        None => {
            // only the head commit; its parent may be the root, which
            // the index cannot walk to
            let base = git
                .rev_parse("HEAD~")
                .map_err(|_| Error::UnknownReference("HEAD~".to_string()))?;
            let head = index.ids()[0].clone();
            let sets = span_changes(git, &[head])?;
            (plan_span(sets), Some(base))
        }
    };
    let created = plan.len();
    apply(git, reset_base.as_deref(), &plan)?;
    status!(
        "created {created} atomic commit{}",
        if created == 1 { "" } else { "s" }
    );
    Ok(())
}

/// resolve the base and plan the span above it, oldest first
fn plan_from(
    git: &Git,
    index: &mut CommitIndex,
    reference: &str,
) -> Result<(Vec<PlannedCommit>, Option<String>)> {
    let base = index.resolve(reference)?;
    let span: Vec<String> = index.ids()[..base.position]
        .iter()
        .rev()
        .cloned()
        .collect();
    let sets = span_changes(git, &span)?;
    Ok((plan_span(sets), Some(base.id)))
}

/// plan a per-commit span; change sets arrive ordered and the original
/// commits' order is preserved across them
pub fn plan_span(sets: Vec<(String, Vec<Change>)>) -> Vec<PlannedCommit> {
    sets.into_iter()
        .flat_map(|(commit, set)| {
            set.into_iter().map(move |change| PlannedCommit {
                message: message_for(&change),
                source: Some(commit.clone()),
                change,
            })
        })
        .collect()
}

/// plan the single dirty-state change set, keeping its order
pub fn plan_dirty(set: Vec<Change>) -> Vec<PlannedCommit> {
    set.into_iter()
        .map(|change| PlannedCommit {
            message: message_for(&change),
            source: None,
            change,
        })
        .collect()
}

/// the generated message format is a stable contract
fn message_for(change: &Change) -> String {
    match change.op {
        Op::Added => format!("[split] Added {}", change.path),
        Op::Deleted => format!("[split] Deleted {}", change.path),
        Op::Modified => format!("[split] Modified {}", change.path),
        Op::Renamed => format!(
            "[split] Renamed {} -> {}",
            change
                .old_path
                .as_deref()
                .expect("rename records carry a source path"),
            change.path
        ),
    }
}

/// apply a plan: one commit per entry, strictly in plan order
///
/// with `base` set the branch is first reset hard to it and entry content
/// is staged from each entry's source commit; without it the index is
/// cleared once and entries are staged from the working tree, which the
/// plan already covers in full
///
/// an empty plan touches nothing; failures after the first mutation leave
/// whatever partial history was written
pub fn apply(git: &Git, base: Option<&str>, plan: &[PlannedCommit]) -> Result<String> {
    if plan.is_empty() {
        return git.rev_parse("HEAD");
    }
    match base {
        Some(base) => git.run(&["reset", "--hard", base]),
        None => git.run(&["reset", "--quiet"]),
    }
    .map_err(rewrite_failed)?;
    for entry in plan {
        stage(git, entry).map_err(rewrite_failed)?;
        git.run(&["commit", "-m", &entry.message])
            .map_err(rewrite_failed)?;
    }
    git.rev_parse("HEAD")
}

/// stage exactly the paths named by one entry, handling the add, delete,
/// and rename primitives individually
fn stage(git: &Git, entry: &PlannedCommit) -> Result<()> {
    let change = &entry.change;
    match &entry.source {
        Some(commit) => match change.op {
            Op::Added | Op::Modified => {
                git.run(&["checkout", commit, "--", &change.path])?;
            }
            Op::Deleted => {
                git.run(&["rm", "--quiet", "--", &change.path])?;
            }
            Op::Renamed => {
                let old = change
                    .old_path
                    .as_deref()
                    .expect("rename records carry a source path");
                git.run(&["rm", "--quiet", "--", old])?;
                git.run(&["checkout", commit, "--", &change.path])?;
            }
        },
        None => {
            let mut args = vec!["add", "-A", "--"];
            args.extend(change.paths());
            git.run(&args)?;
        }
    }
    Ok(())
}

fn rewrite_failed(error: Error) -> Error {
    Error::RewriteFailed(error.to_string())
}

#[cfg(test)]
mod tests;
