use crate::error::Result;
use crate::git::Git;

/// classification of a single path transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Added,
    Deleted,
    Modified,
    Renamed,
}

/// one path transition; `path` is the destination (the source for
/// deletions), `old_path` is set for renames only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub op: Op,
    pub path: String,
    pub old_path: Option<String>,
}

impl Change {
    /// every path implicated by this change, source first for renames
    pub fn paths(&self) -> Vec<&str> {
        match &self.old_path {
            Some(old) => vec![old.as_str(), self.path.as_str()],
            None => vec![self.path.as_str()],
        }
    }
}

/// changes introduced by one commit relative to its parent, ordered by
/// destination path
pub fn commit_changes(git: &Git, commit: &str) -> Result<Vec<Change>> {
    let parent = format!("{commit}~");
    let lines = git.run(&["diff", "--name-status", "-M", &parent, commit])?;
    let mut changes: Vec<Change> = lines.iter().filter_map(|line| parse_line(line)).collect();
    changes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(changes)
}

/// one change set per commit of a span, oldest first, in span order
pub fn span_changes(git: &Git, commits: &[String]) -> Result<Vec<(String, Vec<Change>)>> {
    commits
        .iter()
        .map(|commit| Ok((commit.clone(), commit_changes(git, commit)?)))
        .collect()
}

/// staged and unstaged changes relative to the head, ordered by
/// destination path, then untracked files as additions, ordered among
/// themselves by path
pub fn dirty_changes(git: &Git) -> Result<Vec<Change>> {
    let lines = git.run(&["diff", "--name-status", "-M", "HEAD"])?;
    let mut changes: Vec<Change> = lines.iter().filter_map(|line| parse_line(line)).collect();
    changes.sort_by(|a, b| a.path.cmp(&b.path));

    let mut untracked = git.run(&["ls-files", "--others", "--exclude-standard"])?;
    untracked.sort();
    changes.extend(
        untracked
            .into_iter()
            .filter(|path| !path.is_empty())
            .map(|path| Change {
                op: Op::Added,
                path,
                old_path: None,
            }),
    );
    Ok(changes)
}

/// parse one `--name-status` line; copies count as additions of the
/// destination, type changes as modifications
fn parse_line(line: &str) -> Option<Change> {
    let mut fields = line.split('\t');
    let status = fields.next()?;
    let first = fields.next()?.to_string();
    match status.chars().next()? {
        'A' => Some(Change {
            op: Op::Added,
            path: first,
            old_path: None,
        }),
        'C' => Some(Change {
            op: Op::Added,
            path: fields.next()?.to_string(),
            old_path: None,
        }),
        'M' | 'T' => Some(Change {
            op: Op::Modified,
            path: first,
            old_path: None,
        }),
        'D' => Some(Change {
            op: Op::Deleted,
            path: first,
            old_path: None,
        }),
        'R' => Some(Change {
            op: Op::Renamed,
            path: fields.next()?.to_string(),
            old_path: Some(first),
        }),
        _ => None,
    }
}
