use thiserror::Error;

/// failure taxonomy for the whole tool
///
/// validation failures (`UnknownReference`, `InvalidState`) are raised
/// before any mutating git call; `RewriteFailed` and `CommandFailed` can
/// surface after partial mutation and are reported as-is, with no rollback
#[derive(Debug, Error)]
pub enum Error {
    /// a commit-ish supplied by the user cannot be resolved
    #[error("unknown reference '{0}'")]
    UnknownReference(String),

    /// the requested operation is impossible in the current repository state
    #[error("{0}")]
    InvalidState(String),

    /// a staging or commit step failed part-way through a rewrite
    #[error("history rewrite failed: {0}")]
    RewriteFailed(String),

    /// a subprocess exited non-zero outside the cases above
    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("fatal: not a git repository (or any of the parent directories): .git")]
    NotARepository,
}

pub type Result<T> = std::result::Result<T, Error>;
