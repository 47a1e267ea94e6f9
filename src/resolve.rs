use crate::error::{Error, Result};
use crate::git::Git;

/// shortest hash prefix treated as unambiguous
pub const COMMIT_ID_LENGTH: usize = 7;

/// a canonical hash and its position in the index (0 is the current head)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommit {
    pub id: String,
    pub position: usize,
}

/// ordered commit hashes, newest first, seeded with the head at
/// construction and extended backwards only as far as resolution needs
///
/// one index is shared across all resolutions in an invocation so that
/// repeated references land on consistent positions
pub struct CommitIndex<'a> {
    git: &'a Git,
    ids: Vec<String>,
}

impl<'a> CommitIndex<'a> {
    pub fn new(git: &'a Git) -> Result<Self> {
        let head = git
            .rev_parse("HEAD")
            .map_err(|_| Error::UnknownReference("HEAD".to_string()))?;
        Ok(Self {
            git,
            ids: vec![head],
        })
    }

    /// all indexed hashes, newest first
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// resolve a hash, symbolic name, or numeric "commits back" shorthand
    pub fn resolve(&mut self, reference: &str) -> Result<ResolvedCommit> {
        let spelled = numeric_shorthand(reference);
        let id = self
            .git
            .rev_parse(&spelled)
            .map_err(|_| Error::UnknownReference(reference.to_string()))?;
        if let Some(position) = self.position_of(&id) {
            return Ok(ResolvedCommit { id, position });
        }
        self.extend_to(&id)
            .map_err(|_| Error::UnknownReference(reference.to_string()))?;
        match self.position_of(&id) {
            Some(position) => Ok(ResolvedCommit { id, position }),
            None => Err(Error::UnknownReference(reference.to_string())),
        }
    }

    /// mutual-prefix search: either side may hold the abbreviated form
    fn position_of(&self, id: &str) -> Option<usize> {
        self.ids
            .iter()
            .position(|known| known.starts_with(id) || id.starts_with(known))
    }

    /// append the log between the new commit and the current oldest
    /// entry, oldest last, keeping the index contiguous
    fn extend_to(&mut self, id: &str) -> Result<()> {
        let oldest = self.ids.last().expect("index is seeded with the head").clone();
        let range = format!("{id}~..{oldest}~");
        for line in self.git.run(&["log", "--oneline", &range])? {
            if let Some(hash) = line.split_whitespace().next() {
                self.ids.push(hash.to_lowercase());
            }
        }
        Ok(())
    }
}

/// short digit strings count backwards from the head
fn numeric_shorthand(reference: &str) -> String {
    if !reference.is_empty()
        && reference.len() < COMMIT_ID_LENGTH
        && reference.chars().all(|c| c.is_ascii_digit())
    {
        format!("HEAD~{reference}")
    } else {
        reference.to_string()
    }
}
