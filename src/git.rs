use crate::error::{Error, Result};
use crate::info;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const ERROR_CHANGES_OVERWRITTEN: &str = "Your local changes would be overwritten";

/// runs git (or a shell line) in a fixed directory, capturing stdout as
/// lines with trailing newlines stripped
///
/// verbose mode echoes each invocation as a `$ ...` line followed by the
/// captured output
pub struct Git {
    dir: PathBuf,
    verbose: bool,
    envs: Vec<(String, String)>,
}

impl Git {
    pub fn new(verbose: bool) -> Self {
        Self {
            dir: PathBuf::from("."),
            verbose,
            envs: Vec::new(),
        }
    }

    /// run commands in `dir` instead of the current directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            verbose: false,
            envs: Vec::new(),
        }
    }

    /// add an environment override applied to every spawned command
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// run `git <args..>` and return its stdout lines
    pub fn run(&self, args: &[&str]) -> Result<Vec<String>> {
        let rendered = format!("git {}", render(args));
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.dir);
        self.capture(command, &rendered)
    }

    /// run a shell command line in `dir`, for callers that need shell
    /// interpolation to keep working
    pub fn shell(&self, dir: &Path, line: &str) -> Result<Vec<String>> {
        let mut command = Command::new("sh");
        command.args(["-c", line]).current_dir(dir);
        self.capture(command, line)
    }

    fn capture(&self, mut command: Command, rendered: &str) -> Result<Vec<String>> {
        if self.verbose {
            info!("$ {rendered}");
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }
        let output = command.output().map_err(|e| Error::CommandFailed {
            command: rendered.to_string(),
            stderr: e.to_string(),
        })?;
        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: rendered.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        if self.verbose {
            for line in &lines {
                info!("{line}");
            }
        }
        Ok(lines)
    }

    /// canonical hash of a commit-ish
    pub fn rev_parse(&self, name: &str) -> Result<String> {
        match self.run(&["rev-parse", name])?.into_iter().next() {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(Error::UnknownReference(name.to_string())),
        }
    }

    /// repository root, if the working directory is inside one
    pub fn find_root(&self) -> Option<PathBuf> {
        let lines = self.run(&["rev-parse", "--show-toplevel"]).ok()?;
        lines.into_iter().next().map(PathBuf::from)
    }

    pub fn require_repository(&self) -> Result<PathBuf> {
        self.find_root().ok_or(Error::NotARepository)
    }

    /// whether the index or working tree differs from the head
    ///
    /// any diff-index failure counts as dirty, covering a broken or
    /// unborn head; untracked files alone do not
    pub fn is_workspace_dirty(&self) -> bool {
        if self.find_root().is_none() {
            return false;
        }
        self.run(&["diff-index", "--quiet", "HEAD", "--"]).is_err()
    }

    pub fn require_clean_workspace(&self) -> Result<()> {
        if self.is_workspace_dirty() {
            return Err(Error::InvalidState(ERROR_CHANGES_OVERWRITTEN.to_string()));
        }
        Ok(())
    }

    pub fn current_branch(&self) -> Result<String> {
        match self
            .run(&["symbolic-ref", "--short", "HEAD"])?
            .into_iter()
            .next()
        {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(Error::InvalidState("no branch is checked out".to_string())),
        }
    }

    /// local branch names, current-branch marker stripped
    pub fn branches(&self) -> Result<Vec<String>> {
        self.list_branches(&[])
    }

    /// remote-tracking branch names, symbolic pointers skipped
    pub fn remote_branches(&self) -> Result<Vec<String>> {
        self.list_branches(&["-r"])
    }

    fn list_branches(&self, extra: &[&str]) -> Result<Vec<String>> {
        let mut args = vec!["branch"];
        args.extend_from_slice(extra);
        Ok(self
            .run(&args)?
            .iter()
            .filter(|line| !line.contains("->"))
            .map(|line| line.trim().trim_start_matches("* ").to_string())
            .filter(|name| !name.is_empty())
            .collect())
    }

    pub fn remotes(&self) -> Result<Vec<String>> {
        self.run(&["remote"])
    }
}

/// shell-quoted rendering for verbose echoes and error messages
fn render(args: &[&str]) -> String {
    shlex::try_join(args.iter().copied()).unwrap_or_else(|_| args.join(" "))
}
