use crate::changes::{Change, Op};
use crate::git::Git;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// pinned identity and dates keep commit hashes stable across runs
const DATE: &str = "2019-06-26T17:00:05+02:00";
const NAME: &str = "Unit Test";
const EMAIL: &str = "unit@test.com";

/// a throwaway repository driven through the crate's own executor
pub struct TestRepo {
    dir: TempDir,
    pub git: Git,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let git = Git::in_dir(dir.path())
            .env("GIT_AUTHOR_NAME", NAME)
            .env("GIT_AUTHOR_EMAIL", EMAIL)
            .env("GIT_AUTHOR_DATE", DATE)
            .env("GIT_COMMITTER_NAME", NAME)
            .env("GIT_COMMITTER_EMAIL", EMAIL)
            .env("GIT_COMMITTER_DATE", DATE)
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_SYSTEM", "/dev/null");
        git.run(&["init", "--quiet", "--initial-branch=master"])
            .expect("git init");
        Self { dir, git }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// write each named file with its own name as content
    pub fn write_files(&self, names: &[&str]) {
        for name in names {
            self.write(name, &format!("{name}\n"));
        }
    }

    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join(name), content).expect("write file");
    }

    pub fn add(&self, names: &[&str]) {
        for name in names {
            self.git.run(&["add", name]).expect("git add");
        }
    }

    /// write, stage, and commit the named files; the message joins the
    /// names with underscores
    pub fn make_commit(&self, names: &[&str]) {
        self.write_files(names);
        self.add(names);
        let message = names.join("_");
        self.git
            .run(&["commit", "--quiet", "-m", &message])
            .expect("git commit");
    }

    /// commit subjects, newest first
    pub fn subjects(&self) -> Vec<String> {
        self.git.run(&["log", "--format=%s"]).expect("git log")
    }

    /// add a bare mirror clone of the current state as a remote
    pub fn add_remote(&self, name: &str) -> TempDir {
        let remote = TempDir::new().expect("temp dir");
        let target = remote.path().to_string_lossy().to_string();
        self.git
            .run(&["clone", "--quiet", "--mirror", ".", &target])
            .expect("git clone");
        self.git
            .run(&["remote", "add", name, &target])
            .expect("git remote add");
        self.git
            .run(&["fetch", "--quiet", name])
            .expect("git fetch");
        remote
    }
}

pub fn added(path: &str) -> Change {
    Change {
        op: Op::Added,
        path: path.to_string(),
        old_path: None,
    }
}

pub fn deleted(path: &str) -> Change {
    Change {
        op: Op::Deleted,
        path: path.to_string(),
        old_path: None,
    }
}

pub fn modified(path: &str) -> Change {
    Change {
        op: Op::Modified,
        path: path.to_string(),
        old_path: None,
    }
}

pub fn renamed(old: &str, new: &str) -> Change {
    Change {
        op: Op::Renamed,
        path: new.to_string(),
        old_path: Some(old.to_string()),
    }
}
