use clap::{Parser, Subcommand};

/// gitz: git workflow utilities built on the git binary
#[derive(Parser, Debug)]
#[command(name = "gitz", about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// echo each underlying invocation and its output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// rewrite a span of commits (or the dirty workspace) into one
    /// commit per changed path
    Split {
        /// base commit: hash, symbolic name, or a number of commits back
        base: Option<String>,
    },

    /// delete branches locally and on the named remotes
    Delete {
        /// branches to delete
        #[arg(required = true)]
        branches: Vec<String>,

        /// also delete on this remote (repeatable)
        #[arg(short, long = "remote", value_name = "NAME")]
        remotes: Vec<String>,
    },

    /// run a shell command in matched directories, or on every branch
    All {
        /// glob patterns, then `-`, then the command to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
