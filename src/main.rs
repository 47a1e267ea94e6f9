mod all;
mod changes;
mod cli;
mod config;
mod delete;
mod error;
mod git;
mod output;
mod resolve;
mod split;
#[cfg(test)]
mod testing;

use crate::cli::{Cli, Command};
use crate::git::Git;
use anyhow::Result;

fn main() {
    if let Err(e) = run(Cli::parse_args()) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let git = Git::new(cli.verbose);
    match cli.command {
        Command::Split { base } => split::run(&git, base.as_deref())?,
        Command::Delete { branches, remotes } => delete::run(&git, &branches, &remotes)?,
        Command::All { args } => all::run(&git, &args)?,
    }
    Ok(())
}
