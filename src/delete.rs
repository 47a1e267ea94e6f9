use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::Git;
use crate::{status, warning};

/// delete branches locally and on each named remote
///
/// every check runs before the first mutating call
pub fn run(git: &Git, branches: &[String], remotes: &[String]) -> Result<()> {
    let root = git.require_repository()?;
    let config = Config::load(Some(&root));

    let protected = overlap(branches, &config.protected_branches());
    if !protected.is_empty() {
        return Err(Error::InvalidState(format!(
            "The branches {} are protected",
            protected.join(", ")
        )));
    }
    let protected = overlap(remotes, &config.protected_remotes());
    if !protected.is_empty() {
        return Err(Error::InvalidState(format!(
            "The remotes {} are protected",
            protected.join(", ")
        )));
    }

    let known = git.remotes()?;
    let unknown: Vec<&str> = remotes
        .iter()
        .filter(|remote| !known.contains(remote))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(Error::InvalidState(format!(
            "Unknown remotes: {}",
            unknown.join(", ")
        )));
    }

    let existing = git.branches()?;
    let to_delete: Vec<String> = branches
        .iter()
        .filter(|branch| existing.contains(branch))
        .cloned()
        .collect();
    for missing in branches.iter().filter(|branch| !existing.contains(branch)) {
        warning!("no local branch named '{missing}'");
    }
    if !existing.is_empty() && to_delete.len() == existing.len() {
        return Err(Error::InvalidState(
            "This would delete all the branches".to_string(),
        ));
    }

    // step off a doomed branch before deleting it
    if let Ok(current) = git.current_branch()
        && to_delete.contains(&current)
    {
        let survivor = existing
            .iter()
            .find(|branch| !to_delete.contains(branch))
            .expect("the delete-all check leaves at least one branch");
        git.run(&["checkout", "--quiet", survivor])?;
    }

    let mut count = to_delete.len();
    if !to_delete.is_empty() {
        let mut args = vec!["branch", "-D"];
        args.extend(to_delete.iter().map(String::as_str));
        git.run(&args)?;
    }

    for remote in remotes {
        git.run(&["fetch", remote])?;
        let remote_branches = git.remote_branches()?;
        let on_remote: Vec<&str> = branches
            .iter()
            .filter(|branch| remote_branches.contains(&format!("{remote}/{branch}")))
            .map(String::as_str)
            .collect();
        if !on_remote.is_empty() {
            let mut args = vec!["push", remote.as_str(), "--delete"];
            args.extend(on_remote.iter().copied());
            git.run(&args)?;
            count += on_remote.len();
        }
    }

    status!(
        "deleted {count} branch{}",
        if count == 1 { "" } else { "es" }
    );
    Ok(())
}

fn overlap(requested: &[String], protected: &[String]) -> Vec<String> {
    requested
        .iter()
        .filter(|name| protected.contains(name))
        .cloned()
        .collect()
}
