//! Command implementations for sprig.
//!
//! Provides the dispatcher that routes CLI commands to their
//! implementations, plus the small commands that live here directly.

mod resolve;

use crate::cli::{Command, IssueIdArgs, NameArgs};
use crate::config::Config;
use crate::error::Result;
use crate::issue::Issue;
use crate::naming::NamingStrategy;
use crate::repo::GitRepo;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Resolve(args) => resolve::cmd_resolve(args),
        Command::Name(args) => cmd_name(args),
        Command::IssueId(args) => cmd_issue_id(args),
    }
}

/// Load the config for the repository around the current directory, or
/// defaults when run outside any repository.
pub(crate) fn load_config() -> Result<Config> {
    match GitRepo::discover(".") {
        Ok(repo) => {
            let root = repo.workdir().map(Path::to_path_buf);
            match root {
                Some(root) => Config::load_or_default(root),
                None => Ok(Config::default()),
            }
        }
        Err(_) => Ok(Config::default()),
    }
}

/// Print the names computed for an issue without touching the repository.
fn cmd_name(args: NameArgs) -> Result<()> {
    let config = load_config()?;
    let naming = NamingStrategy::from_config(&config)?;
    let issue = Issue::new(args.id, args.summary, args.issue_type);

    let name = naming.compute_name(&issue)?;
    println!("discriminator: {}", name.discriminator);
    println!("branch:        {}", name.full_name);
    Ok(())
}

/// Print the issue id embedded in a branch name.
fn cmd_issue_id(args: IssueIdArgs) -> Result<()> {
    let config = load_config()?;
    let naming = NamingStrategy::from_config(&config)?;

    let id = match args.branch {
        Some(branch) => naming.extract_issue_id(&branch)?,
        None => {
            let repo = GitRepo::discover(".")?;
            let head = repo.head_branch()?;
            naming.extract_issue_id(&head)?
        }
    };
    println!("{}", id);
    Ok(())
}
