//! CLI argument parsing for sprig.
//!
//! Uses clap derive macros for declarative argument definitions. This
//! module defines the command structure; actual implementations are in the
//! `commands` module. Issue fields arrive as arguments because the issue
//! tracker client is a separate tool in the workflow.

use clap::{Args, Parser, Subcommand};

/// Sprig: link issue tracking to git branch management.
///
/// Given an issue, sprig finds or creates the one local branch that
/// represents work on it: existing branches are matched by a stable
/// prefix + issue id, renamed when the issue summary has changed, and
/// created from the remote base branch when nothing exists yet.
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for sprig.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the working branch for an issue.
    ///
    /// Searches local branches first, then the remote after a fetch, and
    /// finally creates a new branch from the remote base branch. Prints
    /// the resolved branch name.
    Resolve(ResolveArgs),

    /// Print the branch names computed for an issue.
    ///
    /// Shows the matching prefix and the canonical full name without
    /// touching the repository.
    Name(NameArgs),

    /// Print the issue id embedded in a branch name.
    ///
    /// Defaults to the currently checked-out branch when no name is given.
    IssueId(IssueIdArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Issue id (e.g. PROJ-42).
    pub id: String,

    /// Current issue summary, used for the branch name slug.
    #[arg(long)]
    pub summary: String,

    /// Issue type (e.g. Task, Bug), used by per-type prefix configurations.
    #[arg(long = "type")]
    pub issue_type: Option<String>,

    /// Base branch to fork from, overriding the configured one.
    #[arg(long, short = 'b')]
    pub base: Option<String>,

    /// Remote to search and fetch from, overriding the configured one.
    #[arg(long)]
    pub remote: Option<String>,

    /// Only find an existing branch; never create one.
    #[arg(long)]
    pub no_create: bool,

    /// Check the resolved branch out afterwards.
    #[arg(long)]
    pub checkout: bool,
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Issue id (e.g. PROJ-42).
    pub id: String,

    /// Current issue summary.
    #[arg(long)]
    pub summary: String,

    /// Issue type (e.g. Task, Bug).
    #[arg(long = "type")]
    pub issue_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct IssueIdArgs {
    /// Branch name to inspect; defaults to the branch at HEAD.
    pub branch: Option<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_parses_issue_fields() {
        let cli = Cli::try_parse_from([
            "sprig", "resolve", "PROJ-42", "--summary", "Fix login", "--type", "Bug",
        ])
        .unwrap();
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.id, "PROJ-42");
                assert_eq!(args.summary, "Fix login");
                assert_eq!(args.issue_type.as_deref(), Some("Bug"));
                assert!(!args.no_create);
                assert!(!args.checkout);
            }
            other => panic!("expected resolve, got {:?}", other),
        }
    }

    #[test]
    fn resolve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "sprig",
            "resolve",
            "PROJ-42",
            "--summary",
            "Fix login",
            "--base",
            "develop",
            "--remote",
            "upstream",
            "--no-create",
        ])
        .unwrap();
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.base.as_deref(), Some("develop"));
                assert_eq!(args.remote.as_deref(), Some("upstream"));
                assert!(args.no_create);
            }
            other => panic!("expected resolve, got {:?}", other),
        }
    }

    #[test]
    fn resolve_requires_summary() {
        assert!(Cli::try_parse_from(["sprig", "resolve", "PROJ-42"]).is_err());
    }

    #[test]
    fn issue_id_branch_is_optional() {
        let cli = Cli::try_parse_from(["sprig", "issue-id"]).unwrap();
        match cli.command {
            Command::IssueId(args) => assert!(args.branch.is_none()),
            other => panic!("expected issue-id, got {:?}", other),
        }
    }
}
