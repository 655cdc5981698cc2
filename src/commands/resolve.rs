//! Implementation of the `sprig resolve` command.
//!
//! Glues the pieces together: repository discovery, configuration, naming,
//! credentials, and the resolution engine. The engine itself never touches
//! the working tree; the optional checkout happens here, after resolution.

use crate::auth::Credentials;
use crate::cli::ResolveArgs;
use crate::config::Config;
use crate::error::Result;
use crate::issue::Issue;
use crate::naming::NamingStrategy;
use crate::repo::{BranchRef, GitRepo};
use crate::resolver::{BranchResolver, ResolveOptions};
use crate::status::{ConsoleReporter, StatusReporter};

/// Execute the `sprig resolve` command.
pub fn cmd_resolve(args: ResolveArgs) -> Result<()> {
    let repo = GitRepo::discover(".")?;
    let config = super::load_config()?;

    let issue = Issue::new(args.id.clone(), args.summary.clone(), args.issue_type.clone());
    println!("Resolving branch for {}: {}", issue.id, issue.cropped_summary(40));

    let mut reporter = ConsoleReporter;
    let resolved = execute(&repo, &config, &issue, &args, &mut reporter)?;

    match resolved {
        Some(branch) => {
            println!("{}", branch.name);
            if args.checkout {
                repo.checkout(&branch.name)?;
                println!("Checked out \"{}\"", branch.name);
            }
        }
        None => {
            println!(
                "No branch found for {} and creation is disabled (--no-create)",
                issue.id
            );
        }
    }
    Ok(())
}

/// Run the resolution described by `args` against `repo`.
///
/// Split out from [`cmd_resolve`] so the command wiring (config overrides,
/// credential lookup, create flag) is testable without owning a terminal.
fn execute(
    repo: &GitRepo,
    config: &Config,
    issue: &Issue,
    args: &ResolveArgs,
    reporter: &mut dyn StatusReporter,
) -> Result<Option<BranchRef>> {
    let naming = NamingStrategy::from_config(config)?;
    let credentials = Credentials::from_env();

    let opts = ResolveOptions {
        base_branch: args.base.as_deref().unwrap_or(&config.base_branch),
        remote_name: args.remote.as_deref().unwrap_or(&config.remote),
        credentials: &credentials,
        create: !args.no_create,
    };

    BranchResolver::new(repo, &naming).resolve(issue, &opts, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::RecordingReporter;
    use crate::test_support::{create_repo_pair, create_test_repo, git};

    fn args(id: &str, summary: &str) -> (Issue, ResolveArgs) {
        let issue = Issue::new(id, summary, None);
        let args = ResolveArgs {
            id: id.to_string(),
            summary: summary.to_string(),
            issue_type: None,
            base: None,
            remote: None,
            no_create: false,
            checkout: false,
        };
        (issue, args)
    }

    #[test]
    fn execute_resolves_with_config_defaults() {
        let (local_dir, _upstream_dir) = create_repo_pair();
        let repo = GitRepo::discover(local_dir.path()).unwrap();
        let config = Config::default();
        let (issue, resolve_args) = args("PROJ-42", "Fix login crash on Safari");

        let branch = execute(
            &repo,
            &config,
            &issue,
            &resolve_args,
            &mut RecordingReporter::default(),
        )
        .unwrap()
        .expect("branch should be created");

        assert_eq!(branch.name, "feature/PROJ-42_fix-login-crash-on-safari");
    }

    #[test]
    fn cli_overrides_beat_config_values() {
        let (local_dir, upstream_dir) = create_repo_pair();
        git(upstream_dir.path(), &["branch", "develop"]);

        let repo = GitRepo::discover(local_dir.path()).unwrap();
        // Point the config at a base branch that does not exist so the test
        // fails loudly if the override is ignored.
        let config = Config {
            base_branch: "missing".to_string(),
            ..Config::default()
        };

        let (issue, mut resolve_args) = args("PROJ-1", "Try the override");
        resolve_args.base = Some("develop".to_string());

        let branch = execute(
            &repo,
            &config,
            &issue,
            &resolve_args,
            &mut RecordingReporter::default(),
        )
        .unwrap()
        .expect("branch should be created off the override base");
        assert_eq!(branch.name, "feature/PROJ-1_try-the-override");
    }

    #[test]
    fn no_create_flag_disables_creation() {
        let (local_dir, _upstream_dir) = create_repo_pair();
        let repo = GitRepo::discover(local_dir.path()).unwrap();
        let config = Config::default();

        let (issue, mut resolve_args) = args("PROJ-2", "Nothing exists");
        resolve_args.no_create = true;

        let result = execute(
            &repo,
            &config,
            &issue,
            &resolve_args,
            &mut RecordingReporter::default(),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn existing_local_branch_skips_the_remote_entirely() {
        // No remote configured; a unique local match must still resolve.
        let temp_dir = create_test_repo();
        git(temp_dir.path(), &["branch", "feature/PROJ-3_old-summary"]);

        let repo = GitRepo::discover(temp_dir.path()).unwrap();
        let config = Config::default();
        let (issue, resolve_args) = args("PROJ-3", "New summary");

        let branch = execute(
            &repo,
            &config,
            &issue,
            &resolve_args,
            &mut RecordingReporter::default(),
        )
        .unwrap()
        .expect("local branch should resolve");
        assert_eq!(branch.name, "feature/PROJ-3_new-summary");
    }
}
