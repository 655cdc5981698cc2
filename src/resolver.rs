//! Branch resolution engine.
//!
//! Given an issue, find or create the one local branch that represents work
//! on it. Candidate branches are matched by discriminator (stable
//! prefix + issue id), so a branch keeps belonging to its issue even after
//! the issue summary (and therefore the canonical branch name) has moved
//! on. Resolution runs through fixed stages:
//!
//! 1. Search local branches. A unique match is the working branch; if its
//!    name has drifted from the canonical full name it is renamed first.
//! 2. With no local match, look up the configured remote, fetch from it,
//!    and search the remote-tracking branches. A unique match is
//!    materialized as a new local branch at the same commit.
//! 3. With no remote match either, either report absence (`create` off) or
//!    fork a new branch from the remote base branch.
//!
//! Any stage that sees more than one candidate fails; ambiguity is never
//! resolved by guessing, because silently picking a branch risks working
//! on, or discarding, the wrong line of history. Every result is computed
//! fresh per call; nothing is cached between resolutions.

use crate::auth::Credentials;
use crate::error::{Result, SprigError};
use crate::issue::Issue;
use crate::naming::NamingStrategy;
use crate::repo::{BranchKind, BranchRef, GitRepo};
use crate::status::StatusReporter;

/// Per-call inputs for a resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions<'a> {
    /// Integration branch to fork from when nothing exists yet.
    pub base_branch: &'a str,
    /// Remote to search and fetch from.
    pub remote_name: &'a str,
    /// Credentials for the fetch; consumed for this call only.
    pub credentials: &'a Credentials,
    /// Whether a missing branch may be created from the base branch.
    pub create: bool,
}

/// Resolves issues to local branches against one repository.
pub struct BranchResolver<'a> {
    repo: &'a GitRepo,
    naming: &'a NamingStrategy,
}

impl<'a> BranchResolver<'a> {
    pub fn new(repo: &'a GitRepo, naming: &'a NamingStrategy) -> Self {
        Self { repo, naming }
    }

    /// Resolve the working branch for `issue`.
    ///
    /// Returns `Ok(Some(branch))` on success, `Ok(None)` when no branch
    /// exists anywhere and `opts.create` is off. The repository is left
    /// untouched on every failure path: the rename happens only after a
    /// unique local match is confirmed, and branches are created only after
    /// their source commit has been confirmed to exist.
    pub fn resolve(
        &self,
        issue: &Issue,
        opts: &ResolveOptions<'_>,
        reporter: &mut dyn StatusReporter,
    ) -> Result<Option<BranchRef>> {
        let name = self.naming.compute_name(issue)?;

        // Stage 1: local branches.
        let mut locals = self.local_candidates(&name.discriminator)?;
        if locals.len() > 1 {
            return Err(SprigError::AmbiguousBranch {
                discriminator: name.discriminator,
                candidates: locals.into_iter().map(|b| b.name).collect(),
            });
        }
        if let Some(branch) = locals.pop() {
            if branch.name != name.full_name {
                // Summary drift: the issue summary changed after the branch
                // was created. The sole match is the working branch, so
                // rename it to the canonical name.
                let renamed = self.repo.rename_branch(&branch, &name.full_name)?;
                reporter.ok(&format!(
                    "Renamed branch \"{}\" to \"{}\"",
                    branch.name, renamed.name
                ));
                return Ok(Some(renamed));
            }
            return Ok(Some(branch));
        }

        // Stage 2: nothing local; consult the remote.
        reporter.start(&format!("Fetching from \"{}\"", opts.remote_name));
        let Some(mut remote) = self.repo.lookup_remote(opts.remote_name)? else {
            reporter.fail(&format!("Remote \"{}\" not found", opts.remote_name));
            return Err(SprigError::RemoteNotFound(opts.remote_name.to_string()));
        };
        if let Err(e) = remote.fetch(opts.credentials) {
            reporter.fail(&format!("Fetch from \"{}\" failed", opts.remote_name));
            return Err(e);
        }
        reporter.ok(&format!(
            "Fetched latest changes from \"{}\"",
            remote.name()
        ));

        let mut remotes = self.remote_candidates(&name.discriminator, opts.remote_name)?;
        if remotes.len() > 1 {
            return Err(SprigError::AmbiguousBranch {
                discriminator: name.discriminator,
                candidates: remotes.into_iter().map(|b| b.name).collect(),
            });
        }
        if let Some(candidate) = remotes.pop() {
            // The local namespace was empty for this discriminator, but a
            // same-named branch from another source would be silently
            // shadowed by the create below. Refuse instead of guessing which
            // side is authoritative.
            if self
                .repo
                .lookup_branch(&name.full_name, BranchKind::Local)?
                .is_some()
            {
                return Err(SprigError::Conflict(format!(
                    "local branch '{}' already exists but does not belong to issue {}; \
                     remove or rename it to continue",
                    name.full_name, issue.id
                )));
            }
            let branch = self.repo.create_branch(&name.full_name, &candidate.target)?;
            reporter.ok("Created new working branch based on existing remote branch");
            return Ok(Some(branch));
        }

        // Stage 3: nothing anywhere.
        if !opts.create {
            return Ok(None);
        }
        let base_name = format!("{}/{}", opts.remote_name, opts.base_branch);
        let Some(base) = self
            .repo
            .lookup_branch(&base_name, BranchKind::RemoteTracking)?
        else {
            reporter.fail(&format!(
                "Base branch \"{}\" not found on remote \"{}\"",
                opts.base_branch, opts.remote_name
            ));
            return Err(SprigError::BaseBranchNotFound {
                branch: opts.base_branch.to_string(),
                remote: opts.remote_name.to_string(),
            });
        };
        let branch = self.repo.create_branch(&name.full_name, &base.target)?;
        reporter.ok(&format!("Created new working branch off \"{}\"", base_name));
        Ok(Some(branch))
    }

    /// Local branches whose name starts with the discriminator, sorted for
    /// deterministic reporting.
    fn local_candidates(&self, discriminator: &str) -> Result<Vec<BranchRef>> {
        let mut candidates: Vec<BranchRef> = self
            .repo
            .list_branches(BranchKind::Local)?
            .into_iter()
            .filter(|b| b.name.starts_with(discriminator))
            .collect();
        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candidates)
    }

    /// Remote-tracking branches of `remote_name` whose short name (remote
    /// segment stripped) starts with the discriminator.
    fn remote_candidates(&self, discriminator: &str, remote_name: &str) -> Result<Vec<BranchRef>> {
        let remote_prefix = format!("{}/", remote_name);
        let mut candidates: Vec<BranchRef> = self
            .repo
            .list_branches(BranchKind::RemoteTracking)?
            .into_iter()
            .filter(|b| {
                b.name
                    .strip_prefix(&remote_prefix)
                    .is_some_and(|short| short.starts_with(discriminator))
            })
            .collect();
        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candidates)
    }
}
