//! Repository access facade.
//!
//! Wraps a single git working copy behind the handful of operations branch
//! resolution needs: branch enumeration and lookup (local and
//! remote-tracking), rename, create-at-commit, remote lookup, and
//! authenticated fetch. All side effects stay inside the ref database; no
//! resolver path ever touches the working tree. Checkout exists as a
//! separate caller-side operation for the CLI to run after resolution.

use crate::auth::Credentials;
use crate::error::{Result, SprigError};
use git2::{BranchType, Cred, CredentialType, ErrorCode, FetchOptions, Oid, RemoteCallbacks};
use std::path::Path;

/// Which ref namespace a branch lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// A branch under `refs/heads/`.
    Local,
    /// A remote-tracking branch under `refs/remotes/`, named with its
    /// remote segment (e.g. `origin/feature/ABC-1_fix`).
    RemoteTracking,
}

impl BranchKind {
    fn to_git2(self) -> BranchType {
        match self {
            BranchKind::Local => BranchType::Local,
            BranchKind::RemoteTracking => BranchType::Remote,
        }
    }
}

/// A branch as seen by the resolver: short name, namespace, and the commit
/// it currently points at. Plain data; holding one does not pin any
/// repository state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub kind: BranchKind,
    /// Hex id of the commit the branch points at.
    pub target: String,
}

/// One git working copy.
pub struct GitRepo {
    inner: git2::Repository,
}

impl GitRepo {
    /// Open the repository containing `path`, searching upward the way git
    /// itself does.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = git2::Repository::discover(path.as_ref()).map_err(|_| {
            SprigError::UserError(
                "not inside a git repository. Run this command from within a git repository."
                    .to_string(),
            )
        })?;
        Ok(Self { inner })
    }

    /// Root of the working tree, absent for bare repositories.
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Enumerate branches of one kind. Order is unspecified; callers sort
    /// or filter as needed.
    pub fn list_branches(&self, kind: BranchKind) -> Result<Vec<BranchRef>> {
        let branches = self
            .inner
            .branches(Some(kind.to_git2()))
            .map_err(git_err)?;

        let mut refs = Vec::new();
        for entry in branches {
            let (branch, _) = entry.map_err(git_err)?;
            if let Some(branch_ref) = to_branch_ref(&branch, kind)? {
                refs.push(branch_ref);
            }
        }
        Ok(refs)
    }

    /// Look up a branch by its short name.
    pub fn lookup_branch(&self, name: &str, kind: BranchKind) -> Result<Option<BranchRef>> {
        match self.inner.find_branch(name, kind.to_git2()) {
            Ok(branch) => to_branch_ref(&branch, kind),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(git_err(e)),
        }
    }

    /// Rename a local branch in place.
    ///
    /// Fails with [`SprigError::Conflict`] when a branch named `new_name`
    /// already exists; the existing branch is never overwritten.
    pub fn rename_branch(&self, branch: &BranchRef, new_name: &str) -> Result<BranchRef> {
        let mut current = self
            .inner
            .find_branch(&branch.name, BranchType::Local)
            .map_err(|e| {
                SprigError::Git(format!(
                    "cannot rename '{}': {}",
                    branch.name,
                    e.message()
                ))
            })?;

        match current.rename(new_name, false) {
            Ok(renamed) => to_branch_ref(&renamed, BranchKind::Local)?.ok_or_else(|| {
                SprigError::Git(format!("renamed branch '{}' has no valid name", new_name))
            }),
            Err(e) if e.code() == ErrorCode::Exists => Err(SprigError::Conflict(format!(
                "cannot rename branch '{}' to '{}': a branch with that name already exists",
                branch.name, new_name
            ))),
            Err(e) => Err(git_err(e)),
        }
    }

    /// Create a local branch pointing at `from_commit`.
    ///
    /// The new branch is an independent ref: no tracking relationship is
    /// set up even when the commit came from a remote-tracking branch.
    pub fn create_branch(&self, name: &str, from_commit: &str) -> Result<BranchRef> {
        let oid = Oid::from_str(from_commit).map_err(|e| {
            SprigError::Git(format!("invalid commit id '{}': {}", from_commit, e.message()))
        })?;
        let commit = self.inner.find_commit(oid).map_err(|e| {
            SprigError::Git(format!("commit '{}' not found: {}", from_commit, e.message()))
        })?;

        match self.inner.branch(name, &commit, false) {
            Ok(branch) => to_branch_ref(&branch, BranchKind::Local)?.ok_or_else(|| {
                SprigError::Git(format!("created branch '{}' has no valid name", name))
            }),
            Err(e) if e.code() == ErrorCode::Exists => Err(SprigError::Conflict(format!(
                "branch '{}' already exists",
                name
            ))),
            Err(e) => Err(git_err(e)),
        }
    }

    /// Look up a configured remote by name.
    pub fn lookup_remote(&self, name: &str) -> Result<Option<RemoteHandle<'_>>> {
        match self.inner.find_remote(name) {
            Ok(remote) => Ok(Some(RemoteHandle {
                inner: remote,
                name: name.to_string(),
            })),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(git_err(e)),
        }
    }

    /// Short name of the branch HEAD points at.
    pub fn head_branch(&self) -> Result<String> {
        if self.inner.head_detached().map_err(git_err)? {
            return Err(SprigError::UserError(
                "HEAD is detached; pass a branch name explicitly".to_string(),
            ));
        }
        let head = self.inner.head().map_err(git_err)?;
        head.shorthand()
            .map(String::from)
            .ok_or_else(|| SprigError::Git("HEAD name is not valid utf-8".to_string()))
    }

    /// Check out a local branch into the working tree.
    ///
    /// This is a caller-side operation run after resolution; branch
    /// resolution itself never calls it.
    pub fn checkout(&self, branch_name: &str) -> Result<()> {
        let refname = format!("refs/heads/{}", branch_name);
        let target = self.inner.revparse_single(&refname).map_err(|e| {
            SprigError::Git(format!(
                "cannot check out '{}': {}",
                branch_name,
                e.message()
            ))
        })?;

        let mut builder = git2::build::CheckoutBuilder::new();
        builder.safe();
        self.inner
            .checkout_tree(&target, Some(&mut builder))
            .map_err(|e| {
                SprigError::Git(format!(
                    "cannot check out '{}': {}",
                    branch_name,
                    e.message()
                ))
            })?;
        self.inner.set_head(&refname).map_err(git_err)
    }
}

/// A configured remote, ready to fetch from.
pub struct RemoteHandle<'repo> {
    inner: git2::Remote<'repo>,
    name: String,
}

impl RemoteHandle<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch using the remote's configured refspecs.
    ///
    /// Credentials are consumed for this one transfer and not retained.
    /// Authentication rejections and transport failures surface as
    /// [`SprigError::Authentication`] and [`SprigError::Network`]; no retry
    /// happens at this layer.
    pub fn fetch(&mut self, credentials: &Credentials) -> Result<()> {
        let creds = credentials.clone();
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed| match &creds {
            Credentials::UserPass { username, password } => {
                Cred::userpass_plaintext(username, password)
            }
            Credentials::SshAgent { username } => {
                let user = username.as_deref().or(username_from_url).unwrap_or("git");
                Cred::ssh_key_from_agent(user)
            }
            Credentials::Default => {
                if allowed.contains(CredentialType::SSH_KEY) {
                    let user = username_from_url.unwrap_or("git");
                    return Cred::ssh_key_from_agent(user);
                }
                if let Ok(config) = git2::Config::open_default() {
                    if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                        return Ok(cred);
                    }
                }
                Cred::default()
            }
        });

        let mut opts = FetchOptions::new();
        opts.remote_callbacks(callbacks);

        self.inner
            .fetch(&[] as &[&str], Some(&mut opts), None)
            .map_err(|e| fetch_err(&self.name, e))
    }
}

fn to_branch_ref(branch: &git2::Branch<'_>, kind: BranchKind) -> Result<Option<BranchRef>> {
    let Some(name) = branch.name().map_err(git_err)? else {
        // Branch name is not valid utf-8; such refs cannot have been
        // produced by the naming strategy, so they are skipped.
        return Ok(None);
    };
    let name = name.to_string();
    let commit = branch.get().peel_to_commit().map_err(git_err)?;
    Ok(Some(BranchRef {
        name,
        kind,
        target: commit.id().to_string(),
    }))
}

fn git_err(e: git2::Error) -> SprigError {
    SprigError::Git(e.message().to_string())
}

fn fetch_err(remote: &str, e: git2::Error) -> SprigError {
    if e.code() == ErrorCode::Auth {
        SprigError::Authentication {
            remote: remote.to_string(),
            message: e.message().to_string(),
        }
    } else {
        SprigError::Network {
            remote: remote.to_string(),
            message: e.message().to_string(),
        }
    }
}
