//! Error types for the sprig CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error
//! messages. Every failure carries enough context (branch names, remote
//! names, issue types) for the user to act on it; nothing is swallowed.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for sprig operations.
///
/// Each variant maps to a specific exit code via [`SprigError::exit_code`].
#[derive(Error, Debug)]
pub enum SprigError {
    /// User provided invalid arguments or the system is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// The naming configuration cannot classify an issue.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// More than one branch matched an issue's discriminator.
    ///
    /// Never resolved automatically: silently picking a branch risks working
    /// on, or discarding, the wrong line of history.
    #[error("{}", ambiguous_message(.discriminator, .candidates))]
    AmbiguousBranch {
        discriminator: String,
        candidates: Vec<String>,
    },

    /// The configured remote does not exist in this repository.
    #[error(
        "remote '{0}' not found.\n\n\
         To fix this, either:\n\
         1. Set a different remote in .sprig.yaml (remote: <name>)\n\
         2. Add the remote: git remote add {0} <url>"
    )]
    RemoteNotFound(String),

    /// The remote-tracking base branch to fork from does not exist.
    #[error(
        "base branch '{branch}' not found on remote '{remote}'.\n\n\
         Make sure the branch exists on the remote and has been fetched,\n\
         or set a different base branch in .sprig.yaml (base_branch: <name>)."
    )]
    BaseBranchNotFound { branch: String, remote: String },

    /// The remote rejected the supplied credentials.
    #[error("authentication failed while fetching from '{remote}': {message}")]
    Authentication { remote: String, message: String },

    /// The remote could not be reached or the transfer failed.
    #[error("fetch from '{remote}' failed: {message}")]
    Network { remote: String, message: String },

    /// A branch that was about to be created or renamed to already exists.
    #[error("{0}")]
    Conflict(String),

    /// A reverse lookup (branch name to issue id) found nothing.
    #[error("{0}")]
    NotFound(String),

    /// Git object-database operation failed.
    #[error("git operation failed: {0}")]
    Git(String),
}

impl SprigError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SprigError::UserError(_) => exit_codes::USER_ERROR,
            SprigError::Configuration(_) => exit_codes::USER_ERROR,
            SprigError::NotFound(_) => exit_codes::USER_ERROR,
            SprigError::AmbiguousBranch { .. } => exit_codes::AMBIGUOUS_BRANCH,
            SprigError::RemoteNotFound(_) => exit_codes::GIT_FAILURE,
            SprigError::BaseBranchNotFound { .. } => exit_codes::GIT_FAILURE,
            SprigError::Conflict(_) => exit_codes::GIT_FAILURE,
            SprigError::Git(_) => exit_codes::GIT_FAILURE,
            SprigError::Authentication { .. } => exit_codes::NETWORK_FAILURE,
            SprigError::Network { .. } => exit_codes::NETWORK_FAILURE,
        }
    }
}

/// Result type alias for sprig operations.
pub type Result<T> = std::result::Result<T, SprigError>;

fn ambiguous_message(discriminator: &str, candidates: &[String]) -> String {
    let mut msg = format!(
        "multiple branches match the prefix '{}':\n\n",
        discriminator
    );
    for name in candidates {
        msg.push_str(&format!("  * {}\n", name));
    }
    msg.push_str("\nRemove all but one in order to continue.");
    msg
}
