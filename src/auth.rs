//! Credential values consumed by authenticated fetch.
//!
//! sprig treats credential acquisition as an external concern: whatever
//! supplies them (keyring, agent, prompt) runs outside the engine, and the
//! resolver only ever passes the finished value through to the repository
//! facade. Nothing here is cached between calls.

use std::env;

/// Environment variable holding the username for HTTPS remotes.
pub const USERNAME_VAR: &str = "SPRIG_GIT_USERNAME";

/// Environment variable holding the password or token for HTTPS remotes.
pub const PASSWORD_VAR: &str = "SPRIG_GIT_PASSWORD";

/// Environment variable forcing ssh-agent authentication under this user.
pub const SSH_USER_VAR: &str = "SPRIG_GIT_SSH_USER";

/// Opaque credential value handed to fetch.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// Let git decide: ssh-agent for SSH remotes, then the configured
    /// credential helper, then anonymous access.
    #[default]
    Default,
    /// Authenticate through a running ssh-agent, optionally overriding the
    /// username baked into the remote URL.
    SshAgent { username: Option<String> },
    /// Explicit username/password (or token) for HTTPS remotes.
    UserPass { username: String, password: String },
}

impl Credentials {
    /// Credentials from the process environment, falling back to
    /// [`Credentials::Default`] when nothing explicit is configured.
    ///
    /// A username/password pair wins over a forced ssh-agent user.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var(USERNAME_VAR).ok(),
            env::var(PASSWORD_VAR).ok(),
            env::var(SSH_USER_VAR).ok(),
        )
    }

    fn from_vars(
        username: Option<String>,
        password: Option<String>,
        ssh_user: Option<String>,
    ) -> Self {
        match (username, password, ssh_user) {
            (Some(username), Some(password), _) => Credentials::UserPass { username, password },
            (_, _, Some(user)) => Credentials::SshAgent {
                username: Some(user),
            },
            _ => Credentials::Default,
        }
    }
}
