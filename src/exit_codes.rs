//! Exit code constants for the sprig CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, not a repository)
//! - 2: Ambiguous branch match requiring manual cleanup
//! - 3: Git operation failure
//! - 4: Network or authentication failure during fetch

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or not inside a repository.
pub const USER_ERROR: i32 = 1;

/// More than one branch matched an issue; the user must remove all but one.
pub const AMBIGUOUS_BRANCH: i32 = 2;

/// Git operation failure: lookup, rename, or branch creation errors.
pub const GIT_FAILURE: i32 = 3;

/// Fetch failed: the remote rejected our credentials or was unreachable.
pub const NETWORK_FAILURE: i32 = 4;
