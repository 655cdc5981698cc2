//! Branch naming strategy.
//!
//! Maps an issue to the pair of names the resolver works with:
//!
//! - the *discriminator*, a stable `prefix + issue id + "_"` string used to
//!   find every candidate branch for an issue regardless of summary text;
//! - the *full name*, the discriminator plus a slugified excerpt of the
//!   current summary, which is the target name for the resolved branch.
//!
//! The discriminator never changes for a given issue id and configuration;
//! the full name follows the summary. The mapping is pure: computing names
//! never touches the repository.

use crate::config::Config;
use crate::error::{Result, SprigError};
use crate::issue::Issue;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Separator between the issue id and the summary slug.
const SEPARATOR: char = '_';

/// Issue ids follow the tracker's `KEY-123` shape. Used when inverting a
/// branch name back to an issue id.
fn issue_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z0-9]*-[0-9]+)_").unwrap())
}

/// How the branch prefix for an issue is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    /// One prefix for every issue (e.g. "feature/").
    Fixed(String),
    /// Prefix chosen by issue type, with an optional fallback for types
    /// that have no entry of their own.
    TypeMapped {
        map: BTreeMap<String, String>,
        default: Option<String>,
    },
}

impl Prefix {
    /// Parse the comma-separated `Type:prefix` list form, e.g.
    /// `"Bug:bugfix/,Task:feature/,misc/"`. An entry without a colon is the
    /// fallback prefix for unmapped types; at most one is allowed.
    pub fn parse_map(spec: &str) -> Result<Self> {
        let mut map = BTreeMap::new();
        let mut default = None;

        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            match entry.split_once(':') {
                Some((issue_type, prefix)) => {
                    map.insert(issue_type.trim().to_string(), prefix.trim().to_string());
                }
                None => {
                    if default.replace(entry.to_string()).is_some() {
                        return Err(SprigError::Configuration(format!(
                            "branch_prefix_map has more than one default entry: '{}'",
                            spec
                        )));
                    }
                }
            }
        }

        if map.is_empty() && default.is_none() {
            return Err(SprigError::Configuration(
                "branch_prefix_map is empty".to_string(),
            ));
        }

        Ok(Prefix::TypeMapped { map, default })
    }

    /// The prefix to use for this issue.
    fn for_issue(&self, issue: &Issue) -> Result<&str> {
        match self {
            Prefix::Fixed(prefix) => Ok(prefix),
            Prefix::TypeMapped { map, default } => {
                if let Some(issue_type) = &issue.issue_type {
                    if let Some(prefix) = map.get(issue_type) {
                        return Ok(prefix);
                    }
                }
                default.as_deref().ok_or_else(|| {
                    SprigError::Configuration(format!(
                        "no branch prefix configured for issue type \"{}\" and no default entry exists",
                        issue.issue_type.as_deref().unwrap_or("<none>")
                    ))
                })
            }
        }
    }

    /// Every prefix this configuration can produce, for reverse lookups.
    fn all(&self) -> Vec<&str> {
        match self {
            Prefix::Fixed(prefix) => vec![prefix.as_str()],
            Prefix::TypeMapped { map, default } => {
                let mut prefixes: Vec<&str> = map.values().map(String::as_str).collect();
                if let Some(default) = default {
                    prefixes.push(default.as_str());
                }
                prefixes.sort_unstable();
                prefixes.dedup();
                prefixes
            }
        }
    }
}

/// The two names computed for an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName {
    /// Stable matching prefix: `prefix + issue id + "_"`.
    pub discriminator: String,
    /// Canonical branch name: discriminator + summary slug.
    pub full_name: String,
}

/// Computes branch names from issues and inverts them back to issue ids.
#[derive(Debug, Clone)]
pub struct NamingStrategy {
    prefix: Prefix,
    slug_max_length: usize,
}

impl NamingStrategy {
    pub fn new(prefix: Prefix, slug_max_length: usize) -> Self {
        Self {
            prefix,
            slug_max_length,
        }
    }

    /// Build the strategy described by a config: `branch_prefix_map` wins
    /// over the fixed `branch_prefix` when both are present.
    pub fn from_config(config: &Config) -> Result<Self> {
        let prefix = match &config.branch_prefix_map {
            Some(spec) => Prefix::parse_map(spec)?,
            None => Prefix::Fixed(config.branch_prefix.clone()),
        };
        Ok(Self::new(prefix, config.slug_max_length))
    }

    /// Compute the discriminator and full name for an issue.
    pub fn compute_name(&self, issue: &Issue) -> Result<BranchName> {
        let prefix = self.prefix.for_issue(issue)?;
        let discriminator = format!("{}{}{}", prefix, issue.id, SEPARATOR);
        let slug = slugify(&issue.summary, self.slug_max_length);
        let full_name = format!("{}{}", discriminator, slug);
        Ok(BranchName {
            discriminator,
            full_name,
        })
    }

    /// Invert a branch name back to the issue id embedded in it.
    ///
    /// Tries every configured prefix; the branch must start with one of them
    /// and carry a `KEY-123`-shaped id up to the separator.
    pub fn extract_issue_id(&self, branch_name: &str) -> Result<String> {
        for prefix in self.prefix.all() {
            if let Some(rest) = branch_name.strip_prefix(prefix) {
                if let Some(captures) = issue_id_pattern().captures(rest) {
                    return Ok(captures[1].to_string());
                }
            }
        }
        Err(SprigError::NotFound(format!(
            "branch '{}' does not carry an issue id under any configured prefix",
            branch_name
        )))
    }
}

/// Turn free text into a branch-name slug.
///
/// Lower-cases, collapses every non-alphanumeric run into a single `-`, and
/// trims leading/trailing separators. The input is cut to `max_len`
/// characters before slugification so branch names stay usable in terminals.
fn slugify(text: &str, max_len: usize) -> String {
    let truncated: String = text.chars().take(max_len).collect();

    let mut slug = String::new();
    let mut last_was_separator = true; // suppresses a leading separator
    for c in truncated.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator {
            slug.push('-');
            last_was_separator = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
