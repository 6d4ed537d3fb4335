//! Fill omitted command arguments from the git context.
//!
//! Each function only touches the [`GitContext`] when the explicit value is
//! missing, so callers that pass everything never need a repository.

use crate::config::Config;
use crate::error::GhopperError;
use crate::git::GitContext;
use crate::links::normalize_remote_url;

/// Alias given on the command line, or the one whose URL matches the current remote
pub fn resolve_alias(
    explicit: Option<String>,
    config: &Config,
    git: &dyn GitContext,
) -> Result<String, GhopperError> {
    match explicit {
        Some(alias) if alias.trim().is_empty() => {
            return Err(GhopperError::InvalidArgument("alias must not be empty".into()))
        }
        Some(alias) => return Ok(alias),
        None => {}
    }

    let remote = git.remote_url()?;
    let alias = config.find_alias_by_url(&remote).ok_or_else(|| {
        GhopperError::NotFound(format!(
            "Alias for remote {}",
            normalize_remote_url(&remote)
        ))
    })?;
    log::debug!("Inferred alias '{}' from remote {}", alias, remote);
    Ok(alias.to_string())
}

/// Head branch given with `--from`, or the checked-out branch
pub fn resolve_head_branch(
    explicit: Option<String>,
    git: &dyn GitContext,
) -> Result<String, GhopperError> {
    match explicit {
        Some(branch) if branch.is_empty() => Err(GhopperError::InvalidArgument(
            "--from must not be empty".into(),
        )),
        Some(branch) => Ok(branch),
        None => {
            let branch = git.current_branch()?;
            log::debug!("Using current branch '{}'", branch);
            Ok(branch)
        }
    }
}

/// Repository URL given with `--url`, or the current remote as an https URL
pub fn resolve_repo_url(
    explicit: Option<String>,
    git: &dyn GitContext,
) -> Result<String, GhopperError> {
    match explicit {
        Some(url) if url.trim().is_empty() => Err(GhopperError::InvalidArgument(
            "--url must not be empty".into(),
        )),
        Some(url) => Ok(url),
        None => Ok(normalize_remote_url(&git.remote_url()?)),
    }
}

/// Split `pr`'s positionals: `[alias] <branch-key>`
pub fn split_pr_args(first: String, second: Option<String>) -> (Option<String>, String) {
    match second {
        Some(key) => (Some(first), key),
        None => (None, first),
    }
}
