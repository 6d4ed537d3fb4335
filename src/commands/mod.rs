//! One function per subcommand.
//!
//! Every command runs the same way: validate the input, resolve defaults,
//! load (and maybe save) the config, build the output, then emit it.

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;

use crate::browser::{emit_url, OpenMode};
use crate::config::{Branches, ConfigStore};
use crate::error::GhopperError;
use crate::git::GitContext;
use crate::links::{compare_url, repo_view_url};
use crate::output::{format_branches, format_repo_list};
use crate::resolve::{resolve_alias, resolve_head_branch, resolve_repo_url, split_pr_args};

/// Branch roles settable from the command line
#[derive(Args, Debug, Clone, Default)]
pub struct BranchFlags {
    /// Production branch
    #[arg(long, value_name = "BRANCH")]
    pub prod: Option<String>,

    /// Development branch
    #[arg(long, value_name = "BRANCH")]
    pub dev: Option<String>,

    /// Pre-production branch
    #[arg(long, value_name = "BRANCH")]
    pub pre: Option<String>,
}

impl BranchFlags {
    /// Roles that were supplied, in prod/dev/pre order
    pub fn into_branches(self) -> Result<Branches, GhopperError> {
        let mut branches = Branches::new();
        for (role, value) in [("prod", self.prod), ("dev", self.dev), ("pre", self.pre)] {
            match value {
                Some(branch) if branch.trim().is_empty() => {
                    return Err(GhopperError::InvalidArgument(format!(
                        "--{} must not be empty",
                        role
                    )))
                }
                Some(branch) => {
                    branches.insert(role.to_string(), branch);
                }
                None => {}
            }
        }
        Ok(branches)
    }
}

/// Everything a command needs from the outside world
pub struct Session<'a> {
    pub store: ConfigStore,
    pub git: &'a dyn GitContext,
    pub open_mode: OpenMode,
    pub use_colors: bool,
}

/// `view [alias]`
pub fn view(session: &Session, alias: Option<String>, out: &mut dyn Write) -> Result<()> {
    let config = session.store.load()?;
    let alias = resolve_alias(alias, &config, session.git)?;
    let entry = config.get_repo(&alias)?;

    let url = repo_view_url(&entry.url);
    emit_url(&url, session.open_mode, out)
}

/// `pr [alias] <branch-key> [--from <branch>]`
pub fn pr(
    session: &Session,
    first: String,
    second: Option<String>,
    from: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let (alias, key) = split_pr_args(first, second);
    if key.is_empty() {
        return Err(GhopperError::InvalidArgument("branch key must not be empty".into()).into());
    }

    let config = session.store.load()?;
    let alias = resolve_alias(alias, &config, session.git)?;
    let entry = config.get_repo(&alias)?;

    let base = entry.branch(&key).ok_or_else(|| {
        let available = entry
            .branches
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        GhopperError::InvalidArgument(format!(
            "branch key '{}' is not set for '{}' (available: {})",
            key,
            alias,
            if available.is_empty() { "none" } else { available.as_str() }
        ))
    })?;
    let head = resolve_head_branch(from, session.git)?;

    let url = compare_url(&entry.url, base, &head)?;
    log::debug!("Comparing {}...{} on '{}'", base, head, alias);
    emit_url(&url, session.open_mode, out)
}

/// `add <alias> [--url <url>] [--prod ..] [--dev ..] [--pre ..]`
pub fn add(
    session: &Session,
    alias: String,
    url: Option<String>,
    flags: BranchFlags,
    out: &mut dyn Write,
) -> Result<()> {
    let branches = flags.into_branches()?;
    let url = resolve_repo_url(url, session.git)?;

    let replaced = session
        .store
        .update(|config| config.add_repo(&alias, &url, branches))?;
    if let Some(old) = replaced {
        log::warn!("Overwrote existing alias '{}' (was {})", alias, old.url);
    }

    writeln!(out, "Added repo '{}' → {}", alias, url)?;
    Ok(())
}

/// `modify <alias> [--prod ..] [--dev ..] [--pre ..]`
pub fn modify(
    session: &Session,
    alias: String,
    flags: BranchFlags,
    out: &mut dyn Write,
) -> Result<()> {
    let updates = flags.into_branches()?;
    if updates.is_empty() {
        return Err(GhopperError::InvalidArgument(
            "nothing to modify; pass at least one of --prod, --dev, --pre".into(),
        )
        .into());
    }

    let summary = session.store.update(|config| {
        config
            .modify_repo(&alias, updates)
            .map(|entry| format_branches(entry, false))
    })?;

    writeln!(out, "Updated '{}': {}", alias, summary)?;
    Ok(())
}

/// `list`
pub fn list(session: &Session, out: &mut dyn Write) -> Result<()> {
    let config = session.store.load()?;
    writeln!(out, "{}", format_repo_list(&config, session.use_colors))
        .context("Failed to write repo list")?;
    Ok(())
}

/// `remove <alias>`
pub fn remove(session: &Session, alias: String, out: &mut dyn Write) -> Result<()> {
    let removed = session.store.update(|config| config.remove_repo(&alias))?;
    writeln!(out, "Removed '{}' ({})", alias, removed.url)?;
    Ok(())
}
