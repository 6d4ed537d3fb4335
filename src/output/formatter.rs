use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::config::{Config, RepoEntry};

/// Format every configured repo, two lines per alias:
/// "{alias}  {url}" then "  {role}={branch}, ..." (omitted when no branches)
pub fn format_repo_list(config: &Config, use_colors: bool) -> String {
    if config.repos.is_empty() {
        return "No repos added yet.".to_string();
    }

    config
        .list_repos()
        .map(|(alias, entry)| format_repo_entry(alias, entry, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single alias with its URL and branch roles
pub fn format_repo_entry(alias: &str, entry: &RepoEntry, use_colors: bool) -> String {
    let header = if use_colors {
        format!("{}  {}", alias.bold(), entry.url.underline())
    } else {
        format!("{}  {}", alias, entry.url)
    };

    if entry.branches.is_empty() {
        return header;
    }

    format!("{}\n  {}", header, format_branches(entry, use_colors))
}

/// "prod=main, dev=dev" in stored order
pub fn format_branches(entry: &RepoEntry, use_colors: bool) -> String {
    entry
        .branches
        .iter()
        .map(|(role, branch)| {
            if use_colors {
                format!("{}={}", role.cyan(), branch)
            } else {
                format!("{}={}", role, branch)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}
