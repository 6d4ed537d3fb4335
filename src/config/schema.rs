use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GhopperError;

/// Branch role (e.g. "prod") to branch name, kept in insertion order
pub type Branches = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub repos: IndexMap<String, RepoEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepoEntry {
    pub url: String,
    #[serde(default)]
    pub branches: Branches,
}

impl RepoEntry {
    pub fn new(url: impl Into<String>, branches: Branches) -> Self {
        Self {
            url: url.into(),
            branches,
        }
    }

    /// Look up the branch stored under `role`
    pub fn branch(&self, role: &str) -> Option<&str> {
        self.branches.get(role).map(String::as_str)
    }
}

impl Config {
    /// Insert or overwrite `alias`. Returns the entry it replaced, if any.
    pub fn add_repo(
        &mut self,
        alias: &str,
        url: &str,
        branches: Branches,
    ) -> Result<Option<RepoEntry>, GhopperError> {
        if alias.trim().is_empty() {
            return Err(GhopperError::InvalidArgument("alias must not be empty".into()));
        }
        if url.trim().is_empty() {
            return Err(GhopperError::InvalidArgument("url must not be empty".into()));
        }
        Ok(self
            .repos
            .insert(alias.to_string(), RepoEntry::new(url.trim(), branches)))
    }

    /// Merge `updates` into the branches of `alias`; roles not listed are untouched
    pub fn modify_repo(&mut self, alias: &str, updates: Branches) -> Result<&RepoEntry, GhopperError> {
        let entry = self
            .repos
            .get_mut(alias)
            .ok_or_else(|| GhopperError::alias_not_found(alias))?;
        entry.branches.extend(updates);
        Ok(entry)
    }

    /// Delete `alias`, keeping the order of the remaining entries
    pub fn remove_repo(&mut self, alias: &str) -> Result<RepoEntry, GhopperError> {
        self.repos
            .shift_remove(alias)
            .ok_or_else(|| GhopperError::alias_not_found(alias))
    }

    pub fn get_repo(&self, alias: &str) -> Result<&RepoEntry, GhopperError> {
        self.repos
            .get(alias)
            .ok_or_else(|| GhopperError::alias_not_found(alias))
    }

    /// All entries in stored order
    pub fn list_repos(&self) -> impl Iterator<Item = (&str, &RepoEntry)> {
        self.repos.iter().map(|(alias, entry)| (alias.as_str(), entry))
    }

    /// Find the alias whose URL points at the same repository as `url`
    pub fn find_alias_by_url(&self, url: &str) -> Option<&str> {
        let wanted = crate::links::normalize_remote_url(url);
        self.list_repos()
            .find(|(_, entry)| crate::links::normalize_remote_url(&entry.url) == wanted)
            .map(|(alias, _)| alias)
    }

    /// Entries must carry a non-empty URL
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self.repos.iter().find(|(_, entry)| entry.url.trim().is_empty()) {
            Some((alias, _)) => Err(format!("entry '{}' has an empty url", alias)),
            None => Ok(()),
        }
    }
}
