//! Read-only view of the git repository around the working directory.
//!
//! Only used to fill in arguments the user left out.

use crate::error::GhopperError;
use git2::{ErrorCode, Repository, RepositoryOpenFlags};
use std::path::PathBuf;

/// Source of defaults taken from the surrounding git checkout
pub trait GitContext {
    /// URL of the primary remote (`origin`, else the first one configured)
    fn remote_url(&self) -> Result<String, GhopperError>;

    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String, GhopperError>;
}

/// Git context discovered from a directory on disk via libgit2
#[derive(Debug, Clone)]
pub struct LocalRepo {
    path: PathBuf,
    ceiling_dirs: Vec<PathBuf>,
}

impl LocalRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ceiling_dirs: Vec::new(),
        }
    }

    /// Context for the process working directory
    pub fn from_cwd() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Stop repository discovery before entering any of `dirs`
    pub fn with_ceiling_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.ceiling_dirs.extend(dirs);
        self
    }

    fn open(&self) -> Result<Repository, GhopperError> {
        Repository::open_ext(&self.path, RepositoryOpenFlags::empty(), &self.ceiling_dirs)
            .map_err(|e| {
                log::debug!("git discovery failed at {}: {}", self.path.display(), e);
                GhopperError::NoGitContext(format!(
                    "{} is not inside a git repository",
                    self.path.display()
                ))
            })
    }
}

impl GitContext for LocalRepo {
    fn remote_url(&self) -> Result<String, GhopperError> {
        let repo = self.open()?;

        let name = match repo.find_remote("origin") {
            Ok(_) => "origin".to_string(),
            Err(_) => {
                let remotes = repo
                    .remotes()
                    .map_err(|e| GhopperError::NoGitContext(e.message().to_string()))?;
                remotes
                    .iter()
                    .flatten()
                    .next()
                    .map(str::to_string)
                    .ok_or_else(|| GhopperError::NoGitContext("no git remote configured".into()))?
            }
        };

        let remote = repo
            .find_remote(&name)
            .map_err(|e| GhopperError::NoGitContext(e.message().to_string()))?;
        let url = remote
            .url()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| GhopperError::NoGitContext(format!("remote '{}' has no url", name)))?;

        log::debug!("Using remote '{}' ({})", name, url);
        Ok(url.to_string())
    }

    fn current_branch(&self) -> Result<String, GhopperError> {
        let repo = self.open()?;

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet; HEAD still names the branch
                return repo
                    .find_reference("HEAD")
                    .ok()
                    .and_then(|r| r.symbolic_target().map(str::to_string))
                    .and_then(|t| t.strip_prefix("refs/heads/").map(str::to_string))
                    .ok_or(GhopperError::DetachedHead);
            }
            Err(e) => return Err(GhopperError::NoGitContext(e.message().to_string())),
        };

        if !head.is_branch() {
            return Err(GhopperError::DetachedHead);
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or(GhopperError::DetachedHead)
    }
}
