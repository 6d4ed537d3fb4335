use super::schema::Config;
use crate::error::GhopperError;
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Handle on the config document at a fixed path.
///
/// Nothing is cached: every call to [`ConfigStore::load`] reads the file again.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `path`, or at the default location when `None`
    pub fn open(path: Option<PathBuf>) -> Result<Self, GhopperError> {
        match path {
            Some(p) => Ok(Self::new(p)),
            None => Ok(Self::new(super::get_config_path()?)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config document.
    ///
    /// If the file doesn't exist, returns an empty config.
    /// If it exists but doesn't match the schema, returns `ConfigCorrupt`.
    pub fn load(&self) -> Result<Config, GhopperError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {}, starting empty", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(GhopperError::io(
                    format!("Failed to read config file at {}", self.path.display()),
                    e,
                ))
            }
        };

        let config: Config =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        config.validate().map_err(|reason| self.corrupt(reason))?;

        log::debug!(
            "Loaded {} repos from {}",
            config.repos.len(),
            self.path.display()
        );
        Ok(config)
    }

    /// Save the config document atomically.
    ///
    /// Creates parent directories. On failure the previous file is left intact.
    pub fn save(&self, config: &Config) -> Result<(), GhopperError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                GhopperError::io(
                    format!("Failed to create config directory at {}", parent.display()),
                    e,
                )
            })?;
        }

        let mut file = AtomicWriteFile::open(&self.path).map_err(|e| {
            GhopperError::io(
                format!("Failed to open atomic write file at {}", self.path.display()),
                e,
            )
        })?;

        serde_json::to_writer_pretty(&mut file, config)
            .map_err(|e| GhopperError::io("Failed to serialize config", e.into()))?;
        file.write_all(b"\n")
            .map_err(|e| GhopperError::io("Failed to serialize config", e))?;

        file.commit().map_err(|e| {
            GhopperError::io(
                format!("Failed to save config to {}", self.path.display()),
                e,
            )
        })?;

        log::debug!("Saved config to {}", self.path.display());
        Ok(())
    }

    /// Load, apply `mutate`, and persist if it succeeded
    pub fn update<T>(
        &self,
        mutate: impl FnOnce(&mut Config) -> Result<T, GhopperError>,
    ) -> Result<T, GhopperError> {
        let mut config = self.load()?;
        let out = mutate(&mut config)?;
        self.save(&config)?;
        Ok(out)
    }

    fn corrupt(&self, reason: String) -> GhopperError {
        GhopperError::ConfigCorrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Branches;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("nested").join("config.json"))
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let config = store_in(&dir).load().unwrap();
        assert!(config.repos.is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Config::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut config = Config::default();
        let mut branches = Branches::new();
        branches.insert("prod".into(), "main".into());
        branches.insert("dev".into(), "dev".into());
        config
            .add_repo("ghop", "https://github.com/org/ghop", branches)
            .unwrap();
        config
            .add_repo("other", "https://github.com/org/other", Branches::new())
            .unwrap();

        store.save(&config).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, config);

        // Saving what was loaded changes nothing
        let before = fs::read_to_string(store.path()).unwrap();
        store.save(&loaded).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, GhopperError::ConfigCorrupt { .. }));
    }

    #[test]
    fn test_missing_url_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"repos": {"ghop": {"branches": {}}}}"#).unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, GhopperError::ConfigCorrupt { .. }));
    }

    #[test]
    fn test_empty_url_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"repos": {"ghop": {"url": ""}}}"#).unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, GhopperError::ConfigCorrupt { .. }));
    }

    #[test]
    fn test_save_under_a_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let err = ConfigStore::new(blocker.join("config.json"))
            .save(&Config::default())
            .unwrap_err();
        assert!(matches!(err, GhopperError::Io { .. }));
        assert_eq!(err.exit_code(), crate::error::EXIT_IO);
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, GhopperError::Io { .. }));
    }

    #[test]
    fn test_update_does_not_persist_on_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let result = store.update(|config| config.remove_repo("missing").map(|_| ()));
        assert!(matches!(result, Err(GhopperError::NotFound(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_update_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .update(|config| {
                config
                    .add_repo("ghop", "https://github.com/org/ghop", Branches::new())
                    .map(|_| ())
            })
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.get_repo("ghop").unwrap().url, "https://github.com/org/ghop");
    }
}
