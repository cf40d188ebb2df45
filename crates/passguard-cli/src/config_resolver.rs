//! Locates the policy file.
//!
//! The first existing candidate wins:
//!
//! 1. `--config` (used as given, even if missing)
//! 2. `passguard.toml`, then `.passguard.toml`, in the working directory
//! 3. `config.toml` in `$PASSGUARD_CONFIG_DIR`, or in `~/.passguard/`
//!
//! Without any of them the recommended preset applies.

use passguard_core::Config;
use std::path::{Path, PathBuf};

/// Where the policy was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Found in the per-user directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the policy file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for the per-user policy.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Loads the policy, or the default one for [`ConfigSource::Default`].
    /// Relative paths in the file are resolved against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config, passguard_core::ConfigError> {
        self.path().map_or_else(|| Ok(Config::default()), Config::from_file)
    }
}

const PROJECT_FILES: [&str; 2] = ["passguard.toml", ".passguard.toml"];

const USER_FILE: &str = "config.toml";

const USER_DIR_ENV: &str = "PASSGUARD_CONFIG_DIR";

/// Finds the policy for `working_dir`.
#[must_use]
pub fn resolve(working_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    locate(working_dir, explicit, user_config_dir().as_deref())
}

pub(crate) fn locate(
    working_dir: &Path,
    explicit: Option<&Path>,
    user_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let project = PROJECT_FILES
        .iter()
        .map(|name| working_dir.join(name))
        .find(|path| path.is_file());
    if let Some(path) = project {
        tracing::debug!("Using policy {}", path.display());
        return ConfigSource::Project(path);
    }

    match user_dir.map(|dir| dir.join(USER_FILE)) {
        Some(path) if path.is_file() => {
            tracing::debug!("Using per-user policy {}", path.display());
            ConfigSource::Global(path)
        }
        _ => ConfigSource::Default,
    }
}

/// `$PASSGUARD_CONFIG_DIR`, falling back to `~/.passguard`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(USER_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".passguard")))
}
