use super::Config;
use crate::error::{ConfigError, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// `.env` locations tried in order, relative to the working directory.
/// Only the first one that exists is loaded.
pub const ENV_FILE_CANDIDATES: [&str; 3] = ["apps/.env", "apps/agent-server/.env", ".env"];

/// `~/.draftwright/config.toml`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| dirs.home_dir().join(".draftwright").join("config.toml"))
}

/// Load the first existing `.env` candidate under `root`. Variables that
/// are already set are never overridden.
pub fn load_dotenv(root: &Path) -> Option<PathBuf> {
    let path = ENV_FILE_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())?;

    match dotenvy::from_path(&path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "loaded env file");
            Some(path)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to load env file: {err}");
            None
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `.env`, then the environment.
    ///
    /// An explicit `path` must exist. The default location is optional and
    /// is never created.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::Load(format!(
                    "config file not found: {}",
                    path.display()
                ))
                .into());
            }
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|path| path.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
        if load_dotenv(&cwd).is_none() {
            tracing::debug!("no .env file found in expected locations");
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|err| ConfigError::Load(format!("{}: {err}", path.display())))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_env::{ENV_LOCK, EnvVarGuard};
    use super::*;
    use crate::error::DraftError;
    use tempfile::TempDir;

    #[test]
    fn from_file_reads_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "agent_timeout_secs = 30\n[session]\nmax_items = 6\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.agent_timeout_secs, 30);
        assert_eq!(config.session.max_items, 6);
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn malformed_toml_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = [unterminated").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, DraftError::Config(ConfigError::Load(_))));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_applies_env_after_file() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _model = EnvVarGuard::set("DRAFTWRIGHT_MODEL", "gpt-from-env");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = \"gpt-from-file\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.model, "gpt-from-env");
    }

    #[test]
    fn load_rejects_invalid_file_values() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _timeout = EnvVarGuard::unset("DRAFTWRIGHT_AGENT_TIMEOUT_SECS");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "agent_timeout_secs = 0\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, DraftError::Config(ConfigError::Validation(_))));
    }

    #[test]
    fn first_env_candidate_wins_without_overriding() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _preset = EnvVarGuard::set("DRAFTWRIGHT_TEST_PRESET", "kept");
        let _fresh = EnvVarGuard::unset("DRAFTWRIGHT_TEST_FRESH");

        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("apps/agent-server")).unwrap();
        fs::write(
            dir.path().join("apps/agent-server/.env"),
            "DRAFTWRIGHT_TEST_PRESET=replaced\nDRAFTWRIGHT_TEST_FRESH=from-agent-server\n",
        )
        .unwrap();
        fs::write(dir.path().join(".env"), "DRAFTWRIGHT_TEST_FRESH=from-root\n").unwrap();

        let loaded = load_dotenv(dir.path()).unwrap();
        assert!(loaded.ends_with("apps/agent-server/.env"));
        assert_eq!(std::env::var("DRAFTWRIGHT_TEST_PRESET").unwrap(), "kept");
        assert_eq!(std::env::var("DRAFTWRIGHT_TEST_FRESH").unwrap(), "from-agent-server");
    }

    #[test]
    fn no_env_file_is_fine() {
        let dir = TempDir::new().unwrap();
        assert!(load_dotenv(dir.path()).is_none());
    }
}
