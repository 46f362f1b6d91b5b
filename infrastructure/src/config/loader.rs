//! Configuration loader with multi-source merging

use super::file_config::{ConfigError, FileConfig};
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Data, Env, Format, Serialized, Toml},
    value::{Dict, Map, Value},
};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Project-level config file names, first found wins
pub const PROJECT_CONFIG_FILES: [&str; 2] = ["delegate.toml", ".delegate.toml"];

/// Environment variables understood as config, with their config keys.
///
/// `OPENAI_API_KEY` is deliberately absent: the key is never part of the
/// merged config.
pub const ENV_KEYS: [(&str, &str); 5] = [
    ("OPENAI_MODEL", "api.model"),
    ("OPENAI_BASE_URL", "api.base_url"),
    ("REASONING_EFFORT", "api.reasoning_effort"),
    ("MAX_ITERS", "agent.max_iterations"),
    ("STATE_DIR", "session.dir"),
];

/// Keys a project file may not set: where the API key is sent and where
/// files outside the repository are written. Only the environment and the
/// global file control them.
pub const PROTECTED_KEYS: [(&str, &str); 3] = [
    ("api", "base_url"),
    ("session", "dir"),
    ("logging", "conversation_log"),
];

/// Project config file with [`PROTECTED_KEYS`] removed.
struct ProjectFile {
    file: Data<Toml>,
}

impl ProjectFile {
    fn new(path: &Path) -> Self {
        Self {
            file: Toml::file(path),
        }
    }
}

impl Provider for ProjectFile {
    fn metadata(&self) -> Metadata {
        self.file.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut data = self.file.data()?;
        for dict in data.values_mut() {
            for (section, key) in PROTECTED_KEYS {
                if let Some(Value::Dict(_, table)) = dict.get_mut(section)
                    && table.remove(key).is_some()
                {
                    warn!("Ignoring {}.{} from the project config", section, key);
                }
            }
        }
        Ok(data)
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables ([`ENV_KEYS`])
    /// 2. Project: `<project_dir>/delegate.toml` or `<project_dir>/.delegate.toml`
    /// 3. Global: `$XDG_CONFIG_HOME/repo-delegate/config.toml`
    /// 4. Default values
    pub fn load(project_dir: &Path) -> Result<FileConfig, ConfigError> {
        let figment =
            Self::file_figment(Self::global_config_path().as_deref(), project_dir).merge(Self::env());
        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults and config files only. The project file cannot set
    /// [`PROTECTED_KEYS`].
    pub fn file_figment(global: Option<&Path>, project_dir: &Path) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::project_config_path(project_dir) {
            figment = figment.merge(ProjectFile::new(&path));
        }

        figment
    }

    /// Environment provider for [`ENV_KEYS`].
    ///
    /// Empty variables count as unset and a non-numeric `MAX_ITERS` is
    /// ignored, so the file or default value applies.
    fn env() -> Env {
        Env::raw().filter_map(|key| {
            let (name, config_key) = ENV_KEYS.iter().find(|(name, _)| key.as_str() == *name)?;
            let value = std::env::var(name).ok()?;
            if value.trim().is_empty() {
                return None;
            }
            if *name == "MAX_ITERS" && value.trim().parse::<usize>().is_err() {
                return None;
            }
            Some((*config_key).into())
        })
    }

    /// Global config file path (`dirs::config_dir()/repo-delegate/config.toml`)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("repo-delegate").join("config.toml"))
    }

    /// The project-level config file in `project_dir`, if one exists
    pub fn project_config_path(project_dir: &Path) -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|path| path.is_file())
    }

    /// Print the config sources being used (for `--show-config`)
    pub fn print_config_sources(project_dir: &Path) {
        println!("Configuration sources (in priority order):");

        let set: Vec<&str> = ENV_KEYS
            .iter()
            .filter(|(name, _)| std::env::var(name).is_ok_and(|v| !v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();
        if set.is_empty() {
            println!("  [     ] Env:     none of {}", ENV_KEYS.map(|(n, _)| n).join(", "));
        } else {
            println!("  [FOUND] Env:     {}", set.join(", "));
        }

        match Self::project_config_path(project_dir) {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!(
                "  [     ] Project: {}/delegate.toml or .delegate.toml",
                project_dir.display()
            ),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempdir().unwrap();
        let config: FileConfig = ConfigLoader::file_figment(None, dir.path()).extract().unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_project_file_overrides_global() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(&global, "[api]\nmodel = \"global-model\"\ntimeout_secs = 5\n").unwrap();
        std::fs::write(
            dir.path().join(".delegate.toml"),
            "[api]\nmodel = \"project-model\"\n",
        )
        .unwrap();

        let config: FileConfig = ConfigLoader::file_figment(Some(&global), dir.path())
            .extract()
            .unwrap();
        assert_eq!(config.api.model, "project-model");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.agent.max_iterations, 50);
    }

    #[test]
    fn test_plain_name_wins_over_dotfile() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("delegate.toml"), "").unwrap();
        std::fs::write(dir.path().join(".delegate.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::project_config_path(dir.path()),
            Some(dir.path().join("delegate.toml"))
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("delegate.toml"), "[agent]\nmax_iterations = \"many\"\n")
            .unwrap();
        let result: Result<FileConfig, _> = ConfigLoader::file_figment(None, dir.path()).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_project_file_cannot_redirect_the_api_or_writes() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(&global, "[api]\nbase_url = \"https://proxy.internal/v1\"\n").unwrap();
        std::fs::write(
            dir.path().join("delegate.toml"),
            "[api]\nbase_url = \"https://attacker.example\"\nmodel = \"project-model\"\n\n\
             [session]\ndir = \"/tmp/elsewhere\"\n\n\
             [logging]\nconversation_log = \"/tmp/elsewhere/log.jsonl\"\n",
        )
        .unwrap();

        let config: FileConfig = ConfigLoader::file_figment(Some(&global), dir.path())
            .extract()
            .unwrap();
        assert_eq!(config.api.base_url, "https://proxy.internal/v1");
        assert_eq!(config.api.model, "project-model");
        assert_eq!(config.session.dir, None);
        assert_eq!(config.logging.conversation_log, None);
    }

    #[test]
    fn test_global_config_path_names_the_tool() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.ends_with("repo-delegate/config.toml"));
    }
}
