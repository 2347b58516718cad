//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides (`STREAMCHAT_BACKEND__BASE_URL`, ...).
pub const ENV_PREFIX: &str = "STREAMCHAT_";

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["streamchat.toml", ".streamchat.toml"];

/// The set of sources a load merges, lowest priority first.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub explicit: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

impl ConfigSources {
    /// Standard discovery: global file, project file in the working
    /// directory, an optional explicit path, and environment overrides.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            global: ConfigLoader::global_config_path().filter(|p| p.exists()),
            project: ConfigLoader::project_config_path(),
            explicit: explicit.map(Path::to_path_buf),
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `STREAMCHAT_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided; must exist)
    /// 3. Project root: `./streamchat.toml` or `./.streamchat.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/streamchat/config.toml`
    /// 5. Default values
    ///
    /// CLI flags are applied on top by the binary.
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(&ConfigSources::discover(config_path))
    }

    /// Load from an explicit set of sources.
    pub fn load_from(sources: &ConfigSources) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = &sources.global {
            figment = figment.merge(Toml::file(global));
        }

        if let Some(project) = &sources.project {
            figment = figment.merge(Toml::file(project));
        }

        if let Some(path) = &sources.explicit {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        if let Some(prefix) = &sources.env_prefix {
            figment = figment.merge(Env::prefixed(prefix).split("__"));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/streamchat/config.toml if set,
    /// otherwise falls back to ~/.config/streamchat/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("streamchat").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config sources in priority order (for `--show-config`)
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(format!("  [ENV  ] {}<SECTION>__<KEY>", ENV_PREFIX));

        if let Some(path) = explicit {
            let marker = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", marker, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!(
                "  [     ] Project: ./{} or ./{}",
                PROJECT_FILES[0], PROJECT_FILES[1]
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", marker, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}
