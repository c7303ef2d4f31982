use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::cli::args::CommonArgs;
use crate::config::{CONFIG_FILE_NAME, Config, load_config, read_config_file};

/// Workspace root and effective configuration for one command run.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
    /// Config file in use, `None` when running on defaults.
    pub config_path: Option<PathBuf>,
    /// `--locale-path`, reapplied whenever the config file is re-read.
    locale_path_override: Option<String>,
}

impl Workspace {
    /// Resolve the root (`--root` or the current directory, made canonical),
    /// load the config file and apply CLI overrides.
    ///
    /// A root that is not a directory is kept as-is; the engine reports it
    /// and stays inert.
    pub fn from_args(common: &CommonArgs) -> Result<Self> {
        let root = match &common.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to get current directory")?,
        };

        // Watcher events carry absolute paths, so the root must be absolute too
        let root = root.canonicalize().unwrap_or(root);

        let (config, config_path) = if root.is_dir() {
            let loaded = load_config(&root)?;
            (loaded.config, loaded.path)
        } else {
            (Config::default(), None)
        };

        let mut workspace = Self {
            root,
            config,
            config_path,
            locale_path_override: common.locale_path.clone(),
        };
        workspace.config = workspace.with_overrides(workspace.config.clone())?;
        Ok(workspace)
    }

    /// Where a config file is (or would be created) for live reloads.
    pub fn config_watch_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| self.root.join(CONFIG_FILE_NAME))
    }

    /// Re-read the config file after a change. A deleted file means defaults.
    pub fn reload_config(&self) -> Result<Config> {
        let path = self.config_watch_path();
        let config = if path.is_file() {
            read_config_file(&path)?
        } else {
            Config::default()
        };
        self.with_overrides(config)
    }

    /// Show `path` relative to the root when it lives inside it.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn with_overrides(&self, mut config: Config) -> Result<Config> {
        if let Some(locale_path) = &self.locale_path_override {
            config.locale_path = Some(locale_path.clone());
        }
        config.validate()?;
        Ok(config)
    }
}
