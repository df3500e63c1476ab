use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{LedgerError, Result},
    storage::json_backend::{ensure_dir, write_atomic},
};

pub use crate::domain::AmountPolicy;

pub const HOME_ENV: &str = "TALLY_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User preferences for the ledger and its command shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub amount_policy: AmountPolicy,
    #[serde(default = "Config::default_ledger_file")]
    pub ledger_file: String,
    /// Directory holding the ledger file. Defaults to the base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_root: Option<PathBuf>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            amount_policy: AmountPolicy::default(),
            ledger_file: Self::default_ledger_file(),
            ledger_root: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_ledger_file() -> String {
        "ledger.json".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn ledger_path(&self, base: &Path) -> PathBuf {
        self.ledger_root
            .as_deref()
            .unwrap_or(base)
            .join(&self.ledger_file)
    }
}

/// Resolves where tally keeps its files.
pub struct PathResolver;

impl PathResolver {
    /// `$TALLY_HOME`, else the platform data directory, else `./.tally`.
    pub fn base_dir() -> PathBuf {
        if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return PathBuf::from(home);
        }
        dirs::data_dir()
            .map(|dir| dir.join("tally"))
            .unwrap_or_else(|| PathBuf::from(".tally"))
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

/// Loads and saves [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("`{}`: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(format!("json.{}", TMP_SUFFIX));
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
