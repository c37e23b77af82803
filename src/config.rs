use eyre::{OptionExt, WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub solver: SolverConfig,
    pub csv: Option<CsvConfig>,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub loader: LoaderKind,
    /// Verify that the result has no blocking pair before saving it.
    pub check_stability: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            loader: LoaderKind::Csv,
            check_stability: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    #[default]
    Csv,
    Database,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CsvConfig {
    pub projects: PathBuf,
    pub students: PathBuf,
    pub preferences: PathBuf,
    pub output: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Config {
    pub fn load(file_name: &Path) -> eyre::Result<Config> {
        let content = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> eyre::Result<Config> {
        toml::from_str(content).wrap_err("cannot parse configuration")
    }

    pub fn csv(&self) -> eyre::Result<&CsvConfig> {
        self.csv
            .as_ref()
            .ok_or_eyre("missing [csv] section in configuration")
    }

    pub fn database(&self) -> eyre::Result<&DatabaseConfig> {
        self.database
            .as_ref()
            .ok_or_eyre("missing [database] section in configuration")
    }
}
