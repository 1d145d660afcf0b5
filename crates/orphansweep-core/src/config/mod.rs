//! Configuration management

use crate::error::{OrphanSweepError, Result};
use crate::paths::{self, Containment};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "ORPHANSWEEP_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base directory that stored file-field values are relative to
    pub media_base: PathBuf,

    /// How directory containment is tested when pruning empty directories
    #[serde(default)]
    pub containment: Containment,

    /// Per-domain media configuration
    #[serde(default)]
    pub domains: BTreeMap<String, DomainConfig>,
}

/// Per-domain configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConfig {
    /// Media root(s) to scan. A domain without roots is ignored.
    #[serde(default)]
    pub root: Option<OneOrMany<PathBuf>>,

    /// Groups of directories whose ancestors are never removed as empty
    #[serde(default)]
    pub skip: Vec<OneOrMany<PathBuf>>,

    /// Groups of basenames that never count as media files
    #[serde(default)]
    pub exclude: Vec<OneOrMany<String>>,
}

/// A single value or a list of values
///
/// Older configs give `root: /path`, newer ones `root: [/a, /b]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Self::One(v) => vec![v.clone()],
            Self::Many(vs) => vs.clone(),
        }
    }
}

impl DomainConfig {
    /// Roots of this domain, in configured order, without duplicates
    pub fn roots(&self) -> Vec<PathBuf> {
        let mut seen = BTreeSet::new();
        self.root
            .iter()
            .flat_map(|r| r.to_vec())
            .map(paths::normalize)
            .filter(|p| seen.insert(p.clone()))
            .collect()
    }

    fn skip_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.skip.iter().flat_map(|g| g.to_vec())
    }

    fn exclude_names(&self) -> impl Iterator<Item = String> + '_ {
        self.exclude.iter().flat_map(|g| g.to_vec())
    }
}

impl Config {
    /// Load config from `ORPHANSWEEP_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        Self::load_from(&path)
    }

    /// Load and validate config from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OrphanSweepError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate config from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Reject configurations the sweep cannot run safely against
    pub fn validate(&self) -> Result<()> {
        require_absolute("media_base", &self.media_base)?;

        for (name, domain) in &self.domains {
            if let Some(root) = &domain.root {
                let roots = root.to_vec();
                if roots.is_empty() {
                    return Err(OrphanSweepError::Config(format!(
                        "domain '{}': root list is empty",
                        name
                    )));
                }
                for r in &roots {
                    require_absolute(&format!("domain '{}' root", name), r)?;
                }
            }
            for s in domain.skip_paths() {
                require_absolute(&format!("domain '{}' skip", name), &s)?;
            }
            for f in domain.exclude_names() {
                if f.is_empty() || f.contains('/') || f.contains(std::path::MAIN_SEPARATOR) {
                    return Err(OrphanSweepError::Config(format!(
                        "domain '{}': exclude entry '{}' is not a file name",
                        name, f
                    )));
                }
            }
        }
        Ok(())
    }

    /// Domains that take part in a sweep (those with at least one root)
    pub fn active_domains(&self) -> impl Iterator<Item = (&str, &DomainConfig)> {
        self.domains
            .iter()
            .filter(|(_, d)| d.root.is_some())
            .map(|(n, d)| (n.as_str(), d))
    }

    /// All media roots across active domains, deduplicated
    pub fn media_roots(&self) -> BTreeSet<PathBuf> {
        self.active_domains().flat_map(|(_, d)| d.roots()).collect()
    }

    /// All skip roots across active domains, deduplicated
    pub fn skip_roots(&self) -> BTreeSet<PathBuf> {
        paths::normalize_all(self.active_domains().flat_map(|(_, d)| d.skip_paths()))
    }

    /// All excluded basenames across active domains, deduplicated
    pub fn exclude_files(&self) -> BTreeSet<String> {
        self.active_domains()
            .flat_map(|(_, d)| d.exclude_names())
            .collect()
    }
}

fn require_absolute(what: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(OrphanSweepError::Config(format!("{} is empty", what)));
    }
    if !path.is_absolute() {
        return Err(OrphanSweepError::Config(format!(
            "{} must be an absolute path, got {}",
            what,
            path.display()
        )));
    }
    Ok(())
}
