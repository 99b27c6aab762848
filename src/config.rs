use crate::artifact::{Artifact, ArtifactKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete configuration for bumptag.
///
/// Lists the metadata artifacts carrying the version token and the remote
/// that release tags are pushed to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote name that release tags are pushed to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Metadata artifacts rewritten by `bump`, in order
    #[serde(default)]
    pub artifacts: Vec<ArtifactConfig>,
}

/// One configured metadata artifact.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ArtifactConfig {
    /// Path relative to the repository work tree
    pub path: PathBuf,

    /// Marker-line format of the file
    pub kind: ArtifactKind,
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            artifacts: Vec::new(),
        }
    }
}

impl Config {
    /// Materialize the configured artifact list.
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.artifacts
            .iter()
            .map(|a| Artifact::new(a.path.clone(), a.kind))
            .collect()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bumptag.toml` in the current directory
/// 3. `bumptag.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./bumptag.toml").exists() {
        fs::read_to_string("./bumptag.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("bumptag.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
