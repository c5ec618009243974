//! Combined dungeon and session settings for the command-line tools.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use warren_core::{DungeonConfig, SessionConfig};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarrenConfig {
    pub dungeon: DungeonConfig,
    pub session: SessionConfig,
}

impl WarrenConfig {
    /// Reads a `.toml` or `.json` file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            _ => bail!("Unsupported config format (expected .toml or .json): {}", path.display()),
        }
    }

    /// Defaults when no path is given; a given path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn toml_overrides_only_the_given_keys() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("warren.toml");
        fs::write(
            &path,
            "[dungeon]\nwidth = 30\nbranch_lengths = [4, 4]\n\n[session.chase]\nscan_delay = 5\n",
        )
        .expect("write");

        let config = WarrenConfig::load(&path).expect("load");
        assert_eq!(config.dungeon.width, 30);
        assert_eq!(config.dungeon.branch_lengths, vec![4, 4]);
        assert_eq!(config.dungeon.height, DungeonConfig::default().height);
        assert_eq!(config.session.chase.scan_delay, Some(5));
        assert_eq!(config.session.player_speed, SessionConfig::default().player_speed);
    }

    #[test]
    fn json_file_round_trips() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("warren.json");
        let mut config = WarrenConfig::default();
        config.dungeon.collectibles = 1;
        config.session.monster_speed = 2.5;
        fs::write(&path, serde_json::to_string_pretty(&config).expect("serialize")).expect("write");

        assert_eq!(WarrenConfig::load(&path).expect("load"), config);
    }

    #[test]
    fn rejects_unknown_extensions() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("warren.yaml");
        fs::write(&path, "dungeon: {}").expect("write");

        let err = WarrenConfig::load(&path).expect_err("yaml is not supported");
        assert!(err.to_string().contains("Unsupported config format"), "{err}");
    }

    #[test]
    fn missing_file_is_an_error_but_no_path_means_defaults() {
        let dir = tempdir().expect("tempdir");
        assert!(WarrenConfig::load_or_default(Some(&dir.path().join("absent.toml"))).is_err());
        assert_eq!(WarrenConfig::load_or_default(None).expect("defaults"), WarrenConfig::default());
    }
}
