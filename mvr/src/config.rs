//! Configuration for the mvr binary

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Explicit path to the maven executable; bypasses PATH lookup
    #[serde(default)]
    pub maven_path: Option<PathBuf>,

    /// Project directory passed to maven as its working directory
    #[serde(default)]
    pub project_dir: Option<PathBuf>,

    /// Option tokens applied to every command
    #[serde(default)]
    pub options: Vec<String>,

    /// Parameters applied to every command, rendered as `-Dkey=value`
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("mavenrunner").join("config.yml")),
            Some(PathBuf::from("mavenrunner.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_through_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");

        let mut config = Config {
            maven_path: Some(PathBuf::from("/opt/maven/bin/mvn")),
            project_dir: Some(PathBuf::from("/proj")),
            options: vec!["-e".to_string()],
            ..Default::default()
        };
        config.parameters.insert("skipTests".to_string(), "true".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.maven_path, config.maven_path);
        assert_eq!(loaded.project_dir, config.project_dir);
        assert_eq!(loaded.options, config.options);
        assert_eq!(loaded.parameters, config.parameters);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "options:\n  - \"-B\"\n").unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.options, vec!["-B".to_string()]);
        assert!(loaded.maven_path.is_none());
        assert!(loaded.parameters.is_empty());
    }
}
