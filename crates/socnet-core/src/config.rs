use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub usernames: UsernameConfig,
    #[serde(default)]
    pub centrality: CentralityConfig,
}

/// Username matching policy.
///
/// Matching is case-sensitive unless `fold_case` is set, in which case
/// every username (subject, followee, and mention) is lowercased before it
/// reaches the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameConfig {
    #[serde(default)]
    pub fold_case: bool,
}

impl UsernameConfig {
    #[must_use]
    pub fn normalize(&self, name: &str) -> String {
        if self.fold_case {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }
}

/// Bounds for the eigenvector power iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    /// Stop when the L2 norm of the score change drops below this value.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Hard iteration cap. Always enforced.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

/// Load a config file, falling back to defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<NetworkConfig> {
    if !path.exists() {
        return Ok(NetworkConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<NetworkConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("socnet.toml")).unwrap();
        assert_eq!(config, NetworkConfig::default());
        assert!(!config.usernames.fold_case);
        assert_eq!(config.centrality.max_iter, 100);
        assert!((config.centrality.tolerance - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("socnet.toml");
        std::fs::write(&path, "[centrality]\nmax_iter = 500\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.centrality.max_iter, 500);
        assert!((config.centrality.tolerance - 1e-6).abs() < f64::EPSILON);
        assert!(!config.usernames.fold_case);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("socnet.toml");
        std::fs::write(&path, "[usernames\nfold_case = yes").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"), "{err}");
    }

    #[test]
    fn fold_case_lowercases() {
        let folding = UsernameConfig { fold_case: true };
        assert_eq!(folding.normalize("AliCe"), "alice");
        assert_eq!(UsernameConfig::default().normalize("AliCe"), "AliCe");
    }
}
