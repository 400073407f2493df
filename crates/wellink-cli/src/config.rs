//! Run configuration loading: a TOML file plus command-line overrides.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use wellink_link::LinkConfig;
use wellink_model::StrategyKind;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "WELLINK_CONFIG";

/// Values given on the command line that replace file settings.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces the strategy list when non-empty.
    pub strategies: Vec<StrategyKind>,
    pub batch_size: Option<usize>,
}

/// Picks the configuration file: the explicit path, else the environment
/// value, else none.
pub fn resolve_config_path(explicit: Option<&Path>, env_value: Option<OsString>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|value| !value.is_empty()).map(PathBuf::from))
}

/// Loads the run configuration, falling back to defaults when no file is
/// named by `--config` or `WELLINK_CONFIG`.
pub fn load_config(explicit: Option<&Path>) -> Result<LinkConfig> {
    match resolve_config_path(explicit, std::env::var_os(CONFIG_ENV)) {
        Some(path) => read_config(&path),
        None => {
            debug!("no configuration file, using defaults");
            Ok(LinkConfig::default())
        }
    }
}

pub fn read_config(path: &Path) -> Result<LinkConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: LinkConfig =
        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
    debug!(path = %path.display(), strategies = config.strategies.len(), "loaded configuration");
    Ok(config)
}

pub fn apply_overrides(config: &mut LinkConfig, overrides: &ConfigOverrides) {
    if !overrides.strategies.is_empty() {
        config.strategies.clone_from(&overrides.strategies);
    }
    if let Some(batch_size) = overrides.batch_size {
        config.emit.batch_size = batch_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_beats_environment() {
        let resolved = resolve_config_path(
            Some(Path::new("cli.toml")),
            Some(OsString::from("env.toml")),
        );
        assert_eq!(resolved, Some(PathBuf::from("cli.toml")));
    }

    #[test]
    fn environment_used_when_no_flag() {
        let resolved = resolve_config_path(None, Some(OsString::from("env.toml")));
        assert_eq!(resolved, Some(PathBuf::from("env.toml")));
        assert_eq!(resolve_config_path(None, Some(OsString::new())), None);
        assert_eq!(resolve_config_path(None, None), None);
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let mut config = LinkConfig::default();
        apply_overrides(&mut config, &ConfigOverrides::default());
        assert_eq!(config, LinkConfig::default());

        apply_overrides(
            &mut config,
            &ConfigOverrides {
                strategies: vec![StrategyKind::Weighted],
                batch_size: Some(25),
            },
        );
        assert_eq!(config.strategies, vec![StrategyKind::Weighted]);
        assert_eq!(config.emit.batch_size, 25);
        assert_eq!(config.emit.max_attempts, 3);
    }
}
