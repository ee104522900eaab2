//! Загрузка DemoConfig из balldrop.toml
//!
//! Нет файла → defaults. Битый файл или значения вне диапазона → warning +
//! defaults (демо всё равно стартует).

use std::path::{Path, PathBuf};

use balldrop_simulation::logger;
use balldrop_simulation::{DemoConfig, InvalidConfig};

pub const DEFAULT_CONFIG_FILE: &str = "balldrop.toml";
pub const CONFIG_ENV_VAR: &str = "BALLDROP_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: InvalidConfig,
    },
}

/// BALLDROP_CONFIG или ./balldrop.toml
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// toml → DemoConfig + проверка диапазонов
pub fn parse_config(text: &str, path: &Path) -> Result<DemoConfig, ConfigError> {
    let config: DemoConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    config.validate().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}

/// Ok(None) если файла нет
pub fn load_config(path: &Path) -> Result<Option<DemoConfig>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    parse_config(&text, path).map(Some)
}

pub fn load_or_default(path: &Path) -> DemoConfig {
    match load_config(path) {
        Ok(Some(config)) => {
            logger::log_info(&format!("⚙️ Config loaded from {}", path.display()));
            config
        }
        Ok(None) => DemoConfig::default(),
        Err(err) => {
            logger::log_warning(&format!("{} — using defaults", err));
            DemoConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balldrop_simulation::DepthSource;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = Path::new("/nonexistent/balldrop/balldrop.toml");
        assert!(matches!(load_config(path), Ok(None)));
        assert_eq!(load_or_default(path), DemoConfig::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config = parse_config(
            "[launch]\nscale = 10.0\ndepth = { fixed = 0.0 }\n[world]\nseed = 7\n",
            Path::new("test.toml"),
        )
        .expect("valid config");

        assert_eq!(config.launch.scale, 10.0);
        assert_eq!(config.launch.depth, DepthSource::Fixed(0.0));
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.substeps, 3);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_config("[launch\nscale = ", Path::new("broken.toml"))
            .expect_err("malformed toml");

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_negative_bound_is_invalid() {
        let err = parse_config("[launch]\nbound = -12.25\n", Path::new("bound.toml"))
            .expect_err("negative bound");

        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("launch.bound"));
    }

    #[test]
    fn test_zero_scale_is_invalid() {
        let err = parse_config("[launch]\nscale = 0.0\n", Path::new("scale.toml"))
            .expect_err("zero scale");

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir()
            .join(format!("balldrop_invalid_{}.toml", std::process::id()));
        std::fs::write(&path, "[launch]\nbound = -12.25\n[world]\nfixed_dt = -1.0\n")
            .expect("write temp config");

        let loaded = load_config(&path);
        let config = load_or_default(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(loaded, Err(ConfigError::Invalid { .. })));
        assert_eq!(config, DemoConfig::default());
    }
}
