use crate::error::ConfigError;
use crate::settings::{Config, MAX_PRECISION};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Data, Display, Logging, Statistics};

/// Name of the optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "palmares";
/// Prefix of the environment variables that override file settings,
/// e.g. `PALMARES_STATISTICS__TIE_BREAK=matricule`.
pub const ENV_PREFIX: &str = "PALMARES";

/// Loads the application configuration.
///
/// Reads `path` when given (it must exist), otherwise an optional `palmares.toml`
/// in the working directory, then layers `PALMARES_*` environment variables on
/// top. Every key has a default, so an empty environment yields a usable config.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "data.dir must not be empty".to_string(),
        ));
    }
    if config.display.precision > MAX_PRECISION {
        return Err(ConfigError::ValidationError(format!(
            "display.precision must be at most {MAX_PRECISION}, got {}",
            config.display.precision
        )));
    }
    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.level must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TieBreak;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_every_section() {
        let file = write_config(
            r#"
            [data]
            dir = "/srv/palmares"

            [statistics]
            tie_break = "matricule"
            strict = true

            [display]
            precision = 3

            [logging]
            level = "debug"
            "#,
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/srv/palmares"));
        assert_eq!(config.statistics.tie_break, TieBreak::Matricule);
        assert!(config.statistics.strict);
        assert_eq!(config.display.precision, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn omitted_sections_use_defaults() {
        let file = write_config("[display]\nprecision = 1\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.statistics.tie_break, TieBreak::InputOrder);
        assert!(!config.statistics.strict);
        assert_eq!(config.display.precision, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn keys_missing_from_a_section_use_defaults() {
        let file = write_config("[data]\n[display]\n[logging]\n[statistics]\nstrict = true\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.display.precision, 2);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.statistics.tie_break, TieBreak::InputOrder);
        assert!(config.statistics.strict);
    }

    #[test]
    fn rejects_excessive_precision() {
        let file = write_config("[display]\nprecision = 42\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_unknown_tie_break() {
        let file = write_config("[statistics]\ntie_break = \"alphabetical\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn explicit_path_must_exist() {
        let missing = Path::new("/nonexistent/palmares.toml");
        assert!(load_config(Some(missing)).is_err());
    }
}
