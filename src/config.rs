use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::core::{FailurePolicy, Matcher, PolicyError, RankingPolicy};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Locations of the employer directory and the model artifact
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_employers_path")]
    pub employers_path: PathBuf,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            employers_path: default_employers_path(),
            model_path: default_model_path(),
        }
    }
}

fn default_employers_path() -> PathBuf { PathBuf::from("data/employers_database.csv") }
fn default_model_path() -> PathBuf { PathBuf::from("data/matching_model.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_individual_limit")]
    pub individual_limit: usize,
    #[serde(default = "default_tied_list_limit")]
    pub tied_list_limit: usize,
    /// 0.0 keeps exact score equality for tie detection
    #[serde(default)]
    pub tie_tolerance: f64,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            individual_limit: default_individual_limit(),
            tied_list_limit: default_tied_list_limit(),
            tie_tolerance: 0.0,
            failure_policy: FailurePolicy::default(),
        }
    }
}

fn default_top_n() -> usize { 25 }
fn default_individual_limit() -> usize { 5 }
fn default_tied_list_limit() -> usize { 20 }

impl MatchingSettings {
    pub fn ranking_policy(&self) -> RankingPolicy {
        RankingPolicy {
            top_n: self.top_n,
            individual_limit: self.individual_limit,
            tied_list_limit: self.tied_list_limit,
            tie_tolerance: self.tie_tolerance,
        }
    }

    /// Build a matcher, rejecting inconsistent limits
    pub fn matcher(&self) -> Result<Matcher, PolicyError> {
        let policy = self.ranking_policy();
        policy.validate()?;
        Ok(Matcher::new(policy, self.failure_policy))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INCLUSIVE__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INCLUSIVE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("INCLUSIVE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.ranking_policy(), RankingPolicy::default());
        assert_eq!(matching.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.data.employers_path, PathBuf::from("data/employers_database.csv"));
        assert_eq!(settings.matching.top_n, 25);
    }

    #[test]
    fn test_matching_overrides() {
        let settings = from_toml(
            r#"
            [matching]
            tie_tolerance = 0.05
            failure_policy = "skip"
            "#,
        );

        assert_eq!(settings.matching.failure_policy, FailurePolicy::Skip);
        let matcher = settings.matching.matcher().unwrap();
        assert_eq!(matcher.policy().tie_tolerance, 0.05);
        assert_eq!(matcher.failure_policy(), FailurePolicy::Skip);
    }

    #[test]
    fn test_inconsistent_limits_rejected() {
        let settings = from_toml(
            r#"
            [matching]
            individual_limit = 10
            tied_list_limit = 8
            "#,
        );

        assert!(settings.matching.matcher().is_err());
    }
}
