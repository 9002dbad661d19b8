use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::FeedbackWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub store: StoreSettings,
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

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    /// TOML synonym table replacing the built-in vocabulary
    pub synonyms_path: Option<String>,
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_technical_weight")]
    pub technical: f64,
    #[serde(default = "default_communication_weight")]
    pub communication: f64,
    #[serde(default = "default_depth_weight")]
    pub depth: f64,
    #[serde(default = "default_coverage_weight")]
    pub coverage: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            technical: default_technical_weight(),
            communication: default_communication_weight(),
            depth: default_depth_weight(),
            coverage: default_coverage_weight(),
        }
    }
}

impl WeightsConfig {
    /// Reject negative weights; each weight must be a finite value >= 0
    pub fn check(&self) -> Result<(), ConfigError> {
        let weights = [
            ("technical", self.technical),
            ("communication", self.communication),
            ("depth", self.depth),
            ("coverage", self.coverage),
        ];

        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

impl From<&WeightsConfig> for FeedbackWeights {
    fn from(config: &WeightsConfig) -> Self {
        FeedbackWeights {
            technical: config.technical,
            communication: config.communication,
            depth: config.depth,
            coverage: config.coverage,
        }
    }
}

fn default_technical_weight() -> f64 { 0.4 }
fn default_communication_weight() -> f64 { 0.2 }
fn default_depth_weight() -> f64 { 0.2 }
fn default_coverage_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_max_answers")]
    pub max_answers: u64,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            max_answers: default_max_answers(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_max_answers() -> u64 { 100_000 }
fn default_ttl_secs() -> u64 { 86_400 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INTERVIEW__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INTERVIEW__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.scoring.weights.check()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.scoring.weights.check()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("INTERVIEW")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
