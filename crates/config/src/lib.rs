//! Configuration loading, validation, and management for Folio.
//!
//! Loads configuration from `~/.folio/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use folio_core::catalog::ResponseCatalog;
use folio_core::classifier::TopicKey;
use folio_core::portfolio::{Profile, Project, ProjectCatalog, Skill, default_skills};
use folio_core::SubmitPolicy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for the simulated reply latency.
const MAX_REPLY_DELAY_MS: u64 = 60_000;

/// The root configuration structure.
///
/// Maps directly to `~/.folio/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chat assistant behavior
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Site owner
    #[serde(default)]
    pub profile: Profile,

    /// Skill bars
    #[serde(default = "default_skills")]
    pub skills: Vec<Skill>,

    /// Portfolio projects
    #[serde(default = "default_projects")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Simulated latency before a reply appears
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// What happens when a visitor submits while a reply is pending
    #[serde(default)]
    pub submit_policy: SubmitPolicy,

    /// Override for the opening assistant message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_greeting: Option<String>,

    /// Override for the reply to "hi" / "hello"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting_reply: Option<String>,

    /// Per-topic reply overrides, keyed by topic name (`skills`, `contact`, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, String>,
}

fn default_reply_delay_ms() -> u64 {
    1000
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            submit_policy: SubmitPolicy::default(),
            seed_greeting: None,
            greeting_reply: None,
            responses: BTreeMap::new(),
        }
    }
}

impl AssistantConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Origin the site is served from (CORS)
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Live widget sessions kept before the oldest is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_port() -> u16 {
    8787
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_allowed_origin() -> String {
    "http://localhost:5173".into()
}
fn default_max_sessions() -> usize {
    1_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origin: default_allowed_origin(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_projects() -> Vec<Project> {
    let project = |id: &str, title: &str, description: &str, tech: &[&str], featured: bool, order: i32| Project {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        image: None,
        technologies: tech.iter().map(|t| t.to_string()).collect(),
        live_url: None,
        github_url: None,
        featured,
        display_order: order,
    };
    vec![
        project(
            "shopwave",
            "ShopWave",
            "E-commerce platform with cart, checkout and an admin dashboard",
            &["React.js", "Node.js", "MongoDB"],
            true,
            1,
        ),
        project(
            "taskflow",
            "TaskFlow",
            "Task management app with boards and team workspaces",
            &["TypeScript", "Express.js", "MySQL"],
            true,
            2,
        ),
        project(
            "chatly",
            "Chatly",
            "AI chat interface with streaming replies",
            &["React.js", "TypeScript"],
            false,
            3,
        ),
        project(
            "carepanel",
            "CarePanel",
            "Healthcare dashboard for patient scheduling and records",
            &["PHP", "MySQL", "JavaScript"],
            true,
            4,
        ),
    ]
}

impl AppConfig {
    /// Load configuration from the default path (~/.folio/config.toml).
    ///
    /// Environment overrides:
    /// - `FOLIO_CONFIG_DIR` — alternate config directory
    /// - `FOLIO_REPLY_DELAY_MS` — reply latency
    /// - `FOLIO_OWNER_NAME` — profile name
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(delay) = std::env::var("FOLIO_REPLY_DELAY_MS") {
            config.assistant.reply_delay_ms = delay.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "FOLIO_REPLY_DELAY_MS must be an integer, got {delay:?}"
                ))
            })?;
        }

        if let Ok(name) = std::env::var("FOLIO_OWNER_NAME") {
            config.profile.name = name;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        std::env::var("FOLIO_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs_home().join(".folio"))
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.assistant.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(ConfigError::ValidationError(format!(
                "assistant.reply_delay_ms must be at most {MAX_REPLY_DELAY_MS}"
            )));
        }

        for key in self.assistant.responses.keys() {
            key.parse::<TopicKey>()
                .map_err(|e| ConfigError::ValidationError(format!("assistant.responses: {e}")))?;
        }

        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError("gateway.port must be non-zero".into()));
        }

        if self.gateway.max_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.max_sessions must be > 0".into(),
            ));
        }

        if let Some(skill) = self.skills.iter().find(|s| s.level > 100) {
            return Err(ConfigError::ValidationError(format!(
                "skill {:?} has level {} (max 100)",
                skill.name, skill.level
            )));
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate project id {:?}",
                    project.id
                )));
            }
        }

        Ok(())
    }

    /// Build the immutable response catalog, applying any overrides.
    pub fn response_catalog(&self) -> ResponseCatalog {
        let mut builder = ResponseCatalog::builder();
        if let Some(seed) = &self.assistant.seed_greeting {
            builder = builder.seed_greeting(seed);
        }
        if let Some(greeting) = &self.assistant.greeting_reply {
            builder = builder.greeting(greeting);
        }
        for (key, text) in &self.assistant.responses {
            // Keys were checked in validate(); unknown ones are skipped
            if let Ok(topic) = key.parse::<TopicKey>() {
                builder = builder.reply(topic, text);
            }
        }
        builder.build()
    }

    /// Projects in display order.
    pub fn project_catalog(&self) -> ProjectCatalog {
        ProjectCatalog::new(self.projects.clone())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig::default(),
            gateway: GatewayConfig::default(),
            profile: Profile::default(),
            skills: default_skills(),
            projects: default_projects(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
