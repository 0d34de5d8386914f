//! Runtime configuration: store credentials from the environment and the
//! optional YAML seed plan.

use chrono::{DateTime, Utc};
use demo_data_gen::{DemoWindow, EntityKind, Generator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Base endpoint of the remote store
pub const URL_VAR: &str = "SUPABASE_URL";
/// Service credential for the remote store
pub const KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("failed to read seed plan at {path:?}")]
    ReadPlan {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse seed plan at {path:?}")]
    ParsePlan {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
    #[error("invalid seed plan: {message}")]
    InvalidPlan { message: String },
}

/// Connection settings for the remote store, built once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub service_key: String,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    /// Read both settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve settings through `lookup`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing { var })
        };

        let url = read(URL_VAR)?;
        let service_key = read(KEY_VAR)?;
        Ok(Self::new(url, service_key))
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

/// Inclusive bounds on how many prospects one campaign messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageRange {
    pub min: usize,
    pub max: usize,
}

/// Row volumes and demo window for one seeding run.
///
/// Every field is optional in YAML; omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedPlan {
    pub prospects: usize,
    /// Leading prospects (insertion order) that get enrichment data
    pub enriched_prospects: usize,
    /// Leading prospects (insertion order) that get an engagement score
    pub scored_prospects: usize,
    pub campaigns: usize,
    /// Leading campaigns that send messages
    pub messaged_campaigns: usize,
    pub messages_per_campaign: MessageRange,
    pub interactions: usize,
    pub agent_logs: usize,
    pub window_start: DateTime<Utc>,
    pub window_days: u32,
}

impl Default for SeedPlan {
    fn default() -> Self {
        let window = DemoWindow::default();
        let (min, max) = Generator::DEFAULT_MESSAGES_PER_CAMPAIGN;
        Self {
            prospects: 50,
            enriched_prospects: 30,
            scored_prospects: 35,
            campaigns: 10,
            messaged_campaigns: 5,
            messages_per_campaign: MessageRange { min, max },
            interactions: 100,
            agent_logs: 100,
            window_start: window.start,
            window_days: (window.end - window.start).num_days() as u32,
        }
    }
}

impl SeedPlan {
    /// Load and validate a YAML plan
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadPlan {
            path: path.to_path_buf(),
            source,
        })?;
        let plan: SeedPlan =
            serde_yaml_ng::from_str(&raw).map_err(|source| ConfigError::ParsePlan {
                path: path.to_path_buf(),
                source,
            })?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::InvalidPlan { message });

        if self.enriched_prospects > self.prospects {
            return invalid(format!(
                "enriched_prospects ({}) exceeds prospects ({})",
                self.enriched_prospects, self.prospects
            ));
        }
        if self.scored_prospects > self.prospects {
            return invalid(format!(
                "scored_prospects ({}) exceeds prospects ({})",
                self.scored_prospects, self.prospects
            ));
        }
        if self.messaged_campaigns > self.campaigns {
            return invalid(format!(
                "messaged_campaigns ({}) exceeds campaigns ({})",
                self.messaged_campaigns, self.campaigns
            ));
        }
        let range = self.messages_per_campaign;
        if range.min > range.max {
            return invalid(format!(
                "messages_per_campaign.min ({}) exceeds max ({})",
                range.min, range.max
            ));
        }
        if self.prospects == 0 && (self.messaged_campaigns > 0 || self.interactions > 0) {
            return invalid(
                "messages and interactions need at least one prospect".to_string(),
            );
        }
        if self.window_days == 0 {
            return invalid("window_days must be greater than zero".to_string());
        }
        self.window()?;
        Ok(())
    }

    /// The demo window, or `InvalidPlan` when its dates are out of range
    pub fn window(&self) -> Result<DemoWindow, ConfigError> {
        DemoWindow::new(self.window_start, self.window_days).ok_or_else(|| {
            ConfigError::InvalidPlan {
                message: format!(
                    "window of {} days from {} is outside the supported date range",
                    self.window_days, self.window_start
                ),
            }
        })
    }

    /// The `count` handed to the generator for a stage
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Prospect => self.prospects,
            EntityKind::EnrichmentData => self.enriched_prospects,
            EntityKind::EngagementScore => self.scored_prospects,
            EntityKind::Campaign => self.campaigns,
            EntityKind::Message => self.messaged_campaigns,
            EntityKind::Interaction => self.interactions,
            EntityKind::AgentLog => self.agent_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_store_config_from_lookup() {
        let config = StoreConfig::from_lookup(lookup(&[
            (URL_VAR, "https://demo.supabase.co/"),
            (KEY_VAR, "service-key"),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://demo.supabase.co");
        assert_eq!(config.service_key, "service-key");
    }

    #[test]
    fn test_store_config_missing_or_blank() {
        let err = StoreConfig::from_lookup(lookup(&[(KEY_VAR, "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var } if var == URL_VAR));

        let err = StoreConfig::from_lookup(lookup(&[(URL_VAR, "https://x"), (KEY_VAR, "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var } if var == KEY_VAR));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = StoreConfig::new("https://x", "secret-value");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-value"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_default_plan_volumes() {
        let plan = SeedPlan::default();
        assert!(plan.validate().is_ok());
        assert_eq!(plan.count(EntityKind::Prospect), 50);
        assert_eq!(plan.count(EntityKind::EnrichmentData), 30);
        assert_eq!(plan.count(EntityKind::EngagementScore), 35);
        assert_eq!(plan.count(EntityKind::Campaign), 10);
        assert_eq!(plan.count(EntityKind::Message), 5);
        assert_eq!(plan.count(EntityKind::Interaction), 100);
        assert_eq!(plan.count(EntityKind::AgentLog), 100);
        assert_eq!(plan.window().unwrap(), DemoWindow::default());
    }

    #[test]
    fn test_load_partial_plan() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "prospects: 20\nenriched_prospects: 10\nscored_prospects: 12\nmessages_per_campaign:\n  min: 2\n  max: 4\nwindow_start: 2024-06-01T00:00:00Z\nwindow_days: 30"
        )
        .unwrap();

        let plan = SeedPlan::load(file.path()).unwrap();
        assert_eq!(plan.prospects, 20);
        assert_eq!(plan.campaigns, 10);
        assert_eq!(plan.messages_per_campaign, MessageRange { min: 2, max: 4 });
        let window = plan.window().unwrap();
        assert_eq!(window.end - window.start, chrono::TimeDelta::days(30));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "prospect: 20").unwrap();
        let err = SeedPlan::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParsePlan { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SeedPlan::load(Path::new("/nonexistent/plan.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadPlan { .. }));
    }

    #[test]
    fn test_invalid_plans() {
        let plan = SeedPlan {
            enriched_prospects: 60,
            ..Default::default()
        };
        assert!(plan.validate().is_err());

        let plan = SeedPlan {
            messaged_campaigns: 11,
            ..Default::default()
        };
        assert!(plan.validate().is_err());

        let plan = SeedPlan {
            messages_per_campaign: MessageRange { min: 9, max: 3 },
            ..Default::default()
        };
        assert!(plan.validate().is_err());

        let plan = SeedPlan {
            prospects: 0,
            enriched_prospects: 0,
            scored_prospects: 0,
            ..Default::default()
        };
        assert!(plan.validate().is_err());

        let plan = SeedPlan {
            window_days: 0,
            ..Default::default()
        };
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_load_rejects_unrepresentable_window() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "window_days: 4000000000").unwrap();

        let err = SeedPlan::load(file.path()).unwrap_err();
        match err {
            ConfigError::InvalidPlan { message } => {
                assert!(message.contains("4000000000 days"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
