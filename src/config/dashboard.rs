// src/config/dashboard.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::aggregate::{OtherBucketPolicy, DEFAULT_OTHER_THRESHOLD};
use crate::projector::NO_DATA;
use crate::ranking::SummaryOptions;

pub const ENV_DASHBOARD_CONFIG_PATH: &str = "DASHBOARD_CONFIG_PATH";
pub const ENV_OTHER_THRESHOLD: &str = "DASHBOARD_OTHER_THRESHOLD";
pub const DEFAULT_TOML_PATH: &str = "config/dashboard.toml";
pub const DEFAULT_JSON_PATH: &str = "config/dashboard.json";

const DEFAULT_MAX_POSTS: usize = 200;
const DEFAULT_RESULT_LIMIT: usize = 20;
const DEFAULT_MIN_TEXT_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Share of total pie weight below which a slice folds into "Other".
    pub other_threshold: f64,
    /// Text shown when there is no dominant emotion.
    pub no_data_label: String,
    /// Upper bound of posts kept by `/summary` sampling.
    pub max_posts: usize,
    /// Posts returned per summary; split evenly across the three sources.
    pub result_limit: usize,
    /// Posts with trimmed text this short (or shorter) are dropped by sampling.
    pub min_text_chars: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            other_threshold: DEFAULT_OTHER_THRESHOLD,
            no_data_label: NO_DATA.to_string(),
            max_posts: DEFAULT_MAX_POSTS,
            result_limit: DEFAULT_RESULT_LIMIT,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }
}

impl DashboardConfig {
    /// Load from an explicit path. TOML or JSON by extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading dashboard config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg: Self = match ext.as_str() {
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("parsing JSON config {}", path.display()))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("parsing TOML config {}", path.display()))?,
        };
        Ok(cfg.sanitized())
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $DASHBOARD_CONFIG_PATH
    /// 2) config/dashboard.toml
    /// 3) config/dashboard.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        let base = if let Ok(p) = env::var(ENV_DASHBOARD_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_DASHBOARD_CONFIG_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_TOML_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_TOML_PATH))?
        } else if Path::new(DEFAULT_JSON_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_JSON_PATH))?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(t) = parse_threshold_env(env::var(ENV_OTHER_THRESHOLD).ok()) {
            self.other_threshold = t;
        }
        self
    }

    fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.other_threshold) {
            tracing::warn!(
                other_threshold = self.other_threshold,
                "other_threshold outside [0,1]; using default"
            );
            self.other_threshold = DEFAULT_OTHER_THRESHOLD;
        }
        if self.result_limit == 0 {
            self.result_limit = DEFAULT_RESULT_LIMIT;
        }
        if self.no_data_label.trim().is_empty() {
            self.no_data_label = NO_DATA.to_string();
        }
        self
    }

    pub fn other_policy(&self) -> OtherBucketPolicy {
        OtherBucketPolicy::new(self.other_threshold)
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            min_text_chars: self.min_text_chars,
            max_posts: self.max_posts,
            result_limit: self.result_limit,
        }
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}
