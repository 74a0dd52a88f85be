//! Weight-solver service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the external weight-solver service.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    /// Base URL of the solver service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Path of the AHP calculate endpoint.
    #[serde(default = "default_ahp_path")]
    pub ahp_path: String,

    /// Path of the BWM calculate endpoint.
    #[serde(default = "default_bwm_path")]
    pub bwm_path: String,
}

impl SolverConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the AHP endpoint.
    pub fn ahp_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.ahp_path)
    }

    /// Full URL of the BWM endpoint.
    pub fn bwm_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.bwm_path)
    }

    /// Validate solver configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("SOLVER_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidSolverUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            ahp_path: default_ahp_path(),
            bwm_path: default_bwm_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_ahp_path() -> String {
    "/calculate".to_string()
}

fn default_bwm_path() -> String {
    "/calculate_bwm".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn endpoint_urls_join_without_double_slashes() {
        let config = SolverConfig {
            base_url: "https://solver.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.ahp_url(), "https://solver.example.com/calculate");
        assert_eq!(config.bwm_url(), "https://solver.example.com/calculate_bwm");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = SolverConfig {
            base_url: "ftp://solver".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSolverUrl));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = SolverConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
