use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Labels and markers the pipeline applies while resolving representatives
/// and selecting payments. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Identity substituted for credit note blocks headed by `undefined_representative`.
    pub fallback_representative: String,
    pub undefined_representative: String,
    /// Label for customers with no representative field populated. Never gets the cash suffix.
    pub unassigned_salesrep: String,
    pub cash_suffix: String,
    pub posted_status: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fallback_representative: "Abdallah".to_string(),
            undefined_representative: "Undefined".to_string(),
            unassigned_salesrep: "Administrator".to_string(),
            cash_suffix: " cash".to_string(),
            posted_status: "posted".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("fallback_representative", &self.fallback_representative),
            ("undefined_representative", &self.undefined_representative),
            ("unassigned_salesrep", &self.unassigned_salesrep),
            ("posted_status", &self.posted_status),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DashboardError::InvalidConfig(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.unassigned_salesrep, "Administrator");
        assert_eq!(config.cash_suffix, " cash");
    }

    #[test]
    fn test_partial_override() {
        let config =
            DashboardConfig::from_json_str(r#"{"fallback_representative": "Omar"}"#).unwrap();
        assert_eq!(config.fallback_representative, "Omar");
        assert_eq!(config.posted_status, "posted");
    }

    #[test]
    fn test_blank_fallback_rejected() {
        let err = DashboardConfig::from_json_str(r#"{"fallback_representative": "  "}"#)
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
    }

    #[test]
    fn test_blank_undefined_marker_rejected() {
        let err = DashboardConfig::from_json_str(r#"{"undefined_representative": ""}"#)
            .unwrap_err();
        assert!(
            matches!(err, DashboardError::InvalidConfig(msg) if msg.contains("undefined_representative"))
        );
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = DashboardConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DashboardError::SerializationError(_)));
    }
}
