use std::time::Duration;

use crate::contract::Provider;

/// Thresholds applied by the response checks
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Status code the service documents for a successful conversion (Default: 200)
    pub expected_status: u16,

    /// Round-trip ceiling; responses at or above it fail the latency check (Default: 10s)
    pub latency_ceiling: Duration,

    /// Absolute tolerance for expected coordinate matching (Default: 0.0001)
    pub coordinate_tolerance: f64,

    /// Leading characters of each coordinate that must appear in a map link (Default: 8)
    pub link_coordinate_prefix: usize,

    /// Providers whose links must embed the coordinates (Default: google, apple)
    pub coordinate_link_providers: Vec<Provider>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            expected_status: 200,
            latency_ceiling: Duration::from_millis(10_000),
            coordinate_tolerance: 0.0001,
            link_coordinate_prefix: 8,
            coordinate_link_providers: vec![Provider::Google, Provider::Apple],
        }
    }
}

impl ValidatorConfig {
    /// Create a new configuration with all default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for slow staging deployments
    pub fn lenient() -> Self {
        Self {
            latency_ceiling: Duration::from_millis(30_000),
            ..Self::default()
        }
    }

    /// Create a configuration that also checks every provider link for coordinates
    pub fn strict() -> Self {
        Self {
            latency_ceiling: Duration::from_millis(5_000),
            coordinate_link_providers: Provider::ALL.to_vec(),
            ..Self::default()
        }
    }

    /// Override the latency ceiling
    pub fn with_latency_ceiling(mut self, ceiling: Duration) -> Self {
        self.latency_ceiling = ceiling;
        self
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !(100..=599).contains(&self.expected_status) {
            return Err(format!(
                "expected_status must be an HTTP status code, got {}",
                self.expected_status
            ));
        }

        if self.latency_ceiling.is_zero() {
            return Err("latency_ceiling must be greater than 0".to_string());
        }

        if !self.coordinate_tolerance.is_finite() || self.coordinate_tolerance <= 0.0 {
            return Err("coordinate_tolerance must be a positive number".to_string());
        }

        if self.link_coordinate_prefix == 0 {
            return Err("link_coordinate_prefix must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let config = ValidatorConfig::default();
        assert_eq!(config.expected_status, 200);
        assert_eq!(config.latency_ceiling, Duration::from_millis(10_000));
        assert_eq!(config.coordinate_tolerance, 0.0001);
        assert_eq!(config.link_coordinate_prefix, 8);
        assert_eq!(
            config.coordinate_link_providers,
            vec![Provider::Google, Provider::Apple]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ValidatorConfig::lenient().validate().is_ok());
        assert!(ValidatorConfig::strict().validate().is_ok());
        assert_eq!(ValidatorConfig::strict().coordinate_link_providers.len(), 6);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let config = ValidatorConfig::new().with_latency_ceiling(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = ValidatorConfig {
            coordinate_tolerance: f64::NAN,
            ..ValidatorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ValidatorConfig {
            expected_status: 42,
            ..ValidatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
