//! Tracing export and Prometheus settings (`observability` section)

use serde::Deserialize;

const SERVICE_NAME: &str = "ledger-api";
const OTLP_ENDPOINT: &str = "http://localhost:4317";
const METRICS_PATH: &str = "/metrics";

/// Request latency buckets in seconds, sized for single-statement SQL calls
/// and Argon2 verification on login
const LATENCY_BUCKETS: [f64; 10] = [0.002, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub tracing: TracingConfig,
    pub metrics: MetricsConfig,
}

/// OTLP span export, off unless enabled
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub enabled: bool,
    pub otlp_endpoint: String,
    pub service_name: String,
    /// Fraction of traces kept; values outside [0, 1] are clamped
    pub sampling_ratio: f64,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: OTLP_ENDPOINT.to_string(),
            service_name: SERVICE_NAME.to_string(),
            sampling_ratio: 1.0,
        }
    }
}

impl TracingConfig {
    pub fn sampling_ratio(&self) -> f64 {
        if self.sampling_ratio.is_nan() {
            return 1.0;
        }

        self.sampling_ratio.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
    /// Histogram buckets for `http_request_duration_seconds`
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: METRICS_PATH.to_string(),
            latency_buckets: LATENCY_BUCKETS.to_vec(),
        }
    }
}

impl MetricsConfig {
    /// Configured buckets sorted and deduplicated, or the defaults when empty
    pub fn latency_buckets(&self) -> Vec<f64> {
        let mut buckets: Vec<f64> = self
            .latency_buckets
            .iter()
            .copied()
            .filter(|b| b.is_finite() && *b > 0.0)
            .collect();

        if buckets.is_empty() {
            return LATENCY_BUCKETS.to_vec();
        }

        buckets.sort_by(f64::total_cmp);
        buckets.dedup();
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ObservabilityConfig::default();

        assert!(!config.tracing.enabled);
        assert_eq!(config.tracing.service_name, "ledger-api");
        assert_eq!(config.tracing.otlp_endpoint, "http://localhost:4317");
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.path, "/metrics");
        assert_eq!(config.metrics.latency_buckets(), LATENCY_BUCKETS.to_vec());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: ObservabilityConfig =
            serde_json::from_str(r#"{"tracing": {"enabled": true, "sampling_ratio": 0.5}}"#)
                .unwrap();

        assert!(config.tracing.enabled);
        assert_eq!(config.tracing.sampling_ratio(), 0.5);
        assert_eq!(config.tracing.service_name, "ledger-api");
        assert_eq!(config.metrics.path, "/metrics");
    }

    #[test]
    fn test_sampling_ratio_is_clamped() {
        let mut config = TracingConfig {
            sampling_ratio: 4.0,
            ..TracingConfig::default()
        };
        assert_eq!(config.sampling_ratio(), 1.0);

        config.sampling_ratio = -0.3;
        assert_eq!(config.sampling_ratio(), 0.0);

        config.sampling_ratio = f64::NAN;
        assert_eq!(config.sampling_ratio(), 1.0);
    }

    #[test]
    fn test_latency_buckets_are_cleaned() {
        let config: MetricsConfig =
            serde_json::from_str(r#"{"latency_buckets": [0.5, 0.1, -1, 0.5, 0]}"#).unwrap();

        assert_eq!(config.latency_buckets(), vec![0.1, 0.5]);

        let empty: MetricsConfig = serde_json::from_str(r#"{"latency_buckets": []}"#).unwrap();
        assert_eq!(empty.latency_buckets(), LATENCY_BUCKETS.to_vec());
    }
}
