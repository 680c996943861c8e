use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `INSIGHT__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub rollup: RollupConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentationConfig {
    /// Upper bound on the customer population pulled into one run.
    #[serde(default = "default_scan_limit")]
    pub scan_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RollupConfig {
    /// Capacity of the rollup request queue. Requests beyond this are
    /// dropped (the rollup contract is best-effort).
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

// Default functions
fn default_node_id() -> String {
    "node-01".to_string()
}
fn default_scan_limit() -> usize {
    1000
}
fn default_queue_capacity() -> usize {
    1024
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            scan_limit: default_scan_limit(),
        }
    }
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            segmentation: SegmentationConfig::default(),
            rollup: RollupConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("INSIGHT")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
