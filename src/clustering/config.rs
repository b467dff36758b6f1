use crate::clustering::{DbscanParams, KMeansParams, KMedoidsParams, SilhouetteParams};
use crate::distances::DistanceMetric;
use crate::error::ClusterError;
use log::{error, LevelFilter};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum AlgorithmConfig {
    KMeans { k: usize },
    KMedoids { k: usize },
    Dbscan { epsilon: f64, min_points: usize },
    Silhouette,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String, // Log level, e.g., "info", "debug", "warn", "error"
}

/// Declarative run configuration: which engine, which metric, which seed.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub algorithm: AlgorithmConfig,
    pub distance_metric: DistanceMetric, // E.g., "Euclidean"
    pub seed: Option<u64>,
    pub logging: Option<LoggingConfig>,
}

/// Typed parameters for whichever engine the configuration selected.
#[derive(Debug, Clone)]
pub enum EngineParams {
    KMeans(KMeansParams),
    KMedoids(KMedoidsParams),
    Dbscan(DbscanParams),
    Silhouette(SilhouetteParams),
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        match &self.algorithm {
            AlgorithmConfig::KMeans { k } => {
                writeln!(f, "  Algorithm: k-means")?;
                writeln!(f, "    K: {}", k)?;
            }
            AlgorithmConfig::KMedoids { k } => {
                writeln!(f, "  Algorithm: k-medoids")?;
                writeln!(f, "    K: {}", k)?;
            }
            AlgorithmConfig::Dbscan {
                epsilon,
                min_points,
            } => {
                writeln!(f, "  Algorithm: dbscan")?;
                writeln!(f, "    Epsilon: {}", epsilon)?;
                writeln!(f, "    Min Points: {}", min_points)?;
            }
            AlgorithmConfig::Silhouette => {
                writeln!(f, "  Algorithm: silhouette")?;
            }
        }
        writeln!(f, "  Distance Metric: {:?}", self.distance_metric)?;
        if let Some(seed) = self.seed {
            writeln!(f, "  Seed: {}", seed)?;
        } else {
            writeln!(f, "  Seed: clock-derived")?;
        }
        Ok(())
    }
}

impl Config {
    /// Reads the YAML configuration file and returns a `Config` instance.
    pub fn from_file(file_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(file_path)?;
        let config: Config = serde_yaml::from_str(&file_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClusterError> {
        match &self.algorithm {
            AlgorithmConfig::KMeans { k } | AlgorithmConfig::KMedoids { k } => {
                if *k == 0 {
                    return Err(ClusterError::InvalidParameter(
                        "k must be greater than 0".into(),
                    ));
                }
            }
            AlgorithmConfig::Dbscan {
                epsilon,
                min_points,
            } => {
                if *epsilon <= 0.0 || !epsilon.is_finite() {
                    return Err(ClusterError::InvalidParameter(
                        "epsilon must be positive and finite".into(),
                    ));
                }
                if *min_points == 0 {
                    return Err(ClusterError::InvalidParameter(
                        "min_points must be greater than 0".into(),
                    ));
                }
            }
            AlgorithmConfig::Silhouette => {}
        }
        Ok(())
    }

    /// Converts the configuration into typed engine parameters.
    pub fn to_engine_params(&self) -> EngineParams {
        match &self.algorithm {
            AlgorithmConfig::KMeans { k } => EngineParams::KMeans(KMeansParams {
                k: *k,
                metric: self.distance_metric,
                seed: self.seed,
            }),
            AlgorithmConfig::KMedoids { k } => EngineParams::KMedoids(KMedoidsParams {
                k: *k,
                metric: self.distance_metric,
                seed: self.seed,
            }),
            AlgorithmConfig::Dbscan {
                epsilon,
                min_points,
            } => EngineParams::Dbscan(DbscanParams {
                epsilon: *epsilon,
                min_points: *min_points,
                metric: self.distance_metric,
            }),
            AlgorithmConfig::Silhouette => EngineParams::Silhouette(SilhouetteParams {
                metric: self.distance_metric,
            }),
        }
    }

    /// Sets up logging based on the logging level in the configuration.
    pub fn setup_logging(&self) {
        let level = self
            .logging
            .as_ref()
            .map(|l| l.level.as_str())
            .unwrap_or("info");
        let level_filter = match level.to_lowercase().as_str() {
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            other => {
                error!("Unsupported log level {}, defaulting to info", other);
                LevelFilter::Info
            }
        };

        if let Err(e) = env_logger::Builder::new()
            .filter_level(level_filter)
            .try_init()
        {
            error!("Failed to initialize logger: {}", e);
        }
    }
}
