pub mod config;
pub mod dbscan;
pub mod kmeans;
pub mod kmedoids;
pub mod silhouette;
pub mod utils;

pub use config::{AlgorithmConfig, Config, EngineParams, LoggingConfig};
pub use dbscan::{Dbscan, DbscanParams, DbscanRun};
pub use kmeans::{KMeans, KMeansParams, KMeansRun};
pub use kmedoids::{KMedoids, KMedoidsParams, KMedoidsRun};
pub use silhouette::{Silhouette, SilhouetteParams, SilhouetteRun};
