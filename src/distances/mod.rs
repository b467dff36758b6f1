pub mod distance;

pub use distance::{distance, DistanceMetric};
