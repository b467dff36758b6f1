pub mod scalar;

pub use scalar::ClusterScalar;
