/// nxcluster: unsupervised clustering for dense feature buffers.
///
/// Feature data is an N x D view of any numeric scalar type; every engine
/// takes an optional per-tuple usability mask, a pluggable distance metric,
/// and a cooperative cancellation token, and writes its results into
/// caller-owned buffers.
///
/// # Modules
/// - `clustering`: the k-means, k-medoids, DBSCAN, and silhouette engines.
/// - `distances`: the distance metrics shared by all engines.
pub mod cancel;
pub mod clustering;
pub mod core;
pub mod distances;
pub mod error;
