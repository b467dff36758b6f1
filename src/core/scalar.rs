use num_traits::{FromPrimitive, ToPrimitive, Zero};
use std::fmt::Debug;

// A scalar trait that captures the requirements we need for the various
// places we read feature components. These requirements are imposed by
// ndarray and the f64 distance accumulation.
pub trait ClusterScalar:
    Copy
    + Debug
    + Default
    + PartialOrd
    + Zero
    + ToPrimitive
    + FromPrimitive
    + Sync
    + Send
    + 'static
{
    /// Widens the component to `f64` for distance accumulation.
    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }

    /// Narrows an `f64` mean back to the buffer's scalar type.
    #[inline]
    fn from_mean(value: f64) -> Self {
        Self::from_f64(value).unwrap_or_else(Self::zero)
    }
}

impl ClusterScalar for i8 {}
impl ClusterScalar for u8 {}
impl ClusterScalar for i16 {}
impl ClusterScalar for u16 {}
impl ClusterScalar for i32 {}
impl ClusterScalar for u32 {}
impl ClusterScalar for i64 {}
impl ClusterScalar for u64 {}
impl ClusterScalar for f32 {}
impl ClusterScalar for f64 {}
