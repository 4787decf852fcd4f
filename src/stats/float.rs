//! Float trait

use std::fmt;

use cast::From;
use num_traits::float;

/// This is an extension of `num_traits::float::Float` that adds safe
/// casting, `Debug` and Sync + Send.
pub trait Float:
    float::Float + From<usize, Output = Self> + From<f32, Output = Self> + fmt::Debug + Sync + Send
{
    /// Converts a criterion or option value into this float type
    ///
    /// Values outside of the representable range saturate to infinity, the way an `as` cast does.
    fn from_f64(x: f64) -> Self;
}

impl Float for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(x: f64) -> f32 {
        x as f32
    }
}

impl Float for f64 {
    fn from_f64(x: f64) -> f64 {
        x
    }
}
