//! Univariate analysis

mod percentiles;
mod sample;

pub mod outliers;

pub use self::percentiles::Percentiles;
pub use self::sample::Sample;
