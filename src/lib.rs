//! Outlier detection with robust z-scores.
//!
//! An observation is flagged when its distance to the median of the data, measured in
//! median absolute deviations (scaled by `1.4826` to estimate a standard deviation), is greater
//! than a criterion. Both the median and the MAD barely move when a few extreme values are added,
//! which is what makes the score robust.
//!
//! ## Features:
//! * Missing values, either as `Option`s, `NaN`s or loosely typed `Datum`s, optionally dropped
//!   before computing the statistics
//! * Fatal errors for unusable input, warnings for input that can be corrected
//! * Options checked by name, with unknown names rejected
//!
//! ```
//! use robust_outliers::Detector;
//!
//! let mut x = vec![25.0; 98];
//! for (i, x) in x.iter_mut().enumerate() {
//!     *x += (i % 7) as f64 * 0.1 - 0.3;
//! }
//! x.insert(10, 625.0);
//! x.insert(60, 627.5);
//!
//! let outliers = Detector::new().detect_slice(&x).unwrap();
//!
//! assert_eq!(outliers.index(), &[10, 60]);
//! assert_eq!(outliers.value(), &[625.0, 627.5]);
//! ```
//!
//! Recoverable conditions are reported in `Outliers::warnings` and emitted as `tracing` events;
//! the crate never installs a subscriber.

#![warn(missing_docs)]
#![warn(bare_trait_objects)]
#![cfg_attr(feature = "cargo-clippy", allow(
    clippy::float_cmp, // Intentional float comparisons in tests
))]

mod crit;
mod detector;
mod error;
mod options;
mod value;
mod warning;

pub mod stats;

pub use crate::crit::DEFAULT_CRITERION;
pub use crate::detector::{detect, Detector, Outliers};
pub use crate::error::{Error, Result};
pub use crate::options::DetectorOptions;
pub use crate::value::Datum;
pub use crate::warning::Warning;
