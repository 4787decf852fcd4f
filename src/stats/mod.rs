//! Order statistics backing the outlier detector.
//!
//! Everything here assumes a clean sample: no missing values and at least one data point. Missing
//! value handling happens one layer up, in the detector.


pub mod univariate;

mod float;

pub use crate::stats::float::Float;

fn sum<A>(xs: &[A]) -> A
where
    A: Float,
{
    use std::ops::Add;

    xs.iter().cloned().fold(A::cast(0), Add::add)
}
