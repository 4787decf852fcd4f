use std::{mem, ops};

use crate::stats::float::Float;
use crate::stats::univariate::Percentiles;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A collection of observations with the missing values already removed
///
/// Invariants:
///
/// - The sample contains at least 1 data point
/// - The sample contains no `NaN`s
#[repr(transparent)]
pub struct Sample<A>([A]);

impl<A> Sample<A>
where
    A: Float,
{
    /// Creates a new sample from an existing slice
    ///
    /// # Panics
    ///
    /// Panics if `slice` contains any `NaN` or if `slice` is empty
    #[allow(clippy::new_ret_no_self)]
    pub fn new(slice: &[A]) -> &Sample<A> {
        match Sample::try_new(slice) {
            Some(sample) => sample,
            None => panic!("a sample needs at least one data point and no NaNs"),
        }
    }

    /// Creates a new sample from an existing slice, or `None` if the slice is empty or contains
    /// a `NaN`
    pub fn try_new(slice: &[A]) -> Option<&Sample<A>> {
        if slice.is_empty() || slice.iter().any(|x| x.is_nan()) {
            return None;
        }

        // SAFETY: `Sample` is a `repr(transparent)` wrapper around `[A]`
        Some(unsafe { mem::transmute::<&[A], &Sample<A>>(slice) })
    }

    /// Returns the biggest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn max(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&head) => elems.fold(head, |a, &b| a.max(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns the arithmetic average of the sample
    ///
    /// - Time: `O(length)`
    pub fn mean(&self) -> A {
        let n = self.len();

        self.sum() / A::cast(n)
    }

    /// Returns the median
    ///
    /// - Time: `O(N log N) where N = length`
    pub fn median(&self) -> A
    where
        usize: cast::From<A, Output = Result<usize, cast::Error>>,
    {
        self.percentiles().median()
    }

    /// Returns the median absolute deviation, scaled by `1.4826` so that it estimates the
    /// standard deviation of normally distributed data
    ///
    /// The `median` can be optionally passed along to speed up (2X) the computation
    ///
    /// - Time: `O(N log N) where N = length`
    /// - Memory: `O(length)`
    pub fn median_abs_dev(&self, median: Option<A>) -> A
    where
        usize: cast::From<A, Output = Result<usize, cast::Error>>,
    {
        let median = median.unwrap_or_else(|| self.median());

        let abs_devs = self.iter().map(|&x| (x - median).abs()).collect::<Vec<_>>();

        sorted(abs_devs.into_boxed_slice()).median() * consistency_constant()
    }

    /// Returns the smallest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn min(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&elem) => elems.fold(elem, |a, &b| a.min(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns a "view" into the percentiles of the sample
    ///
    /// This "view" makes consecutive computations of percentiles much faster (`O(1)`)
    ///
    /// - Time: `O(N log N) where N = length`
    /// - Memory: `O(length)`
    pub fn percentiles(&self) -> Percentiles<A>
    where
        usize: cast::From<A, Output = Result<usize, cast::Error>>,
    {
        sorted(self.to_vec().into_boxed_slice())
    }

    /// Returns the sum of all the elements of the sample
    ///
    /// - Time: `O(length)`
    pub fn sum(&self) -> A {
        crate::stats::sum(self)
    }
}

impl<A> ops::Deref for Sample<A> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.0
    }
}

/// `1.4826`, built from integers so that `f64` gets the closest representable value
fn consistency_constant<A>() -> A
where
    A: Float,
{
    A::cast(14_826) / A::cast(10_000)
}

fn sorted<A>(mut v: Box<[A]>) -> Percentiles<A>
where
    A: Float,
    usize: cast::From<A, Output = Result<usize, cast::Error>>,
{
    use std::cmp::Ordering;

    // NB `NaN`s are kept out of samples, but absolute deviations of infinite data can still
    // produce them
    fn cmp<T>(a: &T, b: &T) -> Ordering
    where
        T: PartialOrd,
    {
        match a.partial_cmp(b) {
            Some(o) => o,
            None => Ordering::Equal,
        }
    }

    #[cfg(feature = "rayon")]
    v.par_sort_unstable_by(cmp);
    #[cfg(not(feature = "rayon"))]
    v.sort_unstable_by(cmp);

    Percentiles::from_sorted(v)
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::relative_eq;
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use crate::stats::univariate::Sample;

            quickcheck! {
                fn median_within_bounds(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]);
                        let median = sample.median();

                        TestResult::from_bool(
                            (median > sample.min() || relative_eq!(median, sample.min())) &&
                            (median < sample.max() || relative_eq!(median, sample.max()))
                        )
                    } else {
                        TestResult::discard()
                    }
                }
            }

            quickcheck! {
                fn mad_is_non_negative(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]);

                        TestResult::from_bool(sample.median_abs_dev(None) >= 0.)
                    } else {
                        TestResult::discard()
                    }
                }
            }

            quickcheck! {
                fn mad_with_precomputed_median(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]);
                        let median = sample.median();

                        TestResult::from_bool(relative_eq!(
                            sample.median_abs_dev(Some(median)),
                            sample.median_abs_dev(None)
                        ))
                    } else {
                        TestResult::discard()
                    }
                }
            }
        }
    };
}


#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::stats::univariate::Sample;

    #[test]
    fn rejects_nan_and_empty() {
        assert!(Sample::<f64>::try_new(&[]).is_none());
        assert!(Sample::try_new(&[1., std::f64::NAN, 3.]).is_none());
        assert!(Sample::try_new(&[1., std::f64::INFINITY]).is_some());
    }

    #[test]
    #[should_panic]
    fn new_panics_on_empty() {
        Sample::<f32>::new(&[]);
    }

    #[test]
    fn median_abs_dev() {
        // |x - 3| = [2, 1, 0, 1, 97], whose median is 1
        let sample = Sample::new(&[1_f64, 2., 3., 4., 100.]);

        assert_relative_eq!(sample.median(), 3.);
        assert_relative_eq!(sample.median_abs_dev(None), 1.4826);
    }

    #[test]
    fn median_abs_dev_of_constant_sample() {
        let sample = Sample::new(&[5_f64, 5., 5., 5., 9.]);

        assert_relative_eq!(sample.median_abs_dev(None), 0.);
    }

    #[test]
    fn mean_min_max() {
        let sample = Sample::new(&[2_f32, -1., 8., 3.]);

        assert_relative_eq!(sample.mean(), 3.);
        assert_relative_eq!(sample.min(), -1.);
        assert_relative_eq!(sample.max(), 8.);
    }
}
