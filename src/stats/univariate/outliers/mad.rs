//! Median absolute deviation method
//!
//! Every observation gets a *robust z-score*: its distance to the median of the sample, measured
//! in units of the (consistency corrected) median absolute deviation.
//!
//! ``` ignore
//! let center = median(sample);
//! let scale = 1.4826 * median(|x - center|);
//!
//! let is_outlier = |x| (x - center).abs() / scale > crit;
//! ```
//!
//! Unlike the mean and the standard deviation, neither the median nor the MAD move much when a
//! few extreme points are added, so the outliers can't hide themselves by inflating the scale.
//!
//! ``` ignore
//!            LOW              NOT AN OUTLIER              HIGH
//!         x   x   |  o o  o    o   o o  o  o o  |    x
//!                 c - crit * s                  c + crit * s
//!
//! Legend:
//! o: normal data
//! x: outlier
//! ```
//!
//! A sample whose MAD is zero (more than half of the points share the median) has no usable
//! scale, and nothing in it is labeled as an outlier.

use std::ops::Deref;
use std::slice;

use crate::stats::float::Float;
use crate::stats::univariate::Sample;

use self::Label::*;

/// A classified/labeled sample.
///
/// The order of the data points is retained, so the `n`th label of the iterator belongs to the
/// `n`th data point.
#[derive(Clone, Copy)]
pub struct LabeledSample<'a, A>
where
    A: Float,
{
    center: A,
    scale: A,
    crit: A,
    sample: &'a Sample<A>,
}

impl<'a, A> LabeledSample<'a, A>
where
    A: Float,
{
    /// Returns the median the distances are measured from
    pub fn center(&self) -> A {
        self.center
    }

    /// Returns the scaled median absolute deviation used as unit of distance
    pub fn scale(&self) -> A {
        self.scale
    }

    /// Returns the number of robust standard deviations past which a point is an outlier
    pub fn crit(&self) -> A {
        self.crit
    }

    /// Returns the number of data points per label, as `(low, not an outlier, high)`
    ///
    /// - Time: `O(length)`
    pub fn count(&self) -> (usize, usize, usize) {
        let (mut low, mut noa, mut high) = (0, 0, 0);

        for (_, label) in self {
            match label {
                Low => low += 1,
                NotAnOutlier => noa += 1,
                High => high += 1,
            }
        }

        (low, noa, high)
    }

    /// Returns the `(low, high)` fences, `center -/+ crit * scale`
    ///
    /// The labels are computed from the z-scores directly, these are only informative.
    pub fn fences(&self) -> (A, A) {
        let width = self.crit * self.scale;

        (self.center - width, self.center + width)
    }

    /// Returns an iterator over the labeled data
    pub fn iter(&self) -> Iter<'a, A> {
        Iter {
            center: self.center,
            scale: self.scale,
            crit: self.crit,
            iter: self.sample.iter(),
        }
    }

    /// Returns the robust z-score of `x`, or `None` if the sample has no usable scale
    pub fn z_score(&self, x: A) -> Option<A> {
        z_score(x, self.center, self.scale)
    }
}

impl<'a, A> Deref for LabeledSample<'a, A>
where
    A: Float,
{
    type Target = Sample<A>;

    fn deref(&self) -> &Sample<A> {
        self.sample
    }
}

impl<'a, A> IntoIterator for &LabeledSample<'a, A>
where
    A: Float,
{
    type Item = (A, Label);
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Iter<'a, A> {
        self.iter()
    }
}

/// Iterator over the labeled data
pub struct Iter<'a, A>
where
    A: Float,
{
    center: A,
    scale: A,
    crit: A,
    iter: slice::Iter<'a, A>,
}

impl<'a, A> Iterator for Iter<'a, A>
where
    A: Float,
{
    type Item = (A, Label);

    fn next(&mut self) -> Option<(A, Label)> {
        self.iter
            .next()
            .map(|&x| (x, label(x, self.center, self.scale, self.crit)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Labels used to classify outliers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// An outlier above the median
    High,
    /// An outlier below the median
    Low,
    /// A normal data point
    NotAnOutlier,
}

impl Label {
    /// Checks if the data point has an "unusually" high value
    pub fn is_high(&self) -> bool {
        matches!(*self, High)
    }

    /// Checks if the data point has an "unusually" low value
    pub fn is_low(&self) -> bool {
        matches!(*self, Low)
    }

    /// Checks if the data point is labeled as an outlier
    pub fn is_outlier(&self) -> bool {
        !matches!(*self, NotAnOutlier)
    }
}

fn z_score<A>(x: A, center: A, scale: A) -> Option<A>
where
    A: Float,
{
    if scale > A::cast(0) {
        Some((x - center).abs() / scale)
    } else {
        None
    }
}

fn label<A>(x: A, center: A, scale: A, crit: A) -> Label
where
    A: Float,
{
    match z_score(x, center, scale) {
        Some(z) if z > crit => {
            if x > center {
                High
            } else {
                Low
            }
        }
        _ => NotAnOutlier,
    }
}

/// Classifies the sample, and returns a labeled sample.
///
/// A point is an outlier when its robust z-score is strictly greater than `crit`.
///
/// - Time: `O(N log N) where N = length`
pub fn classify<A>(sample: &Sample<A>, crit: A) -> LabeledSample<'_, A>
where
    A: Float,
    usize: cast::From<A, Output = Result<usize, cast::Error>>,
{
    let center = sample.median();
    let scale = sample.median_abs_dev(Some(center));

    LabeledSample {
        center,
        scale,
        crit,
        sample,
    }
}
