use crate::stats::float::Float;
use cast::usize;

/// A "view" into the percentiles of a sample
///
/// The underlying data is sorted in ascending order and never empty.
pub struct Percentiles<A>(Box<[A]>)
where
    A: Float;

impl<A> Percentiles<A>
where
    A: Float,
    usize: cast::From<A, Output = Result<usize, cast::Error>>,
{
    /// Wraps already sorted data
    pub(crate) fn from_sorted(sorted: Box<[A]>) -> Percentiles<A> {
        debug_assert!(!sorted.is_empty());

        Percentiles(sorted)
    }

    /// Returns the percentile at `p`%
    ///
    /// Interpolates linearly between the two closest ranks, so the 50th percentile of an even
    /// sized sample is the mean of its two middle elements.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the closed `[0, 100]` range
    pub fn at(&self, p: A) -> A {
        let _0 = A::cast(0);
        let _100 = A::cast(100);

        assert!(p >= _0 && p <= _100);

        let len = self.0.len() - 1;

        if p == _100 {
            return self.0[len];
        }

        let rank = (p / _100) * A::cast(len);
        let integer = rank.floor();
        let fraction = rank - integer;
        let n = usize(integer).unwrap_or(len);
        let floor = self.0[n];

        // NB a one element sample has no ceiling
        match self.0.get(n + 1) {
            Some(&ceiling) => floor + (ceiling - floor) * fraction,
            None => floor,
        }
    }

    /// Returns the interquartile range
    pub fn iqr(&self) -> A {
        let q1 = self.at(A::cast(25));
        let q3 = self.at(A::cast(75));

        q3 - q1
    }

    /// Returns the 50th percentile
    pub fn median(&self) -> A {
        self.at(A::cast(50))
    }

    /// Returns the 25th, 50th and 75th percentiles
    pub fn quartiles(&self) -> (A, A, A) {
        (
            self.at(A::cast(25)),
            self.at(A::cast(50)),
            self.at(A::cast(75)),
        )
    }

    /// Returns the number of data points behind this view
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, a percentile view is never empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
