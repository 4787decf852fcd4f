use serde_derive::Serialize;

use crate::crit::{self, DEFAULT_CRITERION};
use crate::error::{Error, Result};
use crate::options::DetectorOptions;
use crate::stats::univariate::outliers::mad;
use crate::stats::univariate::Sample;
use crate::stats::Float;
use crate::value::Datum;
use crate::warning::{Warning, Warnings};

/// Flags the observations whose robust z-score exceeds a criterion
///
/// ```
/// use robust_outliers::Detector;
///
/// let x = [Some(24.9), Some(25.1), None, Some(25.0), Some(625.0), Some(24.8)];
/// let outliers = Detector::new().drop_missing(true).detect(&x).unwrap();
///
/// assert_eq!(outliers.index(), &[4]);
/// assert_eq!(outliers.value(), &[625.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detector {
    crit: f64,
    drop_missing: bool,
}

impl Default for Detector {
    fn default() -> Detector {
        Detector {
            crit: DEFAULT_CRITERION,
            drop_missing: false,
        }
    }
}

impl From<DetectorOptions> for Detector {
    fn from(options: DetectorOptions) -> Detector {
        Detector {
            crit: options.crit,
            drop_missing: options.drop_missing,
        }
    }
}

impl Detector {
    /// A detector with the default criterion (4) that keeps missing values
    pub fn new() -> Detector {
        Detector::default()
    }

    /// Changes the number of robust standard deviations past which a point is flagged
    ///
    /// The value is validated when detecting: `NaN` counts as a missing criterion and negative
    /// values are replaced by their absolute value, both with a warning.
    pub fn criterion(mut self, crit: f64) -> Detector {
        self.crit = crit;
        self
    }

    /// Changes whether missing values are excluded before computing the median and the MAD
    ///
    /// When they are kept and at least one is present, the median is itself missing and no
    /// observation gets flagged.
    pub fn drop_missing(mut self, drop_missing: bool) -> Detector {
        self.drop_missing = drop_missing;
        self
    }

    /// Flags the outliers of `x`, where `None` and `NaN` are missing values
    ///
    /// # Errors
    ///
    /// Fails with `AllMissing` when `x` holds no number at all.
    pub fn detect<A>(&self, x: &[Option<A>]) -> Result<Outliers<A>>
    where
        A: Float,
        usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
    {
        scan(x, &[Datum::Number(self.crit)], self.drop_missing)
    }

    /// Flags the outliers of `x`, where `NaN` is the missing value
    pub fn detect_slice<A>(&self, x: &[A]) -> Result<Outliers<A>>
    where
        A: Float,
        usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
    {
        let x = x
            .iter()
            .map(|&x| if x.is_nan() { None } else { Some(x) })
            .collect::<Vec<_>>();

        self.detect(&x)
    }

    /// Flags the outliers of loosely typed observations
    ///
    /// # Errors
    ///
    /// Fails with `InvalidInputKind` if any observation is neither a number nor missing, and
    /// with `AllMissing` when none of them is a number.
    pub fn detect_values(&self, x: &[Datum]) -> Result<Outliers<f64>> {
        detect(x, &[Datum::Number(self.crit)], self.drop_missing)
    }
}

/// Flags the observations of `x` whose robust z-score is greater than `crit`
///
/// This is the fully dynamic entry point: both the observations and the criterion may hold
/// anything a loosely typed caller can send. The checks run in this order, the first three being
/// fatal:
///
/// 1. `x` must only hold numbers and missing values (`InvalidInputKind`)
/// 2. `x` must hold at least one number (`AllMissing`)
/// 3. `crit` must be non-empty and only hold numbers and missing values
///    (`InvalidCriterionKind`)
/// 4. extra `crit` values are ignored (`MultipleCriterionValues`)
/// 5. a missing `crit` flags nothing (`CriterionIsMissing`)
/// 6. a negative `crit` is replaced by its absolute value (`NegativeCriterionCorrected`)
///
/// ```
/// use robust_outliers::{detect, Datum, Warning};
///
/// let x: Vec<Datum> = serde_json::from_str("[1, 2, 3, 4, 100]").unwrap();
/// let outliers = detect(&x, &[Datum::from(-4.)], false).unwrap();
///
/// assert_eq!(outliers.index(), &[4]);
/// assert_eq!(outliers.warnings(), &[Warning::NegativeCriterionCorrected]);
/// ```
pub fn detect(x: &[Datum], crit: &[Datum], drop_missing: bool) -> Result<Outliers<f64>> {
    if !x.iter().all(Datum::is_numeric_or_missing) {
        return Err(Error::InvalidInputKind);
    }

    let x = x.iter().map(Datum::as_number).collect::<Vec<_>>();

    scan(&x, crit, drop_missing)
}

fn scan<A>(x: &[Option<A>], crit: &[Datum], drop_missing: bool) -> Result<Outliers<A>>
where
    A: Float,
    usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
{
    let (positions, present): (Vec<usize>, Vec<A>) = x
        .iter()
        .enumerate()
        .filter_map(|(i, x)| match *x {
            Some(x) if !x.is_nan() => Some((i, x)),
            _ => None,
        })
        .unzip();

    let sample = match Sample::try_new(&present) {
        Some(sample) => sample,
        None => return Err(Error::AllMissing),
    };

    let mut warnings = Warnings::default();
    let crit = crit::resolve(crit, &mut warnings)?.map(A::from_f64);

    let mut outliers = Outliers {
        value: vec![],
        index: vec![],
        center: None,
        scale: None,
        warnings: vec![],
    };

    // A missing observation that is kept makes both the median and the MAD missing
    if present.len() == x.len() || drop_missing {
        match crit {
            Some(crit) => {
                let labeled = mad::classify(sample, crit);

                for (&i, (x, label)) in positions.iter().zip(&labeled) {
                    if label.is_outlier() {
                        outliers.index.push(i);
                        outliers.value.push(x);
                    }
                }

                outliers.center = Some(labeled.center());
                outliers.scale = Some(labeled.scale());
            }
            None => {
                let center = sample.median();

                outliers.center = Some(center);
                outliers.scale = Some(sample.median_abs_dev(Some(center)));
            }
        }
    }

    tracing::debug!(
        observations = x.len(),
        missing = x.len() - present.len(),
        center = ?outliers.center,
        scale = ?outliers.scale,
        flagged = outliers.index.len(),
        "Finished robust z-score scan"
    );

    outliers.warnings = warnings.into_vec();

    Ok(outliers)
}

/// The flagged observations, in input order
///
/// Invariants:
///
/// - `value().len() == index().len()`
/// - `index()` is strictly increasing and only holds valid positions of the input
/// - `value()[i]` is the input observation at position `index()[i]`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outliers<A> {
    value: Vec<A>,
    index: Vec<usize>,
    center: Option<A>,
    scale: Option<A>,
    warnings: Vec<Warning>,
}

impl<A> Outliers<A>
where
    A: Copy,
{
    /// Returns the flagged observations
    pub fn value(&self) -> &[A] {
        &self.value
    }

    /// Returns the 0-based positions of the flagged observations
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Returns the median the z-scores were computed against
    ///
    /// `None` when missing values were kept and at least one was present.
    pub fn center(&self) -> Option<A> {
        self.center
    }

    /// Returns the scaled MAD the z-scores were computed with
    pub fn scale(&self) -> Option<A> {
        self.scale
    }

    /// Returns the recoverable conditions raised while detecting, in the order they occurred
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Returns the number of flagged observations
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Checks if no observation was flagged
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns an iterator over `(position, observation)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, A)> + '_ {
        self.index.iter().cloned().zip(self.value.iter().cloned())
    }
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use crate::Detector;

            quickcheck! {
                fn index_is_valid_and_increasing(size: u8, start: u8, gap: u8, crit: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    let gap = gap as usize;
                    let crit = f64::from(crit) / 32.;
                    if let Some(v) = crate::stats::test::vec_with_missing::<$ty>(size, start, gap) {
                        let x = &v[start..];
                        if x.iter().all(Option::is_none) {
                            return TestResult::discard();
                        }

                        let outliers = Detector::new()
                            .criterion(crit)
                            .drop_missing(true)
                            .detect(x)
                            .unwrap();

                        TestResult::from_bool(
                            outliers.value().len() == outliers.index().len() &&
                            outliers.index().windows(2).all(|w| w[0] < w[1]) &&
                            outliers.iter().all(|(i, v)| x.get(i) == Some(&Some(v)))
                        )
                    } else {
                        TestResult::discard()
                    }
                }
            }

            quickcheck! {
                fn idempotent(size: u8, start: u8, crit: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    let crit = f64::from(crit) / 32.;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let detector = Detector::new().criterion(crit);

                        TestResult::from_bool(
                            detector.detect_slice(&v[start..]).unwrap() ==
                            detector.detect_slice(&v[start..]).unwrap()
                        )
                    } else {
                        TestResult::discard()
                    }
                }
            }

            quickcheck! {
                fn sign_of_crit_is_irrelevant(size: u8, start: u8, crit: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    let crit = f64::from(crit) / 32.;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let x = &v[start..];
                        let positive = Detector::new().criterion(crit).detect_slice(x).unwrap();
                        let negative = Detector::new().criterion(-crit).detect_slice(x).unwrap();

                        TestResult::from_bool(
                            positive.index() == negative.index() &&
                            positive.value() == negative.value()
                        )
                    } else {
                        TestResult::discard()
                    }
                }
            }

            quickcheck! {
                fn lower_crit_flags_a_superset(size: u8, start: u8, crit: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    let crit = f64::from(crit) / 32.;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let x = &v[start..];
                        let strict = Detector::new().criterion(crit + 1.).detect_slice(x).unwrap();
                        let loose = Detector::new().criterion(crit).detect_slice(x).unwrap();

                        TestResult::from_bool(
                            strict.index().iter().all(|i| loose.index().contains(i))
                        )
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

    use super::detect;
    use crate::{Datum, Detector, Error, Warning};

    fn data(x: &[f64]) -> Vec<Datum> {
        x.iter().cloned().map(Datum::from).collect()
    }

    #[test]
    fn flags_far_points() {
        let outliers = Detector::new()
            .detect_slice(&[1_f64, 2., 3., 4., 100.])
            .unwrap();

        assert_eq!(outliers.index(), &[4]);
        assert_eq!(outliers.value(), &[100.]);
        assert_relative_eq!(outliers.center().unwrap(), 3.);
        assert_relative_eq!(outliers.scale().unwrap(), 1.4826);
        assert!(outliers.warnings().is_empty());
    }

    #[test]
    fn zero_crit() {
        let outliers = Detector::new()
            .criterion(0.)
            .detect_slice(&[1_f64, 2., 3., 4., 100.])
            .unwrap();

        assert_eq!(outliers.index(), &[0, 1, 3, 4]);
    }

    #[test]
    fn zero_scale() {
        let outliers = Detector::new()
            .criterion(0.)
            .detect_slice(&[5_f64, 5., 5., 5., 9.])
            .unwrap();

        assert!(outliers.is_empty());
        assert_eq!(outliers.scale(), Some(0.));
    }

    #[test]
    fn kept_missing_values_flag_nothing() {
        let x = [Some(1_f64), Some(2.), None, Some(3.), Some(100.)];
        let outliers = Detector::new().detect(&x).unwrap();

        assert!(outliers.is_empty());
        assert_eq!(outliers.center(), None);
        assert_eq!(outliers.scale(), None);
    }

    #[test]
    fn dropped_missing_values() {
        // Median of [1, 2, 3, 100] is 2.5, |x - 2.5| = [1.5, 0.5, 0.5, 97.5], whose median is 1
        let x = [Some(1_f64), Some(2.), None, Some(3.), Some(100.)];
        let outliers = Detector::new().drop_missing(true).detect(&x).unwrap();

        assert_eq!(outliers.index(), &[4]);
        assert_eq!(outliers.value(), &[100.]);
        assert_relative_eq!(outliers.center().unwrap(), 2.5);
        assert_relative_eq!(outliers.scale().unwrap(), 1.4826);
    }

    #[test]
    fn nan_is_missing() {
        let outliers = Detector::new()
            .drop_missing(true)
            .detect_slice(&[1_f64, std::f64::NAN, 2., 3., 4., 100.])
            .unwrap();

        assert_eq!(outliers.index(), &[5]);
    }

    #[test]
    fn missing_crit_flags_nothing() {
        let outliers = Detector::new()
            .criterion(std::f64::NAN)
            .detect_slice(&[1_f64, 2., 3., 4., 100.])
            .unwrap();

        assert!(outliers.is_empty());
        assert_eq!(outliers.warnings(), &[Warning::CriterionIsMissing]);
        assert_relative_eq!(outliers.center().unwrap(), 3.);
    }

    #[test]
    fn all_missing() {
        let err = Detector::new()
            .detect::<f64>(&[None, None, None])
            .unwrap_err();
        assert!(matches!(err, Error::AllMissing));

        let err = Detector::new().detect::<f32>(&[]).unwrap_err();
        assert!(matches!(err, Error::AllMissing));
    }

    #[test]
    fn input_kind_is_checked_first() {
        let x = vec![Datum::from("a"), Datum::from("b"), Datum::from("c")];
        let err = detect(&x, &[Datum::from("4")], false).unwrap_err();

        assert!(matches!(err, Error::InvalidInputKind));
    }

    #[test]
    fn all_missing_is_checked_before_crit() {
        let x = vec![Datum::Missing, Datum::from(std::f64::NAN)];
        let err = detect(&x, &[Datum::from("4")], false).unwrap_err();

        assert!(matches!(err, Error::AllMissing));
    }

    #[test]
    fn invalid_crit() {
        let err = detect(&data(&[1., 2., 3.]), &[Datum::from(true)], false).unwrap_err();

        assert!(matches!(err, Error::InvalidCriterionKind));
    }

    #[test]
    fn multiple_crit_values() {
        let x = data(&[1., 2., 3., 4., 100., 9.]);
        let first = detect(&x, &[Datum::from(4.)], false).unwrap();
        let both = detect(&x, &[Datum::from(4.), Datum::from(2.)], false).unwrap();

        assert_eq!(first.index(), both.index());
        assert_eq!(first.value(), both.value());
        assert_eq!(both.warnings(), &[Warning::MultipleCriterionValues]);
    }

    #[test]
    fn detect_values_uses_the_detector_settings() {
        let x = vec![
            Datum::from(1.),
            Datum::Missing,
            Datum::from(2.),
            Datum::from(3.),
            Datum::from(4.),
            Datum::from(100.),
        ];
        let outliers = Detector::new()
            .criterion(-4.)
            .drop_missing(true)
            .detect_values(&x)
            .unwrap();

        assert_eq!(outliers.index(), &[5]);
        assert_eq!(outliers.warnings(), &[Warning::NegativeCriterionCorrected]);
    }

    #[test]
    fn serializes_to_json() {
        let outliers = Detector::new()
            .criterion(-4.)
            .detect_slice(&[1_f64, 2., 3., 4., 100.])
            .unwrap();
        let json = serde_json::to_value(&outliers).unwrap();

        assert_eq!(json["index"], serde_json::json!([4]));
        assert_eq!(json["value"], serde_json::json!([100.0]));
        assert_eq!(
            json["warnings"],
            serde_json::json!(["negative_criterion_corrected"])
        );
    }
}
