//! Validation of the outlier criterion
//!
//! The criterion arrives as a sequence so that every malformed shape a loosely typed caller can
//! produce is representable. Resolving it either fails, or yields at most one non-negative
//! number plus the warnings describing any correction made on the way.

use crate::error::{Error, Result};
use crate::value::Datum;
use crate::warning::{Warning, Warnings};

/// Number of robust standard deviations past which an observation is flagged by default
pub const DEFAULT_CRITERION: f64 = 4.0;

/// Resolves a criterion, checking in order:
///
/// 1. every element is numeric or missing, and there is at least one, or it fails with
///    `InvalidCriterionKind`
/// 2. extra elements are dropped (`MultipleCriterionValues`)
/// 3. a missing criterion resolves to `None` (`CriterionIsMissing`)
/// 4. a negative criterion is replaced by its absolute value (`NegativeCriterionCorrected`)
pub(crate) fn resolve(crit: &[Datum], warnings: &mut Warnings) -> Result<Option<f64>> {
    let first = match crit.first() {
        Some(first) if crit.iter().all(Datum::is_numeric_or_missing) => first,
        _ => return Err(Error::InvalidCriterionKind),
    };

    if crit.len() > 1 {
        warnings.push(Warning::MultipleCriterionValues);
    }

    let crit = match first.as_number() {
        Some(crit) => crit,
        None => {
            warnings.push(Warning::CriterionIsMissing);
            return Ok(None);
        }
    };

    if crit < 0. {
        warnings.push(Warning::NegativeCriterionCorrected);
        Ok(Some(crit.abs()))
    } else {
        Ok(Some(crit))
    }
}

#[cfg(test)]
mod test {
    use super::resolve;
    use crate::error::Error;
    use crate::value::Datum;
    use crate::warning::{Warning, Warnings};

    fn run(crit: &[Datum]) -> (Result<Option<f64>, Error>, Vec<Warning>) {
        let mut warnings = Warnings::default();
        let result = resolve(crit, &mut warnings);

        (result, warnings.into_vec())
    }

    #[test]
    fn plain() {
        let (crit, warnings) = run(&[Datum::from(3.)]);

        assert_eq!(crit.unwrap(), Some(3.));
        assert!(warnings.is_empty());
    }

    #[test]
    fn zero_is_not_negative() {
        let (crit, warnings) = run(&[Datum::from(-0.)]);

        assert_eq!(crit.unwrap(), Some(0.));
        assert!(warnings.is_empty());
    }

    #[test]
    fn negative() {
        let (crit, warnings) = run(&[Datum::from(-3.)]);

        assert_eq!(crit.unwrap(), Some(3.));
        assert_eq!(warnings, vec![Warning::NegativeCriterionCorrected]);
    }

    #[test]
    fn multiple() {
        let (crit, warnings) = run(&[Datum::from(4.), Datum::from(2.)]);

        assert_eq!(crit.unwrap(), Some(4.));
        assert_eq!(warnings, vec![Warning::MultipleCriterionValues]);
    }

    #[test]
    fn missing() {
        let (crit, warnings) = run(&[Datum::Missing]);

        assert_eq!(crit.unwrap(), None);
        assert_eq!(warnings, vec![Warning::CriterionIsMissing]);
    }

    #[test]
    fn warnings_accumulate_in_order() {
        let (crit, warnings) = run(&[Datum::from(-2.), Datum::Missing]);

        assert_eq!(crit.unwrap(), Some(2.));
        assert_eq!(
            warnings,
            vec![
                Warning::MultipleCriterionValues,
                Warning::NegativeCriterionCorrected
            ]
        );
    }

    #[test]
    fn not_numeric() {
        let (crit, warnings) = run(&[Datum::from("4")]);

        assert!(matches!(crit, Err(Error::InvalidCriterionKind)));
        assert!(warnings.is_empty());
    }

    #[test]
    fn non_numeric_tail_is_fatal() {
        let (crit, _) = run(&[Datum::from(4.), Datum::from(true)]);

        assert!(matches!(crit, Err(Error::InvalidCriterionKind)));
    }

    #[test]
    fn empty() {
        let (crit, _) = run(&[]);

        assert!(matches!(crit, Err(Error::InvalidCriterionKind)));
    }
}
