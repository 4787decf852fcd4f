//! Named detector options
//!
//! Options are passed as an explicit name to value mapping and checked against the set of names
//! the detector understands. An unknown name is an error instead of being silently forwarded.

use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::crit::DEFAULT_CRITERION;
use crate::error::Result;

/// The options understood by the `Detector`
///
/// | name           | type   | default |
/// |----------------|--------|---------|
/// | `crit`         | number | `4`     |
/// | `drop_missing` | bool   | `false` |
///
/// `na_rm` is accepted as an alias of `drop_missing`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorOptions {
    /// Number of robust standard deviations past which a point is flagged
    pub crit: f64,
    /// Exclude missing values before computing the median and the MAD
    #[serde(alias = "na_rm")]
    pub drop_missing: bool,
}

impl Default for DetectorOptions {
    fn default() -> DetectorOptions {
        DetectorOptions {
            crit: DEFAULT_CRITERION,
            drop_missing: false,
        }
    }
}

impl DetectorOptions {
    /// Reads the options from a name to value mapping
    ///
    /// # Errors
    ///
    /// Fails with `Error::Options` on unknown names and on values of the wrong type.
    pub fn from_map(map: &Map<String, Value>) -> Result<DetectorOptions> {
        Ok(serde_json::from_value(Value::Object(map.clone()))?)
    }

    /// Reads the options from a JSON object
    ///
    /// ```
    /// use robust_outliers::{Detector, DetectorOptions};
    ///
    /// let options = DetectorOptions::from_json(r#"{ "crit": 3, "na_rm": true }"#).unwrap();
    /// let detector = Detector::from(options);
    ///
    /// assert_eq!(detector, Detector::new().criterion(3.).drop_missing(true));
    /// ```
    pub fn from_json(json: &str) -> Result<DetectorOptions> {
        Ok(serde_json::from_str(json)?)
    }
}
