use serde_derive::{Deserialize, Serialize};

/// A dynamically typed observation, as found in loosely typed input such as JSON
///
/// Deserializes from a JSON `number`, `bool`, `string` or `null` (missing).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    /// A real number, `NaN` is treated as missing
    Number(f64),
    /// A logical value, which is *not* numeric
    Logical(bool),
    /// A character value
    Text(String),
    /// A missing value
    Missing,
}

impl Datum {
    /// Checks if this is a missing value, `NaN` included
    pub fn is_missing(&self) -> bool {
        match *self {
            Datum::Missing => true,
            Datum::Number(x) => x.is_nan(),
            _ => false,
        }
    }

    /// Checks if this is either a number or missing
    pub fn is_numeric_or_missing(&self) -> bool {
        matches!(*self, Datum::Number(_) | Datum::Missing)
    }

    /// Returns the number held by this datum, `None` for missing and non-numeric values
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Datum::Number(x) if !x.is_nan() => Some(x),
            _ => None,
        }
    }
}

impl From<f64> for Datum {
    fn from(x: f64) -> Datum {
        Datum::Number(x)
    }
}

impl From<Option<f64>> for Datum {
    fn from(x: Option<f64>) -> Datum {
        x.map_or(Datum::Missing, Datum::Number)
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Datum {
        Datum::Logical(b)
    }
}

impl<'a> From<&'a str> for Datum {
    fn from(s: &'a str) -> Datum {
        Datum::Text(s.to_owned())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Datum {
        Datum::Text(s)
    }
}
