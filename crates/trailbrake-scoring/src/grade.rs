//! Letter grades.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade derived from mean deviation relative to a tolerance.
///
/// Breakpoints, as fractions of the tolerance:
///
/// | Grade | Mean deviation      |
/// |-------|---------------------|
/// | A+    | below 0.3           |
/// | A     | up to 0.5           |
/// | B     | up to 0.7           |
/// | C     | up to 1.0           |
/// | D     | up to 1.4           |
/// | F     | above 1.4           |
///
/// `N/A` is reserved for a session with no samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    /// Well inside tolerance.
    #[serde(rename = "A+")]
    APlus,
    /// A.
    #[serde(rename = "A")]
    A,
    /// B.
    #[serde(rename = "B")]
    B,
    /// Right at tolerance.
    #[serde(rename = "C")]
    C,
    /// D.
    #[serde(rename = "D")]
    D,
    /// Well outside tolerance.
    #[serde(rename = "F")]
    F,
    /// Nothing to grade.
    #[default]
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Grade {
    /// Grade `mean_deviation` against `tolerance`.
    ///
    /// Total over all inputs: a NaN deviation grades as [`Grade::F`].
    ///
    /// # Example
    ///
    /// ```
    /// use trailbrake_scoring::Grade;
    ///
    /// assert_eq!(Grade::from_deviation(3.0, 10.0), Grade::A);
    /// assert_eq!(Grade::from_deviation(10.0, 10.0), Grade::C);
    /// assert_eq!(Grade::from_deviation(25.0, 10.0), Grade::F);
    /// ```
    pub fn from_deviation(mean_deviation: f64, tolerance: f64) -> Self {
        if mean_deviation < 0.3 * tolerance {
            Grade::APlus
        } else if mean_deviation <= 0.5 * tolerance {
            Grade::A
        } else if mean_deviation <= 0.7 * tolerance {
            Grade::B
        } else if mean_deviation <= tolerance {
            Grade::C
        } else if mean_deviation <= 1.4 * tolerance {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// Display string, identical to the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::NotAvailable => "N/A",
        }
    }

    /// True for every grade except [`Grade::NotAvailable`].
    pub const fn is_graded(&self) -> bool {
        !matches!(self, Grade::NotAvailable)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
