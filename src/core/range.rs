//! Density range expressions such as `mdpi-xhdpi`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Density;
use crate::utils::DensityError;

/// Densities used when no range is configured.
pub const DEFAULT_DENSITIES: [Density; 3] = [Density::Mdpi, Density::Hdpi, Density::Xhdpi];

/// An ordered list of densities expanded from a `<lower>-<upper>` expression.
///
/// The list always starts with `lower` and ends with `upper`. Buckets strictly
/// between the two are included in ordinal order, except tvdpi, which only
/// appears when named as an endpoint. If `lower` does not precede `upper` the
/// result is exactly `[lower, upper]`, so `hdpi-hdpi` yields `hdpi` twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DensityRange {
    expression: String,
    densities: Vec<Density>,
}

impl DensityRange {
    /// Parses and expands a range expression.
    pub fn resolve(expression: &str) -> Result<Self, DensityError> {
        let (lower, upper) = split_expression(expression)
            .ok_or_else(|| DensityError::MalformedRange(expression.to_string()))?;
        let lower: Density = lower.parse()?;
        let upper: Density = upper.parse()?;

        let mut densities = vec![lower];
        if lower.ordinal() < upper.ordinal() {
            densities.extend(
                Density::ALL[lower.ordinal() + 1..upper.ordinal()]
                    .iter()
                    .copied()
                    .filter(|d| !d.is_range_interior_excluded()),
            );
        }
        densities.push(upper);

        Ok(Self {
            expression: expression.to_string(),
            densities,
        })
    }

    pub fn densities(&self) -> &[Density] {
        &self.densities
    }

    pub fn lower(&self) -> Density {
        self.densities[0]
    }

    pub fn upper(&self) -> Density {
        self.densities[self.densities.len() - 1]
    }
}

/// Splits `<lower>-<upper>` where both sides are non-empty ASCII words.
fn split_expression(expression: &str) -> Option<(&str, &str)> {
    let (lower, upper) = expression.split_once('-')?;
    let is_name = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
    (is_name(lower) && is_name(upper)).then_some((lower, upper))
}

impl FromStr for DensityRange {
    type Err = DensityError;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        Self::resolve(expression)
    }
}

impl TryFrom<String> for DensityRange {
    type Error = DensityError;

    fn try_from(expression: String) -> Result<Self, Self::Error> {
        Self::resolve(&expression)
    }
}

impl From<DensityRange> for String {
    fn from(range: DensityRange) -> Self {
        range.expression
    }
}

impl fmt::Display for DensityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
