//! Android screen density buckets and their scale factors.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::utils::DensityError;

/// A named density bucket.
///
/// Variants are declared in range-expansion order; `Tvdpi` sits between
/// `Hdpi` and `Xhdpi` even though its scale is lower than `Hdpi`'s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Ldpi,
    Mdpi,
    Hdpi,
    Tvdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    /// Every bucket in ordinal order.
    pub const ALL: [Density; 7] = [
        Density::Ldpi,
        Density::Mdpi,
        Density::Hdpi,
        Density::Tvdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    /// The baseline bucket; its scale is exactly 1.
    pub const BASELINE: Density = Density::Mdpi;

    /// Scale factor relative to mdpi.
    pub fn scale(self) -> f64 {
        match self {
            Self::Ldpi => 0.75,
            Self::Mdpi => 1.0,
            Self::Hdpi => 1.5,
            Self::Tvdpi => 213.0 / 160.0,
            Self::Xhdpi => 2.0,
            Self::Xxhdpi => 3.0,
            Self::Xxxhdpi => 4.0,
        }
    }

    /// Android resource qualifier, e.g. `xhdpi`.
    pub fn qualifier(self) -> &'static str {
        match self {
            Self::Ldpi => "ldpi",
            Self::Mdpi => "mdpi",
            Self::Hdpi => "hdpi",
            Self::Tvdpi => "tvdpi",
            Self::Xhdpi => "xhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Descriptive alias accepted wherever a qualifier is.
    ///
    /// The spelled-out form (`extra-high`) parses too, but only outside range
    /// expressions, where `-` separates the endpoints.
    pub fn alias(self) -> &'static str {
        match self {
            Self::Ldpi => "low",
            Self::Mdpi => "medium",
            Self::Hdpi => "high",
            Self::Tvdpi => "tv",
            Self::Xhdpi => "extrahigh",
            Self::Xxhdpi => "extraextrahigh",
            Self::Xxxhdpi => "extraextraextrahigh",
        }
    }

    /// Hyphenated spelling of [`Density::alias`].
    fn spelled_alias(self) -> &'static str {
        match self {
            Self::Xhdpi => "extra-high",
            Self::Xxhdpi => "extra-extra-high",
            Self::Xxxhdpi => "extra-extra-extra-high",
            other => other.alias(),
        }
    }

    /// Position in [`Density::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Whether range expansion skips this bucket when it falls strictly inside a range.
    pub fn is_range_interior_excluded(self) -> bool {
        self == Self::Tvdpi
    }

    /// Name of the resource directory outputs for this bucket go into.
    pub fn directory_name(self) -> String {
        format!("drawable-{}", self.qualifier())
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualifier())
    }
}

impl FromStr for Density {
    type Err = DensityError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lowered = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.qualifier() == lowered || d.alias() == lowered || d.spelled_alias() == lowered)
            .ok_or_else(|| DensityError::UnknownName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_match_android_buckets() {
        assert_eq!(Density::Ldpi.scale(), 0.75);
        assert_eq!(Density::Mdpi.scale(), 1.0);
        assert_eq!(Density::Hdpi.scale(), 1.5);
        assert_eq!(Density::Tvdpi.scale(), 1.33125);
        assert_eq!(Density::Xhdpi.scale(), 2.0);
        assert_eq!(Density::Xxhdpi.scale(), 3.0);
        assert_eq!(Density::Xxxhdpi.scale(), 4.0);
    }

    #[test]
    fn scale_increases_with_ordinal_except_tvdpi() {
        let ordered: Vec<_> = Density::ALL
            .into_iter()
            .filter(|d| !d.is_range_interior_excluded())
            .collect();
        for pair in ordered.windows(2) {
            assert!(pair[0].scale() < pair[1].scale(), "{} !< {}", pair[0], pair[1]);
        }
        assert!(Density::Tvdpi.scale() < Density::Hdpi.scale());
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        for (i, density) in Density::ALL.into_iter().enumerate() {
            assert_eq!(density.ordinal(), i);
        }
        assert!(Density::Hdpi < Density::Tvdpi && Density::Tvdpi < Density::Xhdpi);
    }

    #[test]
    fn parses_qualifiers_and_aliases_case_insensitively() {
        assert_eq!("mdpi".parse::<Density>(), Ok(Density::Mdpi));
        assert_eq!("XXHDPI".parse::<Density>(), Ok(Density::Xxhdpi));
        assert_eq!("Medium".parse::<Density>(), Ok(Density::Mdpi));
        assert_eq!("extrahigh".parse::<Density>(), Ok(Density::Xhdpi));
        assert_eq!("tv".parse::<Density>(), Ok(Density::Tvdpi));
    }

    #[test]
    fn parses_hyphenated_aliases() {
        assert_eq!("extra-high".parse::<Density>(), Ok(Density::Xhdpi));
        assert_eq!("Extra-Extra-High".parse::<Density>(), Ok(Density::Xxhdpi));
        assert_eq!("extra-extra-extra-high".parse::<Density>(), Ok(Density::Xxxhdpi));
        assert!("extra-low".parse::<Density>().is_err());
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "bogus".parse::<Density>(),
            Err(DensityError::UnknownName("bogus".to_string()))
        );
        assert!("".parse::<Density>().is_err());
    }

    #[test]
    fn directory_uses_qualifier() {
        assert_eq!(Density::Xxxhdpi.directory_name(), "drawable-xxxhdpi");
        assert_eq!(Density::Mdpi.to_string(), "mdpi");
    }
}
