//! Fixed key sets: sales regions and the platforms compared against review scores.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::columns;

/// A key outside one of the fixed key sets.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unsupported {kind} '{key}' (expected one of: {expected})")]
pub struct UnsupportedKeyError {
    pub kind: &'static str,
    pub key: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Japan,
    NorthAmerica,
    Europe,
}

impl Region {
    /// Regions in ranking order.
    pub const ALL: [Self; 3] = [Self::Japan, Self::NorthAmerica, Self::Europe];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Japan => "jp",
            Self::NorthAmerica => "na",
            Self::Europe => "eu",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Japan => "Japan",
            Self::NorthAmerica => "North America",
            Self::Europe => "Europe",
        }
    }

    #[must_use]
    pub const fn sales_column(self) -> &'static str {
        match self {
            Self::Japan => columns::JP_SALES,
            Self::NorthAmerica => columns::NA_SALES,
            Self::Europe => columns::EU_SALES,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Region {
    type Err = UnsupportedKeyError;

    /// Accepts `jp`/`na`/`eu` or the region title, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|region| {
                key.eq_ignore_ascii_case(region.key())
                    || key.eq_ignore_ascii_case(region.title())
                    || key.eq_ignore_ascii_case(&region.title().replace(' ', "-"))
            })
            .ok_or_else(|| UnsupportedKeyError {
                kind: "region",
                key: s.to_owned(),
                expected: "jp, na, eu",
            })
    }
}

/// Platforms whose review scores are compared with their sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScorePlatform {
    #[serde(rename = "XOne")]
    XOne,
    #[serde(rename = "PS4")]
    Ps4,
    #[serde(rename = "PC")]
    Pc,
}

impl ScorePlatform {
    pub const ALL: [Self; 3] = [Self::XOne, Self::Ps4, Self::Pc];

    /// Platform code as it appears in the `platform` column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::XOne => "XOne",
            Self::Ps4 => "PS4",
            Self::Pc => "PC",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::XOne => "Xbox One",
            Self::Ps4 => "PS4",
            Self::Pc => "PC",
        }
    }
}

impl fmt::Display for ScorePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ScorePlatform {
    type Err = UnsupportedKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|platform| {
                key.eq_ignore_ascii_case(platform.code())
                    || key.eq_ignore_ascii_case(platform.display_name())
            })
            .ok_or_else(|| UnsupportedKeyError {
                kind: "platform",
                key: s.to_owned(),
                expected: "XOne, PS4, PC",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_keys() {
        assert_eq!("jp".parse::<Region>().unwrap(), Region::Japan);
        assert_eq!("NA".parse::<Region>().unwrap(), Region::NorthAmerica);
        assert_eq!("north america".parse::<Region>().unwrap(), Region::NorthAmerica);
        assert_eq!("north-america".parse::<Region>().unwrap(), Region::NorthAmerica);
        assert_eq!("Europe".parse::<Region>().unwrap(), Region::Europe);
        assert_eq!(Region::Europe.sales_column(), "eu_sales");
    }

    #[test]
    fn test_unsupported_region() {
        let err = "other".parse::<Region>().unwrap_err();
        assert_eq!(err.kind, "region");
        assert_eq!(err.key, "other");
        assert_eq!(
            err.to_string(),
            "unsupported region 'other' (expected one of: jp, na, eu)"
        );
    }

    #[test]
    fn test_score_platform_keys() {
        assert_eq!("XOne".parse::<ScorePlatform>().unwrap(), ScorePlatform::XOne);
        assert_eq!("xbox one".parse::<ScorePlatform>().unwrap(), ScorePlatform::XOne);
        assert_eq!("ps4".parse::<ScorePlatform>().unwrap(), ScorePlatform::Ps4);
        assert_eq!("PC".parse::<ScorePlatform>().unwrap(), ScorePlatform::Pc);
        assert!("Wii".parse::<ScorePlatform>().is_err());
        assert_eq!(ScorePlatform::XOne.to_string(), "XOne");
    }
}
