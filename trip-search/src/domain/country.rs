//! Country codes and the static country table.
//!
//! The table is deliberately small: it covers the countries the supported
//! providers actually serve. Each entry carries an approximate bounding box
//! for providers that can only filter cities geographically.

use std::fmt;

use super::geo::BoundingBox;

/// Error returned when parsing an invalid country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid country code: {reason}")]
pub struct InvalidCountryCode {
    reason: &'static str,
}

/// A valid 2-letter ISO 3166-1 alpha-2 country code.
///
/// # Examples
///
/// ```
/// use trip_search::domain::CountryCode;
///
/// let de = CountryCode::parse("DE").unwrap();
/// assert_eq!(de.as_str(), "DE");
///
/// // Lowercase is rejected
/// assert!(CountryCode::parse("de").is_err());
///
/// // Wrong length is rejected
/// assert!(CountryCode::parse("DEU").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a country code. The input must be exactly 2 uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidCountryCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidCountryCode {
                reason: "must be exactly 2 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCountryCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(CountryCode([bytes[0], bytes[1]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or("??")
    }

    /// Case-insensitive comparison against a provider-supplied code.
    pub fn matches(&self, other: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(other.trim())
    }

    /// Display name from the country table, if known.
    pub fn display_name(&self) -> Option<&'static str> {
        country_info(*self).map(|c| c.name)
    }

    /// Approximate bounding box from the country table, if known.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        country_info(*self).map(|c| c.bbox)
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct CountryInfo {
    code: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    bbox: BoundingBox,
}

const COUNTRIES: &[CountryInfo] = &[
    CountryInfo {
        code: "DE",
        name: "Germany",
        aliases: &["germany", "deutschland"],
        bbox: BoundingBox::from_edges(55.1, 5.8, 47.2, 15.1),
    },
    CountryInfo {
        code: "CZ",
        name: "Czech Republic",
        aliases: &["czech", "czech republic", "czechia"],
        bbox: BoundingBox::from_edges(51.1, 12.0, 48.5, 18.9),
    },
    CountryInfo {
        code: "AT",
        name: "Austria",
        aliases: &["austria"],
        bbox: BoundingBox::from_edges(49.1, 9.5, 46.3, 17.2),
    },
    CountryInfo {
        code: "FR",
        name: "France",
        aliases: &["france"],
        bbox: BoundingBox::from_edges(51.2, -5.2, 41.3, 9.6),
    },
    CountryInfo {
        code: "PL",
        name: "Poland",
        aliases: &["poland"],
        bbox: BoundingBox::from_edges(54.9, 14.1, 49.0, 24.2),
    },
    CountryInfo {
        code: "SK",
        name: "Slovakia",
        aliases: &["slovakia"],
        bbox: BoundingBox::from_edges(49.7, 16.8, 47.7, 22.6),
    },
    CountryInfo {
        code: "HU",
        name: "Hungary",
        aliases: &["hungary"],
        bbox: BoundingBox::from_edges(48.6, 16.1, 45.7, 22.9),
    },
    CountryInfo {
        code: "IT",
        name: "Italy",
        aliases: &["italy"],
        bbox: BoundingBox::from_edges(47.1, 6.6, 36.6, 18.6),
    },
    CountryInfo {
        code: "NL",
        name: "Netherlands",
        aliases: &["netherlands"],
        bbox: BoundingBox::from_edges(53.6, 3.3, 50.7, 7.3),
    },
    CountryInfo {
        code: "HR",
        name: "Croatia",
        aliases: &["croatia"],
        bbox: BoundingBox::from_edges(46.6, 13.4, 42.4, 19.5),
    },
];

fn country_info(code: CountryCode) -> Option<&'static CountryInfo> {
    COUNTRIES.iter().find(|c| c.code == code.as_str())
}

/// Look up a country code by (case-insensitive) country name.
///
/// Returns `None` for anything that isn't a known country name, which callers
/// treat as a free-text place name.
pub fn country_code_by_name(name: &str) -> Option<CountryCode> {
    let needle = name.trim().to_lowercase();
    COUNTRIES
        .iter()
        .find(|c| c.aliases.contains(&needle.as_str()))
        .and_then(|c| CountryCode::parse(c.code).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_case_insensitive() {
        assert_eq!(
            country_code_by_name("Germany"),
            Some(CountryCode::parse("DE").unwrap())
        );
        assert_eq!(
            country_code_by_name("  DEUTSCHLAND "),
            Some(CountryCode::parse("DE").unwrap())
        );
        assert_eq!(
            country_code_by_name("czechia"),
            Some(CountryCode::parse("CZ").unwrap())
        );
    }

    #[test]
    fn cities_are_not_countries() {
        assert_eq!(country_code_by_name("Berlin"), None);
        assert_eq!(country_code_by_name("Prague"), None);
        assert_eq!(country_code_by_name(""), None);
    }

    #[test]
    fn every_table_entry_is_well_formed() {
        for info in COUNTRIES {
            let code = CountryCode::parse(info.code).unwrap();
            assert_eq!(code.display_name(), Some(info.name));
            let bbox = code.bounding_box().unwrap();
            assert!(bbox.top_left.latitude > bbox.bottom_right.latitude);
            assert!(bbox.top_left.longitude < bbox.bottom_right.longitude);
            for alias in info.aliases {
                assert_eq!(country_code_by_name(alias), Some(code));
            }
        }
    }

    #[test]
    fn unknown_code_has_no_info() {
        let code = CountryCode::parse("ZZ").unwrap();
        assert_eq!(code.display_name(), None);
        assert_eq!(code.bounding_box(), None);
    }

    #[test]
    fn matches_ignores_case() {
        let de = CountryCode::parse("DE").unwrap();
        assert!(de.matches("de"));
        assert!(de.matches("DE"));
        assert!(!de.matches("AT"));
    }

    #[test]
    fn reject_invalid_codes() {
        assert!(CountryCode::parse("").is_err());
        assert!(CountryCode::parse("D").is_err());
        assert!(CountryCode::parse("D1").is_err());
        assert!(CountryCode::parse("de").is_err());
    }
}
