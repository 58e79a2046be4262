//! Format version handling

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Dotted `major.minor` format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatVersion {
    /// Incompatible layout changes
    pub major: u32,
    /// Backwards compatible additions
    pub minor: u32,
}

impl FormatVersion {
    /// Version written by this crate
    pub const CURRENT: Self = Self { major: 1, minor: 0 };

    /// Whether documents of this version can be read
    ///
    /// Any minor revision of the current major is accepted.
    pub const fn is_supported(self) -> bool {
        self.major == Self::CURRENT.major
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

/// Version string is not `major` or `major.minor`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("version must be numeric major.minor")]
pub struct MalformedVersion;

impl FromStr for FormatVersion {
    type Err = MalformedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(MalformedVersion);
            }
            part.parse::<u32>().map_err(|_| MalformedVersion)
        };

        match s.split_once('.') {
            Some((major, minor)) => Ok(Self {
                major: number(major)?,
                minor: number(minor)?,
            }),
            None => Ok(Self {
                major: number(s)?,
                minor: 0,
            }),
        }
    }
}

impl TryFrom<String> for FormatVersion {
    type Error = MalformedVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatVersion> for String {
    fn from(value: FormatVersion) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl serde::Serialize for FormatVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for FormatVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versions() {
        assert_eq!("1.0".parse(), Ok(FormatVersion::CURRENT));
        assert_eq!("1.7".parse(), Ok(FormatVersion { major: 1, minor: 7 }));
        assert_eq!("2".parse(), Ok(FormatVersion { major: 2, minor: 0 }));
    }

    #[test]
    fn test_malformed_versions() {
        for bad in ["", "1.", ".1", "1.0.0", "v1", "1.x", "-1.0", "+1.0"] {
            assert_eq!(bad.parse::<FormatVersion>(), Err(MalformedVersion), "{bad:?}");
        }
    }

    #[test]
    fn test_malformed_version_is_an_error() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            "1.x".parse::<FormatVersion>().unwrap_err().into();
        assert_eq!(err.to_string(), "version must be numeric major.minor");
    }

    #[test]
    fn test_supported_majors() {
        assert!(FormatVersion { major: 1, minor: 9 }.is_supported());
        assert!(!FormatVersion { major: 2, minor: 0 }.is_supported());
        assert!(!FormatVersion { major: 0, minor: 9 }.is_supported());
    }

    #[test]
    fn test_display() {
        assert_eq!(FormatVersion::CURRENT.to_string(), "1.0");
        assert_eq!(String::from(FormatVersion { major: 1, minor: 12 }), "1.12");
    }
}
