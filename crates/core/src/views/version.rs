//! API versions and the table of fields introduced per version.

use std::fmt;
use std::str::FromStr;

/// A `major.minor` API version. Orders numerically, so `2.0 > 1.10 > 1.2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    major: u16,
    minor: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    /// Parses `"X.Y"` or a bare `"X"` (minor 0).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        let major = major
            .parse::<u16>()
            .map_err(|_| format!("invalid API version: {s}"))?;
        let minor = minor
            .parse::<u16>()
            .map_err(|_| format!("invalid API version: {s}"))?;
        Ok(Self::new(major, minor))
    }
}

/// Entity types whose fields are versioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
}

/// Fields added after `1.0`, with the version that introduced them.
/// Fields not listed here exist in every version.
const FIELD_VERSIONS: &[(EntityKind, &str, ApiVersion)] =
    &[(EntityKind::Book, "comment", ApiVersion::new(2, 0))];

/// Returns the version a field was introduced in, if it is versioned.
pub fn field_since(entity: EntityKind, field: &str) -> Option<ApiVersion> {
    FIELD_VERSIONS
        .iter()
        .find(|(kind, name, _)| *kind == entity && *name == field)
        .map(|(_, _, since)| *since)
}

/// Returns true if the field belongs in a response for `version`.
///
/// `None` means the request is unversioned and every field is included.
pub fn includes_field(entity: EntityKind, field: &str, version: Option<ApiVersion>) -> bool {
    match (version, field_since(entity, field)) {
        (None, _) | (_, None) => true,
        (Some(requested), Some(since)) => requested >= since,
    }
}

/// Extracts the `version` parameter from an `Accept` header value.
///
/// ```
/// use bookshelf_core::views::{version_from_accept, ApiVersion};
///
/// assert_eq!(
///     version_from_accept("application/json; version=2.0"),
///     Some(ApiVersion::new(2, 0))
/// );
/// assert_eq!(version_from_accept("application/json"), None);
/// ```
pub fn version_from_accept(accept: &str) -> Option<ApiVersion> {
    accept
        .split(',')
        .flat_map(|media_range| media_range.split(';').skip(1))
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("version"))
        .and_then(|(_, value)| value.trim().trim_matches('"').parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versions() {
        assert_eq!("1.0".parse::<ApiVersion>(), Ok(ApiVersion::new(1, 0)));
        assert_eq!("2".parse::<ApiVersion>(), Ok(ApiVersion::new(2, 0)));
        assert_eq!(" 1.5 ".parse::<ApiVersion>(), Ok(ApiVersion::new(1, 5)));
        assert!("two".parse::<ApiVersion>().is_err());
        assert!("1.x".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(ApiVersion::new(1, 10) > ApiVersion::new(1, 2));
        assert!(ApiVersion::new(2, 0) > ApiVersion::new(1, 10));
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiVersion::new(2, 1).to_string(), "2.1");
    }

    #[test]
    fn test_comment_introduced_in_2_0() {
        assert_eq!(
            field_since(EntityKind::Book, "comment"),
            Some(ApiVersion::new(2, 0))
        );
        assert_eq!(field_since(EntityKind::Book, "title"), None);
    }

    #[test]
    fn test_includes_field() {
        let v1 = Some(ApiVersion::new(1, 0));
        let v2 = Some(ApiVersion::new(2, 0));

        assert!(!includes_field(EntityKind::Book, "comment", v1));
        assert!(includes_field(EntityKind::Book, "comment", v2));
        assert!(includes_field(EntityKind::Book, "comment", None));
        assert!(includes_field(EntityKind::Book, "title", v1));
    }

    #[test]
    fn test_version_from_accept() {
        assert_eq!(
            version_from_accept("application/json;version=1.0"),
            Some(ApiVersion::new(1, 0))
        );
        assert_eq!(
            version_from_accept("text/html, application/json; charset=utf-8; version=\"2.0\""),
            Some(ApiVersion::new(2, 0))
        );
        assert_eq!(version_from_accept("application/json; version=abc"), None);
        assert_eq!(version_from_accept("*/*"), None);
    }
}
