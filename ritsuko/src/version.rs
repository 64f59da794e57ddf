use std::fmt::{Display, Formatter};

use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};

/// A `major.minor.patch` format version, ordered by major, then minor, then patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
}

impl Version {
    /// Create a new version.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Check if `self` is older than `major.minor.patch`.
    pub fn lt(&self, major: u32, minor: u32, patch: u32) -> bool {
        *self < Version::new(major, minor, patch)
    }

    /// Check if `self` is `major.minor.patch` or newer.
    pub fn ge(&self, major: u32, minor: u32, patch: u32) -> bool {
        !self.lt(major, minor, patch)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse a `major.minor.patch` version string.
///
/// Each component is a non-empty run of decimal digits without leading zeros. With `skip_patch`,
/// the patch component is optional and ignored when present.
pub fn parse_version_string(text: &str, skip_patch: bool) -> ChihayaResult<Version> {
    if text.is_empty() {
        chihaya_bail!("version string is empty");
    }

    let components = text
        .split('.')
        .map(|c| parse_component(text, c))
        .collect::<ChihayaResult<Vec<_>>>()?;

    match (components.as_slice(), skip_patch) {
        ([major, minor], true) | ([major, minor, _], true) => Ok(Version::new(*major, *minor, 0)),
        ([major, minor, patch], false) => Ok(Version::new(*major, *minor, *patch)),
        _ if skip_patch => chihaya_bail!(
            "version string '{}' should be formatted as 'major.minor[.patch]'",
            text
        ),
        _ => chihaya_bail!(
            "version string '{}' should be formatted as 'major.minor.patch'",
            text
        ),
    }
}

fn parse_component(text: &str, component: &str) -> ChihayaResult<u32> {
    if component.is_empty() {
        chihaya_bail!("version string '{}' contains an empty component", text);
    }
    if !component.bytes().all(|b| b.is_ascii_digit()) {
        chihaya_bail!("version string '{}' contains a non-digit character", text);
    }
    if component.len() > 1 && component.starts_with('0') {
        chihaya_bail!("version string '{}' contains a component with leading zeros", text);
    }
    component
        .parse::<u32>()
        .map_err(|_| chihaya_err!("version string '{}' contains an oversized component", text))
}
