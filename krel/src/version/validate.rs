//! Release build version format validation.
//!
//! Pure syntactic checks over version strings. Nothing here performs I/O and
//! nothing here fails: malformed input simply yields `false`.

use std::sync::OnceLock;

use regex::Regex;

/// Release version core: `v` plus three dot-separated integers without
/// leading zeros, an optional alphanumeric pre-release tag, and an optional
/// trailing numeric increment.
const RELEASE_PATTERN: &str =
    r"v(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(-[a-zA-Z0-9]+)*\.*(0|[1-9][0-9]*)?";

/// Build descriptor: build counter plus short lowercase-hex commit hash.
const BUILD_PATTERN: &str = r"([0-9]{1,})\+([0-9a-f]{5,40})";

/// Suffix flagging a build from a working tree with uncommitted changes.
const DIRTY_PATTERN: &str = r"(-dirty)";

/// Get the release build version pattern.
///
/// The full form is the release core, optionally followed by `.` and a build
/// descriptor, optionally followed by `-dirty`, matched against the whole
/// input.
fn release_build_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(
            "^({}(\\.{})?{}?)$",
            RELEASE_PATTERN, BUILD_PATTERN, DIRTY_PATTERN
        ))
        .unwrap()
    })
}

/// Check whether a build version is valid for release.
///
/// # Examples
///
/// ```
/// use krel::version::is_valid_release_build;
///
/// assert!(is_valid_release_build("v1.18.6"));
/// assert!(is_valid_release_build("v1.18.0-alpha.3"));
/// assert!(is_valid_release_build("v1.18.0-alpha.3.274+30e2b1b3bc0c50"));
/// assert!(is_valid_release_build("v1.18.0-alpha.3.274+30e2b1b3bc0c50-dirty"));
///
/// assert!(!is_valid_release_build("1.18.6"));
/// assert!(!is_valid_release_build("v1.18"));
/// ```
pub fn is_valid_release_build(build: &str) -> bool {
    release_build_pattern().is_match(build)
}

/// Check whether a build version identifies a dirty build.
///
/// This is a substring test, not a parse: any occurrence of `dirty` counts.
///
/// # Examples
///
/// ```
/// use krel::version::is_dirty_build;
///
/// assert!(is_dirty_build("v1.2.3-dirty"));
/// assert!(!is_dirty_build("v1.2.3"));
/// ```
pub fn is_dirty_build(build: &str) -> bool {
    build.contains("dirty")
}
