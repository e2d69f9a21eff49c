//! Version retrieval from release-channel marker files.
//!
//! The release infrastructure publishes "current version" pointers as small
//! plaintext files, one per release channel:
//!
//! - `release/stable.txt` - latest stable release
//! - `release/latest.txt` - latest pre-release
//! - `ci/latest.txt` - latest CI build on the trunk branch
//! - `ci/latest-<minor>.txt` - latest CI build on a release branch
//!
//! A marker's entire content is a single version string. CI markers usually
//! carry build-descriptor suffixes (`v1.18.0-alpha.3.274+30e2b1b3bc0c50`),
//! and normalization re-renders through a strict semver parse that rejects
//! anything informal, so it is opt-in: callers that need the exact raw
//! identifier pass `normalize = false`.

use semver::Version;
use tracing::{debug, info};

use super::error::{VersionError, VersionResult};
use super::http::{HttpClient, ReqwestClient};

/// Base URL for release-channel markers (stable and pre-release).
const RELEASE_MARKER_BASE: &str = "https://dl.k8s.io/release";

/// Base URL for CI-channel markers.
const CI_MARKER_BASE: &str = "https://dl.k8s.io/ci";

/// Branch that CI publishes to the unsuffixed `latest` marker.
const TRUNK_BRANCH: &str = "master";

/// Prefix release branches carry in front of their minor version.
const RELEASE_BRANCH_PREFIX: &str = "release-";

/// Resolves build versions from remotely hosted marker files.
///
/// Stateless apart from the HTTP client; every call performs exactly one
/// blocking GET and returns. The client is injected so tests can resolve
/// markers without a network.
///
/// # Example
///
/// ```no_run
/// use krel::version::VersionResolver;
///
/// # fn main() -> krel::version::VersionResult<()> {
/// let resolver = VersionResolver::new()?;
/// let stable = resolver.stable_release(true)?;
/// println!("current stable release: {}", stable);
/// # Ok(())
/// # }
/// ```
pub struct VersionResolver<C = ReqwestClient> {
    pub(super) client: C,
}

impl VersionResolver<ReqwestClient> {
    /// Create a resolver backed by a real HTTP client.
    pub fn new() -> VersionResult<Self> {
        Ok(Self {
            client: ReqwestClient::new()?,
        })
    }
}

impl<C: HttpClient> VersionResolver<C> {
    /// Create a resolver with a caller-supplied HTTP client.
    pub fn with_client(client: C) -> Self {
        Self { client }
    }

    /// Version of the latest stable release.
    pub fn stable_release(&self, normalize: bool) -> VersionResult<String> {
        info!("Retrieving stable release version");
        self.from_marker(&format!("{}/stable.txt", RELEASE_MARKER_BASE), normalize)
    }

    /// Version of the latest stable pre-release.
    pub fn stable_prerelease(&self, normalize: bool) -> VersionResult<String> {
        info!("Retrieving stable pre-release version");
        self.from_marker(&format!("{}/latest.txt", RELEASE_MARKER_BASE), normalize)
    }

    /// Version of the latest CI build on the trunk branch.
    pub fn latest_ci(&self, normalize: bool) -> VersionResult<String> {
        info!("Retrieving latest CI build version");
        self.from_marker(&format!("{}/latest.txt", CI_MARKER_BASE), normalize)
    }

    /// Version of the latest CI build on the given branch.
    ///
    /// The trunk branch maps to the `latest` marker; `release-<minor>`
    /// branches map to `latest-<minor>`.
    pub fn ci_for_branch(&self, branch: &str, normalize: bool) -> VersionResult<String> {
        info!(branch = %branch, "Retrieving CI build version for branch");

        let marker_file = ci_marker_file(branch);
        debug!(marker = %marker_file, "Computed version marker file");

        self.from_marker(&format!("{}/{}", CI_MARKER_BASE, marker_file), normalize)
    }

    /// Fetch a version from an arbitrary marker URL.
    ///
    /// The response body is whitespace-trimmed; empty content is a resolution
    /// failure, never a valid (empty) version. With `normalize`, a leading
    /// `v` is stripped and the result is re-rendered as canonical semver;
    /// without it the trimmed body is returned unchanged.
    pub fn from_marker(&self, marker_url: &str, normalize: bool) -> VersionResult<String> {
        info!(url = %marker_url, "Retrieving build version from marker");

        let body = self.client.get_text(marker_url)?;
        let version = body.trim();

        if version.is_empty() {
            return Err(VersionError::NotFound(format!(
                "version marker {} is empty",
                marker_url
            )));
        }

        let version = if normalize {
            normalize_version(version)?
        } else {
            version.to_string()
        };

        info!(version = %version, "Retrieved version");
        Ok(version)
    }
}

/// Marker file name for a branch's CI channel.
fn ci_marker_file(branch: &str) -> String {
    if branch == TRUNK_BRANCH {
        return "latest.txt".to_string();
    }

    let minor = branch
        .strip_prefix(RELEASE_BRANCH_PREFIX)
        .unwrap_or(branch);

    format!("latest-{}.txt", minor)
}

/// Normalize a version string into canonical semver form.
///
/// Strips one leading `v`, parses the remainder as strict semver and
/// re-renders it canonically.
///
/// # Examples
///
/// ```
/// use krel::version::normalize_version;
///
/// assert_eq!(normalize_version("v1.2.3").unwrap(), "1.2.3");
/// assert_eq!(normalize_version("1.2.3-beta.1").unwrap(), "1.2.3-beta.1");
/// assert!(normalize_version("not-a-version").is_err());
/// ```
pub fn normalize_version(version: &str) -> VersionResult<String> {
    let stripped = version.strip_prefix('v').unwrap_or(version);

    let parsed = Version::parse(stripped).map_err(|e| VersionError::Format {
        version: version.to_string(),
        source: e,
    })?;

    Ok(parsed.to_string())
}
