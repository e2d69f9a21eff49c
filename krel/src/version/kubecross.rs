//! Cross-build container image version lookup with branch fallback.
//!
//! The cross-build image version is published as a plain `VERSION` file in
//! the upstream repository, per branch. Right after a branch cut the new
//! release branch may not carry the file yet, so resolution walks an ordered
//! list of candidate branches and settles on the first one that yields a
//! non-empty version.

use tracing::{info, warn};

use super::error::{VersionError, VersionResult};
use super::http::HttpClient;
use super::marker::VersionResolver;

/// Upstream repository hosting the cross-build image version files.
const UPSTREAM_ORG_REPO: &str = "kubernetes/kubernetes";

/// Path of the version file within a branch.
const VERSION_FILE_PATH: &str = "build/build-image/cross/VERSION";

/// Raw-content URL of the version file on a branch.
fn kubecross_version_url(branch: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/{}",
        UPSTREAM_ORG_REPO, branch, VERSION_FILE_PATH
    )
}

impl<C: HttpClient> VersionResolver<C> {
    /// Resolve the cross-build image version, trying branches in order.
    ///
    /// A fetch failure on a non-last branch is logged and skipped; a fetch
    /// failure on the last branch is propagated. When every branch answers
    /// but none carries a non-empty version, resolution fails rather than
    /// continuing with an empty version.
    pub fn kubecross_version(&self, branches: &[&str]) -> VersionResult<String> {
        for (i, branch) in branches.iter().enumerate() {
            info!(branch = %branch, "Trying to get the cross-build image version");

            let url = kubecross_version_url(branch);
            let body = match self.client.get_text(&url) {
                Ok(body) => body,
                Err(e) => {
                    if i < branches.len() - 1 {
                        warn!(
                            branch = %branch,
                            error = %e,
                            "Failed to retrieve cross-build image version, trying next branch"
                        );
                        continue;
                    }
                    return Err(e);
                }
            };

            let version = body.trim();
            if !version.is_empty() {
                info!(version = %version, "Found cross-build image version");
                return Ok(version.to_string());
            }
        }

        Err(VersionError::NotFound(
            "cross-build image version must not be empty".to_string(),
        ))
    }
}
