//! Build-artifact version retrieval from local build trees.
//!
//! A build directory contains the output of one of two build systems:
//!
//! - Bazel builds leave the version at `bazel-genfiles/version` and their
//!   release tarball under `bazel-bin/build/release-tars/`
//! - Dockerized builds leave their release tarball under
//!   `_output/release-tars/`, with the version stored inside the tarball as
//!   the entry `kubernetes/version`
//!
//! All paths are fixed conventions of the build systems; callers only supply
//! the build directory root. Nothing here writes to the build tree.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

use tracing::debug;

use super::error::{VersionError, VersionResult};

/// Release tarball directory of a dockerized build.
const DOCKER_BUILD_PATH: &str = "_output/release-tars";

/// Release tarball directory of a Bazel build.
const BAZEL_BUILD_PATH: &str = "bazel-bin/build/release-tars";

/// Version file written by a Bazel build.
const BAZEL_VERSION_PATH: &str = "bazel-genfiles/version";

/// Version entry inside the dockerized release tarball.
const DOCKER_VERSION_PATH: &str = "kubernetes/version";

/// File name of the release tarball, common to both build systems.
const RELEASE_TARBALL: &str = "kubernetes.tar.gz";

/// Read the version from a Bazel build.
///
/// Returns the content of `bazel-genfiles/version` as-is, including any
/// trailing newline the build wrote.
pub fn read_bazel_version(build_dir: &Path) -> VersionResult<String> {
    let path = build_dir.join(BAZEL_VERSION_PATH);
    fs::read_to_string(&path).map_err(|source| VersionError::Io { path, source })
}

/// Read the version from a dockerized build.
///
/// Extracts the single entry `kubernetes/version` out of the release tarball
/// and returns it with surrounding whitespace trimmed.
pub fn read_dockerized_version(build_dir: &Path) -> VersionResult<String> {
    let tarball = build_dir.join(DOCKER_BUILD_PATH).join(RELEASE_TARBALL);
    let version = read_archive_entry(&tarball, DOCKER_VERSION_PATH)?;
    Ok(version.trim().to_string())
}

/// Determine whether the most recent build in the directory was produced by
/// Bazel.
///
/// Compares the modification timestamps of the two build systems' release
/// tarballs; true iff the Bazel artifact is strictly newer. A missing
/// artifact is older than any present one, so two missing artifacts yield
/// false.
pub fn built_with_bazel(build_dir: &Path) -> VersionResult<bool> {
    let bazel_tarball = build_dir.join(BAZEL_BUILD_PATH).join(RELEASE_TARBALL);
    let docker_tarball = build_dir.join(DOCKER_BUILD_PATH).join(RELEASE_TARBALL);

    let bazel = modified_time(&bazel_tarball)?;
    let docker = modified_time(&docker_tarball)?;
    debug!(bazel = ?bazel, docker = ?docker, "Comparing release tarball timestamps");

    Ok(match (bazel, docker) {
        (Some(bazel), Some(docker)) => bazel > docker,
        (Some(_), None) => true,
        (None, _) => false,
    })
}

/// Modification time of a file, or `None` when it does not exist.
fn modified_time(path: &Path) -> VersionResult<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(metadata) => {
            let modified = metadata.modified().map_err(|source| VersionError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Some(modified))
        }
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(VersionError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Extract a single entry out of a gzipped tarball as text.
///
/// Archives go through the system `tar` tool, the same tool the release
/// build uses to create them.
fn read_archive_entry(archive: &Path, entry: &str) -> VersionResult<String> {
    if !archive.exists() {
        return Err(VersionError::Archive {
            path: archive.to_path_buf(),
            reason: "archive not found".to_string(),
        });
    }

    let output = Command::new("tar")
        .args(["-xzOf", archive.to_str().unwrap_or(""), entry])
        .output()
        .map_err(|e| VersionError::Archive {
            path: archive.to_path_buf(),
            reason: format!("failed to run tar: {}", e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VersionError::Archive {
            path: archive.to_path_buf(),
            reason: format!("tar extraction failed: {}", stderr.trim()),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| VersionError::Archive {
        path: archive.to_path_buf(),
        reason: format!("entry {} is not valid UTF-8", entry),
    })
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use filetime::{set_file_mtime, FileTime};
    use tempfile::TempDir;

    use super::*;

    fn touch(path: &Path, mtime_unix: i64) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
        set_file_mtime(path, FileTime::from_unix_time(mtime_unix, 0)).unwrap();
    }

    /// Build a release tarball fixture containing `kubernetes/version`.
    fn write_docker_tarball(build_dir: &Path, version_content: &str) {
        let staging = build_dir.join("staging");
        fs::create_dir_all(staging.join("kubernetes")).unwrap();
        fs::write(staging.join(DOCKER_VERSION_PATH), version_content).unwrap();

        let tarball_dir = build_dir.join(DOCKER_BUILD_PATH);
        fs::create_dir_all(&tarball_dir).unwrap();

        let status = Command::new("tar")
            .args([
                "-czf",
                tarball_dir.join(RELEASE_TARBALL).to_str().unwrap(),
                "-C",
                staging.to_str().unwrap(),
                "kubernetes",
            ])
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_read_bazel_version_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(BAZEL_VERSION_PATH);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "v1.18.6\n").unwrap();

        // No trimming: the trailing newline is the caller's problem.
        assert_eq!(read_bazel_version(temp.path()).unwrap(), "v1.18.6\n");
    }

    #[test]
    fn test_read_bazel_version_missing() {
        let temp = TempDir::new().unwrap();

        let err = read_bazel_version(temp.path()).unwrap_err();
        assert!(matches!(err, VersionError::Io { .. }));
    }

    #[test]
    fn test_read_dockerized_version() {
        let temp = TempDir::new().unwrap();
        write_docker_tarball(temp.path(), "v1.18.6-beta.0.2+b2973a91d2c509\n");

        assert_eq!(
            read_dockerized_version(temp.path()).unwrap(),
            "v1.18.6-beta.0.2+b2973a91d2c509"
        );
    }

    #[test]
    fn test_read_dockerized_version_missing_archive() {
        let temp = TempDir::new().unwrap();

        let err = read_dockerized_version(temp.path()).unwrap_err();
        assert!(matches!(err, VersionError::Archive { .. }));
    }

    #[test]
    fn test_read_dockerized_version_corrupt_archive() {
        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join(DOCKER_BUILD_PATH).join(RELEASE_TARBALL);
        fs::create_dir_all(tarball.parent().unwrap()).unwrap();
        fs::write(&tarball, b"not a gzip archive").unwrap();

        let err = read_dockerized_version(temp.path()).unwrap_err();
        assert!(matches!(err, VersionError::Archive { .. }));
    }

    #[test]
    fn test_read_dockerized_version_missing_entry() {
        let temp = TempDir::new().unwrap();

        // Tarball exists but holds no kubernetes/version entry.
        let staging = temp.path().join("staging");
        fs::create_dir_all(staging.join("kubernetes")).unwrap();
        fs::write(staging.join("kubernetes/README"), "nothing here").unwrap();

        let tarball_dir = temp.path().join(DOCKER_BUILD_PATH);
        fs::create_dir_all(&tarball_dir).unwrap();
        let status = Command::new("tar")
            .args([
                "-czf",
                tarball_dir.join(RELEASE_TARBALL).to_str().unwrap(),
                "-C",
                staging.to_str().unwrap(),
                "kubernetes",
            ])
            .status()
            .unwrap();
        assert!(status.success());

        let err = read_dockerized_version(temp.path()).unwrap_err();
        assert!(matches!(err, VersionError::Archive { .. }));
    }

    #[test]
    fn test_built_with_bazel_when_bazel_newer() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(BAZEL_BUILD_PATH).join(RELEASE_TARBALL), 2_000);
        touch(&temp.path().join(DOCKER_BUILD_PATH).join(RELEASE_TARBALL), 1_000);

        assert!(built_with_bazel(temp.path()).unwrap());
    }

    #[test]
    fn test_built_with_bazel_when_docker_newer() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(BAZEL_BUILD_PATH).join(RELEASE_TARBALL), 1_000);
        touch(&temp.path().join(DOCKER_BUILD_PATH).join(RELEASE_TARBALL), 2_000);

        assert!(!built_with_bazel(temp.path()).unwrap());
    }

    #[test]
    fn test_built_with_bazel_requires_strictly_newer() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(BAZEL_BUILD_PATH).join(RELEASE_TARBALL), 1_000);
        touch(&temp.path().join(DOCKER_BUILD_PATH).join(RELEASE_TARBALL), 1_000);

        assert!(!built_with_bazel(temp.path()).unwrap());
    }

    #[test]
    fn test_built_with_bazel_only_bazel_present() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(BAZEL_BUILD_PATH).join(RELEASE_TARBALL), 1_000);

        assert!(built_with_bazel(temp.path()).unwrap());
    }

    #[test]
    fn test_built_with_bazel_only_docker_present() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(DOCKER_BUILD_PATH).join(RELEASE_TARBALL), 1_000);

        assert!(!built_with_bazel(temp.path()).unwrap());
    }

    #[test]
    fn test_built_with_bazel_neither_present() {
        let temp = TempDir::new().unwrap();

        // No artifact can be more recent than a nonexistent one.
        assert!(!built_with_bazel(temp.path()).unwrap());
    }
}
