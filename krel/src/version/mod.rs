//! Build version resolution and validation.
//!
//! The version of a build is resolved from one of three authoritative
//! sources, depending on what the caller has in hand:
//!
//! - **Marker files**: remotely hosted per-channel version pointers
//!   ([`VersionResolver`])
//! - **Build directories**: local Bazel or dockerized build output
//!   ([`read_bazel_version`], [`read_dockerized_version`],
//!   [`built_with_bazel`])
//! - **Upstream branches**: the cross-build image version file, with ordered
//!   branch fallback ([`VersionResolver::kubecross_version`])
//!
//! Resolved strings can then be checked with [`is_valid_release_build`] and
//! [`is_dirty_build`], or canonicalized with [`normalize_version`].

mod build_dir;
mod error;
mod http;
mod kubecross;
mod marker;
mod validate;

pub use build_dir::{built_with_bazel, read_bazel_version, read_dockerized_version};
pub use error::{VersionError, VersionResult};
pub use http::{HttpClient, ReqwestClient};
pub use marker::{normalize_version, VersionResolver};
pub use validate::{is_dirty_build, is_valid_release_build};
