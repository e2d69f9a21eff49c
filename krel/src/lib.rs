//! Krel - build version resolution for release engineering.
//!
//! This library is the version-resolution core of the release toolchain. It
//! locates the version of a build from the authoritative sources the release
//! infrastructure publishes:
//!
//! - Remotely hosted version marker files, one per release channel
//!   (stable, pre-release, CI)
//! - Local build output directories (Bazel and dockerized build trees)
//! - Branch-parameterized version files on the upstream repository, with
//!   ordered fallback across candidate branches
//!
//! It also validates whether a version string is well-formed for release and
//! whether it identifies a dirty build.
//!
//! All operations are synchronous and stateless; each call performs at most
//! one blocking network request or file read. Callers needing bounded latency
//! wrap calls with their own timeout mechanism.

pub mod config;
pub mod version;
