//! Purpose: Host OS family and processor architecture detection.
//! Exports: `Family`, `Platform`, and the memoized `current` probe.
//! Role: Feeds the name-variation and search-path generators.
//! Invariants: Exactly one family per process; unsupported hosts error, never a partial value.
//! Invariants: The probe is pure; memoization is write-once and idempotent to recompute.

use std::sync::OnceLock;

use crate::error::{Error, ErrorKind};

/// Recognized operating-system families.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Family {
    Windows,
    Linux,
    MacOs,
}

impl Family {
    /// Short OS tag used in runtime-identifier directory names.
    pub fn os_tag(self) -> &'static str {
        match self {
            Family::Windows => "win",
            Family::Linux => "linux",
            Family::MacOs => "osx",
        }
    }

    /// Map an OS token (as reported by `std::env::consts::OS`) to a family.
    pub fn from_os(os: &str) -> Option<Self> {
        match os {
            "windows" => Some(Family::Windows),
            "linux" => Some(Family::Linux),
            "macos" => Some(Family::MacOs),
            _ => None,
        }
    }
}

/// Immutable description of the host: OS family plus architecture tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Platform {
    pub family: Family,
    pub arch: &'static str,
}

impl Platform {
    /// Runtime identifier in the packaged-layout convention, e.g. `linux-x64`.
    pub fn rid(self) -> String {
        format!("{}-{}", self.family.os_tag(), self.arch)
    }
}

/// Lower-cased architecture tag for runtime-identifier directories.
///
/// Follows the .NET RID convention the packaged layout was defined against:
/// `x86_64` becomes `x64` and `aarch64` becomes `arm64`; already-conventional
/// tags pass through unchanged.
fn arch_tag(arch: &'static str) -> &'static str {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        other => other,
    }
}

fn detect() -> Option<Platform> {
    Family::from_os(std::env::consts::OS).map(|family| Platform {
        family,
        arch: arch_tag(std::env::consts::ARCH),
    })
}

/// The host platform, probed once per process.
///
/// Fails with `PlatformNotSupported` when the host OS is none of the three
/// recognized families. The probe holds no resources, so there is nothing to
/// tear down.
pub fn current() -> Result<Platform, Error> {
    static PLATFORM: OnceLock<Option<Platform>> = OnceLock::new();
    match PLATFORM.get_or_init(detect) {
        Some(platform) => Ok(*platform),
        None => Err(Error::new(ErrorKind::PlatformNotSupported).with_message(format!(
            "host OS '{}' is not a recognized family",
            std::env::consts::OS
        ))),
    }
}
