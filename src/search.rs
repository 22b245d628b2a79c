//! Purpose: Candidate directory construction for the local load pass.
//! Exports: `SearchScope` and `search_paths`.
//! Role: Outer axis of the loader cascade; directory priority dominates name priority.
//! Invariants: The base directory is always first when local search is in scope.
//! Invariants: Paths are rebuilt per call; nothing here is cached.

use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Where the loader is allowed to look for candidates.
///
/// `Unrestricted` is the default: module directories first, then the OS
/// default search. `ModuleDirectoryOnly` stops after the local pass;
/// `SystemOnly` skips the local pass entirely.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SearchScope {
    #[default]
    Unrestricted,
    ModuleDirectoryOnly,
    SystemOnly,
}

impl SearchScope {
    pub(crate) fn includes_module_directory(self) -> bool {
        !matches!(self, SearchScope::SystemOnly)
    }

    pub(crate) fn includes_system_search(self) -> bool {
        !matches!(self, SearchScope::ModuleDirectoryOnly)
    }
}

/// Ordered candidate directories to probe before the system pass.
///
/// 1. `base_dir` itself (co-located binaries).
/// 2. `base_dir/runtimes/{rid}/native` (packaged multi-platform layout).
/// 3. `base_dir/../../../build/runtimes/{rid}/native` (development tree,
///    before packaging stages binaries next to the module).
///
/// Empty when `scope` excludes module directories, which tells the loader
/// to go straight to the system pass.
pub fn search_paths(base_dir: &Path, platform: Platform, scope: SearchScope) -> Vec<PathBuf> {
    if !scope.includes_module_directory() {
        return Vec::new();
    }
    let rid = platform.rid();
    vec![
        base_dir.to_path_buf(),
        base_dir.join("runtimes").join(&rid).join("native"),
        base_dir
            .join("..")
            .join("..")
            .join("..")
            .join("build")
            .join("runtimes")
            .join(&rid)
            .join("native"),
    ]
}
