//! Purpose: Resolve a logical library name to a loaded native module.
//! Exports: `load`, `try_load`, and the `LoadedLibrary` handle.
//! Role: Orchestrates search paths and name variations over the OS loader.
//! Invariants: Local candidates are probed directory-major before the system pass.
//! Invariants: Individual candidate failures are swallowed; only exhaustion surfaces.
//! Invariants: The handle is exclusively caller-owned; release happens exactly once.

use std::ffi::c_void;
use std::fmt;
use std::path::Path;

use libloading::{Library, Symbol};
use tracing::debug;

use crate::error::{Error, ErrorKind};
use crate::names;
use crate::platform;
use crate::search::{self, SearchScope};

/// A successfully loaded native module.
///
/// Owns the OS module reference; dropping the handle releases it. The
/// "releasing an absent handle is a no-op" contract falls out of holding
/// handles as `Option<LoadedLibrary>` on the non-strict path.
pub struct LoadedLibrary {
    inner: Library,
    resolved: String,
}

// The OS module handle stays private; the resolved path or name is the
// useful identity.
impl fmt::Debug for LoadedLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedLibrary")
            .field("resolved", &self.resolved)
            .finish_non_exhaustive()
    }
}

/// Load `name`, failing with `LibraryNotFound` when the cascade is exhausted.
pub fn load(name: &str, base_dir: &Path, scope: SearchScope) -> Result<LoadedLibrary, Error> {
    try_load(name, base_dir, scope)?.ok_or_else(|| {
        Error::new(ErrorKind::LibraryNotFound)
            .with_library(name)
            .with_message(format!(
                "unable to load dynamic library '{name}' or one of its dependencies"
            ))
    })
}

/// Load `name`, yielding `Ok(None)` when the cascade is exhausted.
///
/// `PlatformNotSupported` still propagates — it is a terminal condition,
/// surfaced before any filesystem access, never masked by the non-strict
/// contract.
pub fn try_load(
    name: &str,
    base_dir: &Path,
    scope: SearchScope,
) -> Result<Option<LoadedLibrary>, Error> {
    let platform = platform::current()?;
    let candidates = names::variations(name, platform);
    let dirs = search::search_paths(base_dir, platform, scope);

    // Local pass: directories outer, name variants inner, so the right
    // location beats the right spelling.
    let local = dirs
        .iter()
        .flat_map(|dir| candidates.iter().map(move |candidate| dir.join(candidate)));
    for path in local {
        // Existence first: probing a path is cheap, attempting a load is not.
        if !path.is_file() {
            continue;
        }
        // SAFETY: loading a module runs its initialization routines; the
        // candidate is a staged artifact this process is expected to load.
        match unsafe { Library::new(&path) } {
            Ok(inner) => {
                debug!(path = %path.display(), "loaded native library");
                return Ok(Some(LoadedLibrary {
                    inner,
                    resolved: path.display().to_string(),
                }));
            }
            Err(err) => {
                // Wrong architecture, bad format, or a missing transitive
                // dependency. A later candidate may still succeed, so the
                // cascade continues; the distinction lives in the log.
                debug!(path = %path.display(), error = %err, "candidate exists but failed to load");
            }
        }
    }

    // System pass: hand each variant to the OS default search, same order.
    // A module-directory-only scope restricts resolution to the local pass.
    if !scope.includes_system_search() {
        debug!(library = name, "scope excludes system search; cascade exhausted");
        return Ok(None);
    }
    for candidate in &candidates {
        // SAFETY: as above; a bare name defers resolution to the OS loader.
        match unsafe { Library::new(candidate) } {
            Ok(inner) => {
                debug!(name = %candidate, "loaded native library via system search");
                return Ok(Some(LoadedLibrary {
                    inner,
                    resolved: candidate.clone(),
                }));
            }
            Err(err) => {
                debug!(name = %candidate, error = %err, "system search miss");
            }
        }
    }

    debug!(library = name, "no local or system candidate loaded");
    Ok(None)
}

impl LoadedLibrary {
    /// The path (local pass) or name (system pass) that actually loaded.
    pub fn resolved_name(&self) -> &str {
        &self.resolved
    }

    /// Address of an exported symbol, by exact case-sensitive name.
    ///
    /// Fails with `EntryPointNotFound` when the module has no such export.
    /// The address is valid only while this handle remains loaded.
    pub fn export(&self, symbol: &str) -> Result<*mut c_void, Error> {
        // SAFETY: the export is read as a plain address; callers cast it to
        // the real signature before use.
        match unsafe { self.inner.get::<*mut c_void>(symbol.as_bytes()) } {
            Ok(address) => Ok(*address),
            Err(err) => Err(Error::new(ErrorKind::EntryPointNotFound)
                .with_symbol(symbol)
                .with_message(format!(
                    "could not find entry point '{symbol}' in '{}'",
                    self.resolved
                ))
                .with_source(err)),
        }
    }

    /// Non-strict variant of [`export`](Self::export); `None` when absent.
    pub fn try_export(&self, symbol: &str) -> Option<*mut c_void> {
        // SAFETY: as in `export`.
        unsafe { self.inner.get::<*mut c_void>(symbol.as_bytes()) }
            .ok()
            .map(|address| *address)
    }

    /// Typed export lookup for the binding layer.
    ///
    /// # Safety
    ///
    /// `T` must match the actual type of the exported item.
    pub unsafe fn symbol<'lib, T>(&'lib self, name: &str) -> Result<Symbol<'lib, T>, Error> {
        // SAFETY: forwarded to the caller via this function's contract.
        unsafe { self.inner.get::<T>(name.as_bytes()) }.map_err(|err| {
            Error::new(ErrorKind::EntryPointNotFound)
                .with_symbol(name)
                .with_message(format!(
                    "could not find entry point '{name}' in '{}'",
                    self.resolved
                ))
                .with_source(err)
        })
    }

    /// Release the OS module reference now. Dropping the handle is equivalent.
    pub fn close(self) {
        let _ = self.inner.close();
    }
}
