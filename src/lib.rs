//! Purpose: Cross-platform resolution and loading of native shared libraries.
//! Exports: `loader` (load/try_load, `LoadedLibrary`), `platform`, `names`, `search`, `error`.
//! Role: Low-level library-loading layer backing grammar bindings.
//! Invariants: Search plans are rebuilt on every load call; only the platform probe is cached.
//! Invariants: Individual probe failures never surface; only cascade exhaustion does.
pub mod error;
pub mod loader;
pub mod names;
pub mod platform;
pub mod search;

pub use error::{Error, ErrorKind};
pub use loader::{LoadedLibrary, load, try_load};
pub use platform::{Family, Platform};
pub use search::SearchScope;
