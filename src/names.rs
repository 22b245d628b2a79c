//! Purpose: Candidate file-name variations for one logical library name.
//! Exports: `variations`.
//! Role: Inner axis of the loader cascade; the unmodified name always leads.
//! Invariants: Output order is a contract; callers and tests depend on it.

use crate::platform::{Family, Platform};

/// Ordered candidate file names for `name` on `platform`.
///
/// The unmodified logical name comes first so callers who already supply a
/// fully qualified file name hit it before any decorated variant. On Linux
/// and macOS the `lib` prefix, extension suffix, and combined forms follow
/// unconditionally, covering names supplied with or without the convention
/// already applied.
pub fn variations(name: &str, platform: Platform) -> Vec<String> {
    let mut out = vec![name.to_string()];
    match platform.family {
        Family::Windows => {
            if !ends_with_ignore_ascii_case(name, ".dll") {
                out.push(format!("{name}.dll"));
            }
        }
        Family::Linux => {
            out.push(format!("lib{name}"));
            out.push(format!("{name}.so"));
            out.push(format!("lib{name}.so"));
        }
        Family::MacOs => {
            out.push(format!("lib{name}"));
            out.push(format!("{name}.dylib"));
            out.push(format!("lib{name}.dylib"));
        }
    }
    out
}

fn ends_with_ignore_ascii_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
