// Black-box loading scenarios against real shared objects where the host
// provides one, plus exhaustion behavior that needs no artifacts at all.

use arbor_native::{load, try_load, ErrorKind, LoadedLibrary, SearchScope};

#[test]
fn exhausted_cascade_fails_strict_and_is_absent_non_strict() {
    let temp = tempfile::tempdir().expect("tempdir");

    let err = load("missing", temp.path(), SearchScope::Unrestricted).expect_err("strict");
    assert_eq!(err.kind(), ErrorKind::LibraryNotFound);

    let handle = try_load("missing", temp.path(), SearchScope::Unrestricted).expect("non-strict");
    assert!(handle.is_none());
}

#[test]
fn absent_handle_release_is_a_noop() {
    let handle: Option<LoadedLibrary> = None;
    drop(handle);
}

// On Linux a shared object is always already mapped into the test process;
// stage copies of it to exercise the local pass, and use its soname to
// exercise the system pass.
#[cfg(target_os = "linux")]
mod linux {
    use std::path::PathBuf;

    use arbor_native::{load, platform, try_load, ErrorKind, SearchScope};

    /// Path of the libc image mapped into this process.
    fn mapped_libc() -> PathBuf {
        let maps = std::fs::read_to_string("/proc/self/maps").expect("read /proc/self/maps");
        for line in maps.lines() {
            let Some(idx) = line.find('/') else { continue };
            let path = PathBuf::from(&line[idx..]);
            let file = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or_default();
            if file.starts_with("libc.so") || file.starts_with("libc-") {
                return path;
            }
        }
        panic!("no mapped libc found in /proc/self/maps");
    }

    fn libc_soname() -> String {
        mapped_libc()
            .file_name()
            .and_then(|f| f.to_str())
            .expect("libc file name")
            .to_string()
    }

    #[test]
    fn packaged_layout_resolves_via_local_pass() {
        let temp = tempfile::tempdir().expect("tempdir");
        let rid = platform::current().expect("supported host").rid();
        let native = temp.path().join("runtimes").join(&rid).join("native");
        std::fs::create_dir_all(&native).expect("create native dir");
        std::fs::copy(mapped_libc(), native.join("libexample.so")).expect("stage library");

        let handle =
            load("example", temp.path(), SearchScope::Unrestricted).expect("local pass load");
        assert!(handle.resolved_name().contains("runtimes"));
        handle.close();
    }

    #[test]
    fn base_directory_wins_over_packaged_layout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let rid = platform::current().expect("supported host").rid();
        let native = temp.path().join("runtimes").join(&rid).join("native");
        std::fs::create_dir_all(&native).expect("create native dir");
        std::fs::copy(mapped_libc(), native.join("libexample.so")).expect("stage packaged");
        std::fs::copy(mapped_libc(), temp.path().join("libexample.so")).expect("stage co-located");

        let handle = load("example", temp.path(), SearchScope::Unrestricted).expect("load");
        assert_eq!(
            handle.resolved_name(),
            temp.path().join("libexample.so").display().to_string()
        );
    }

    #[test]
    fn system_only_scope_skips_staged_local_candidates() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::copy(mapped_libc(), temp.path().join("libexample.so")).expect("stage co-located");

        // Restricted to the system pass, the staged copy is invisible and
        // "example" is not a resolvable system library.
        let handle =
            try_load("example", temp.path(), SearchScope::SystemOnly).expect("supported host");
        assert!(handle.is_none());

        // Sanity: the unrestricted scope does see it.
        let handle =
            try_load("example", temp.path(), SearchScope::Unrestricted).expect("supported host");
        assert!(handle.is_some());
    }

    #[test]
    fn module_directory_only_scope_skips_system_pass() {
        let soname = libc_soname();
        let temp = tempfile::tempdir().expect("tempdir");

        // Restricted to module directories, a name only the system search
        // could resolve stays unresolved.
        let handle = try_load(&soname, temp.path(), SearchScope::ModuleDirectoryOnly)
            .expect("supported host");
        assert!(handle.is_none());

        // Sanity: the unrestricted scope does reach the system pass.
        let handle = try_load(&soname, temp.path(), SearchScope::Unrestricted)
            .expect("supported host");
        assert!(handle.is_some());
    }

    #[test]
    fn handle_debug_output_names_resolved_artifact() {
        let soname = libc_soname();
        let temp = tempfile::tempdir().expect("tempdir");
        let handle = try_load(&soname, temp.path(), SearchScope::Unrestricted)
            .expect("supported host")
            .expect("load libc");
        assert!(format!("{handle:?}").contains(&soname));
    }

    #[test]
    fn system_pass_resolves_already_loaded_soname() {
        let soname = libc_soname();
        let temp = tempfile::tempdir().expect("tempdir");

        let handle = try_load(&soname, temp.path(), SearchScope::Unrestricted)
            .expect("supported host")
            .expect("system pass load");
        // The unmodified name leads the variation order, so the system pass
        // resolved it as given.
        assert_eq!(handle.resolved_name(), soname);
    }

    #[test]
    fn symbol_lookup_strict_and_non_strict() {
        let soname = libc_soname();
        let temp = tempfile::tempdir().expect("tempdir");
        let handle = try_load(&soname, temp.path(), SearchScope::Unrestricted)
            .expect("supported host")
            .expect("load libc");

        let malloc = handle.export("malloc").expect("malloc export");
        assert!(!malloc.is_null());

        assert!(handle.try_export("ts_unknown_fn").is_none());
        let err = handle.export("ts_unknown_fn").expect_err("unknown symbol");
        assert_eq!(err.kind(), ErrorKind::EntryPointNotFound);

        handle.close();
    }

    #[test]
    fn typed_symbol_lookup_resolves() {
        let soname = libc_soname();
        let temp = tempfile::tempdir().expect("tempdir");
        let handle = try_load(&soname, temp.path(), SearchScope::Unrestricted)
            .expect("supported host")
            .expect("load libc");

        type Strlen = unsafe extern "C" fn(*const std::ffi::c_char) -> usize;
        // SAFETY: strlen has exactly this signature in libc.
        let strlen = unsafe { handle.symbol::<Strlen>("strlen") }.expect("strlen symbol");
        // SAFETY: the pointer is a valid nul-terminated string.
        let len = unsafe { strlen(c"arbor".as_ptr()) };
        assert_eq!(len, 5);
    }
}

#[cfg(target_os = "macos")]
mod macos {
    use arbor_native::{try_load, ErrorKind, SearchScope};

    #[test]
    fn system_pass_resolves_libsystem() {
        let temp = tempfile::tempdir().expect("tempdir");
        let handle = try_load("libSystem.B.dylib", temp.path(), SearchScope::Unrestricted)
            .expect("supported host")
            .expect("system pass load");

        let malloc = handle.export("malloc").expect("malloc export");
        assert!(!malloc.is_null());

        assert!(handle.try_export("ts_unknown_fn").is_none());
        let err = handle.export("ts_unknown_fn").expect_err("unknown symbol");
        assert_eq!(err.kind(), ErrorKind::EntryPointNotFound);
    }
}
