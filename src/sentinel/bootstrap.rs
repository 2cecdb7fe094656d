//! Startup checks for the primary log destination.

use crate::internal;
use crate::output::open_append;
use std::fs::DirBuilder;
use std::path::Path;

/// Makes sure `path` can be appended to: creates missing parent directories with
/// `dir_mode`, creates the file with `file_mode` when absent, and opens it for appending.
///
/// Safe to call repeatedly: existing directories and files are left as they are and
/// existing content is never truncated.
///
/// # Errors
/// `Error::Configuration` when the directory cannot be created or the file cannot be
/// opened for appending.
pub fn ensure_destination(path: &Path, file_mode: u32, dir_mode: u32) -> Result<(), crate::Error> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.is_dir()
    {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(dir_mode);
        }
        #[cfg(not(unix))]
        let _ = dir_mode;

        builder.create(dir).map_err(|e| {
            crate::Error::configuration(dir, format!("cannot create log directory: {e}"))
        })?;
        internal::debug("BOOTSTRAP", &format!("Created log directory: {}", dir.display()));
    }

    if path.is_dir() {
        return Err(crate::Error::configuration(path, "log destination is a directory"));
    }

    let existed = path.exists();
    open_append(path, file_mode, false)
        .map_err(|e| crate::Error::configuration(path, format!("log file is not writable: {e}")))?;
    if !existed {
        internal::debug("BOOTSTRAP", &format!("Created log file: {}", path.display()));
    }
    Ok(())
}
