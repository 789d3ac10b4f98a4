use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Make `path` absolute, resolving it against `cwd` if it's relative.
///
/// This doesn't touch the file system, so the file doesn't need to exist.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    match path.absolutize_from(cwd) {
        Ok(absolute) => absolute.into_owned(),
        Err(_) => path.to_path_buf(),
    }
}

/// Express `path` relative to `cwd`, for display.
///
/// Falls back to the absolute path when no relative form exists (e.g. a
/// different drive on Windows).
pub fn relativize_path(path: &Path, cwd: &Path) -> String {
    let absolute = absolutize(path, cwd);
    match pathdiff::diff_paths(&absolute, cwd) {
        Some(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => absolute.display().to_string(),
    }
}
