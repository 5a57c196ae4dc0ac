//! Layout and partial discovery.
//!
//! Templates share one root directory, and their file names carry role markers
//! by convention:
//!
//! ```text
//! templates/
//! ├── base.layout.jinja
//! ├── home.page.jinja
//! └── partials/
//!     └── nav.partial.jinja
//! ```
//!
//! [`collect_by_tag`] walks the root once, ahead of time, and picks out the
//! files whose path contains one of the given tags. The result is the ordered
//! partials list compiled alongside every page:
//!
//! ```rust,ignore
//! let partials = collect_by_tag("./templates", "jinja", &["layout", "partial"])?;
//! // ["base.layout.jinja", "partials/nav.partial.jinja"]
//! ```
//!
//! Directory entries are visited in sorted order, so the result is stable
//! across platforms and runs. Symbolic links to files are followed; links to
//! directories are skipped, so a link cycle cannot repeat entries.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DiscoveryError;

/// Recursively collects every file under `root` whose extension equals `extension`.
///
/// The extension may be given with or without its leading dot and is compared
/// exactly (case-sensitive). Returned paths are `root` joined with the file's
/// relative path.
///
/// # Errors
///
/// Fails if `root` is missing, is not a directory, or any directory below it
/// can't be read. Nothing is returned on failure.
pub fn find_files(
    root: impl AsRef<Path>,
    extension: &str,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = root.as_ref();
    check_root(root)?;

    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();
    walk_recursive(root, extension, &mut files)?;
    Ok(files)
}

/// Collects template files under `root` whose relative path contains one of `tags`.
///
/// Tags are processed in order: all matches for the first tag, then all for
/// the second, and so on. A file matching several tags appears once per tag.
/// Returned paths are relative to `root`, ready to be used as partials.
///
/// # Errors
///
/// Propagates [`find_files`] failures; no partial list is produced.
pub fn collect_by_tag<S: AsRef<str>>(
    root: impl AsRef<Path>,
    extension: &str,
    tags: &[S],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = root.as_ref();
    let relative: Vec<PathBuf> = find_files(root, extension)?
        .into_iter()
        .filter_map(|path| path.strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();

    let mut matched = Vec::new();
    for tag in tags {
        let tag = tag.as_ref();
        matched.extend(
            relative
                .iter()
                .filter(|path| path.to_string_lossy().contains(tag))
                .cloned(),
        );
    }
    Ok(matched)
}

fn check_root(root: &Path) -> Result<(), DiscoveryError> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DiscoveryError::RootNotFound {
            path: root.to_path_buf(),
        },
        _ => DiscoveryError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_dir() {
        return Err(DiscoveryError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

fn walk_recursive(
    current: &Path,
    extension: &str,
    files: &mut Vec<PathBuf>,
) -> Result<(), DiscoveryError> {
    let io_err = |source: std::io::Error| DiscoveryError::Io {
        path: current.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(current)
        .map_err(io_err)?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (path, file_type) in entries {
        if file_type.is_dir() {
            walk_recursive(&path, extension, files)?;
        } else if is_template_file(&path, file_type) && has_extension(&path, extension) {
            files.push(path);
        }
    }

    Ok(())
}

// Symlinked files are followed; symlinked directories are not descended into.
fn is_template_file(path: &Path, file_type: fs::FileType) -> bool {
    if file_type.is_symlink() {
        return fs::metadata(path).is_ok_and(|meta| meta.is_file());
    }
    file_type.is_file()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
