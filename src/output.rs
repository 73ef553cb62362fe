//! Output directory planning.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Compute and create the output directory for one build.
///
/// The directory is named `<source> - <YYYY-MM-DD>` under `publish_root`
/// (created if missing). An existing directory is disambiguated with a
/// ` (N)` suffix, unless `overwrite` is set, in which case the files
/// directly inside it are removed and the directory is reused.
pub fn plan_output_dir(publish_root: &Path, source: &str, overwrite: bool) -> Result<PathBuf> {
    if !publish_root.exists() {
        std::fs::create_dir_all(publish_root).map_err(|e| Error::io(publish_root, e))?;
        info!(dir = %publish_root.display(), "created publish directory");
    }

    let date = chrono::Local::now().format("%Y-%m-%d");
    let base = format!("{source} - {date}");
    let candidate = publish_root.join(&base);

    if !candidate.exists() {
        std::fs::create_dir(&candidate).map_err(|e| Error::io(&candidate, e))?;
        return Ok(candidate);
    }

    if overwrite {
        clear_files(&candidate)?;
        return Ok(candidate);
    }

    let mut n = 1u32;
    loop {
        let candidate = publish_root.join(format!("{base} ({n})"));
        if !candidate.exists() {
            std::fs::create_dir(&candidate).map_err(|e| Error::io(&candidate, e))?;
            return Ok(candidate);
        }
        n += 1;
    }
}

/// Remove every file directly inside `dir`, leaving subdirectories alone.
///
/// Any file that cannot be removed (typically held open by a PDF viewer)
/// aborts the whole build; no partial cleanup is retried.
fn clear_files(dir: &Path) -> Result<()> {
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            std::fs::remove_file(&path).map_err(|e| Error::PermissionDenied {
                path,
                message: e.to_string(),
            })?;
        }
    }
    Ok(())
}

/// Relative path from `base` to `target`, walking up with `..` as needed.
///
/// Falls back to `target` unchanged when the two share no common root (e.g.
/// different drive prefixes).
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 && (target.is_absolute() || base.is_absolute()) {
        return target.to_path_buf();
    }

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part);
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}
