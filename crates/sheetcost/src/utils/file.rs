use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// True for a `.dxf` extension in any case
pub fn is_dxf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dxf"))
}

/// Drawing files directly inside `dir`, in natural file name order
///
/// Subdirectories are not searched.
pub fn discover_drawings(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if entry.file_type().is_file() && is_dxf(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort_by(|a, b| compare_file_names(a, b));
    Ok(files)
}

fn compare_file_names(a: &Path, b: &Path) -> Ordering {
    let name = |p: &Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    natord::compare(&name(a), &name(b))
}
