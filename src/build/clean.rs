//! Build artifact cleanup.
//!
//! `kiln clean` removes the object trees of every profile, the linked
//! executable and stray `*.log` files under the logs directory. Any error
//! aborts the clean; nothing is rolled back.

use super::scan::scan;
use super::settings::Settings;
use crate::ui;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Deletes `path` whether it is a file or a directory tree, children before
/// parents. A missing path is left alone.
pub fn remove_tree(path: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };

    if !meta.is_dir() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        ui::removed("file", path.display());
        return Ok(());
    }

    for entry in WalkDir::new(path).contents_first(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        let entry_path = entry.path();
        if entry.file_type().is_dir() {
            fs::remove_dir(entry_path)
                .with_context(|| format!("Failed to remove {}", entry_path.display()))?;
            ui::removed("dir", entry_path.display());
        } else {
            fs::remove_file(entry_path)
                .with_context(|| format!("Failed to remove {}", entry_path.display()))?;
            ui::removed("file", entry_path.display());
        }
    }
    Ok(())
}

/// Deletes every file [`scan`] finds for `ext` under `roots`.
pub fn remove_matching<P: AsRef<Path>>(roots: &[P], ext: &str) -> Result<usize> {
    let files = scan(roots, ext, None);
    for file in &files {
        fs::remove_file(file).with_context(|| format!("Failed to remove {}", file.display()))?;
        ui::removed("file", file.display());
    }
    Ok(files.len())
}

pub fn clean(settings: &Settings) -> Result<()> {
    ui::stage("🧹", "Cleaning");
    let mut cleaned = false;

    for dir in &settings.all_artifact_roots {
        if dir.exists() {
            remove_tree(dir)?;
            cleaned = true;
        }
    }

    if settings.target.exists() {
        remove_tree(&settings.target)?;
        cleaned = true;
    }

    if remove_matching(&[&settings.logs_dir], ".log")? > 0 {
        cleaned = true;
    }

    if cleaned {
        ui::success("Clean complete.");
    } else {
        ui::warn("Nothing to clean");
    }
    Ok(())
}
