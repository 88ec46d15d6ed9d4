use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Maps `source` under `source_root` to its object path under `artifact_root`,
/// swapping the final extension for `new_ext` (`".o"` and `"o"` are the same).
///
/// The mapping is one-to-one for sources under `source_root`, which is all
/// the scanner ever yields. A source outside it keeps its whole relative path
/// below `artifact_root` and can land on the same object as a nested source
/// (`vendor/lib.c` and `src/vendor/lib.c` both give `obj/vendor/lib.o`).
pub fn map_to_artifact(
    source: &Path,
    source_root: &Path,
    artifact_root: &Path,
    new_ext: &str,
) -> PathBuf {
    let relative: PathBuf = match source.strip_prefix(source_root) {
        Ok(rest) => rest.to_path_buf(),
        Err(_) => source
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect(),
    };

    let mut artifact = artifact_root.join(relative);
    artifact.set_extension(new_ext.trim_start_matches('.'));
    artifact
}

/// Makes sure the directory that will hold `artifact` exists.
///
/// Returns `true` when it was already there. Safe to call concurrently for
/// overlapping trees: another thread winning the race is not an error.
pub fn ensure_parent_dir(artifact: &Path) -> io::Result<bool> {
    match artifact.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(true),
    }
}

pub fn ensure_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(true);
    }
    // create_dir_all already treats "exists" as success, including when a
    // concurrent caller created the directory first.
    fs::create_dir_all(dir)?;
    Ok(false)
}
