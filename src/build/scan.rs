use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Collects every file under `roots` whose name ends with `ext`.
///
/// Roots are walked in order, each one pre-order with entries sorted by
/// name. Hidden files are skipped and hidden directories are not entered,
/// although a root is always walked even if its own name starts with a dot.
/// With `max_depth`, nothing deeper than that many levels below a root is
/// visited. A root that does not exist yields nothing.
pub fn scan<P: AsRef<Path>>(roots: &[P], ext: &str, max_depth: Option<usize>) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for root in roots {
        let mut walker = WalkDir::new(root.as_ref()).sort_by_file_name();
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|e| e.ok());

        for entry in entries {
            if entry.file_type().is_dir() {
                continue;
            }
            if entry.file_name().to_string_lossy().ends_with(ext) {
                found.push(entry.into_path());
            }
        }
    }

    found
}
