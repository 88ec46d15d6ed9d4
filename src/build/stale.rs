use std::fs;
use std::path::Path;
use std::time::SystemTime;

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

/// Whether `source` has to be recompiled into `artifact`.
///
/// Missing files always rebuild. Otherwise only a source strictly newer than
/// its artifact rebuilds; equal timestamps count as up to date.
pub fn is_stale(source: &Path, artifact: &Path) -> bool {
    if !(source.is_file() && artifact.is_file()) {
        return true;
    }

    match (modified(source), modified(artifact)) {
        (Some(src_time), Some(obj_time)) => src_time > obj_time,
        _ => true,
    }
}

/// Whether the executable at `output` is older than any of `objects`, or
/// missing altogether.
pub fn needs_link(output: &Path, objects: &[impl AsRef<Path>]) -> bool {
    let Some(bin_time) = output.is_file().then(|| modified(output)).flatten() else {
        return true;
    };

    objects
        .iter()
        .any(|obj| modified(obj.as_ref()).is_none_or(|t| t > bin_time))
}
