mod clean;
mod command;
mod core;
mod paths;
mod scan;
mod settings;
mod stale;
mod utils;
mod watcher;

pub use clean::{clean, remove_matching, remove_tree};
pub use command::{Action, ToolCommand};
pub use core::{
    BuildReport, BuildTask, CompileOutcome, PendingCompile, build_project, check_outcomes,
    collect_objects, collect_sources, compile_bounded, dispatch, link, plan, wait_all,
};
pub use paths::{ensure_dir, ensure_parent_dir, map_to_artifact};
pub use scan::scan;
pub use settings::{BuildProfile, Settings};
pub use stale::{is_stale, needs_link};
pub use utils::{HelperFlags, discover_flags, load_config};
pub use watcher::watch;
