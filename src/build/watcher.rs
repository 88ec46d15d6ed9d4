use super::core::build_project;
use super::settings::Settings;
use crate::ui;
use anyhow::Result;
use colored::*;
use notify::{Config, RecursiveMode, Watcher};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Builds once, then again every time something under the source root
/// changes. Build failures are reported and watching continues.
pub fn watch(settings: &Settings) -> Result<()> {
    println!(
        "{} Watching for changes in {}...",
        "👀".cyan(),
        settings.source_root.display()
    );

    let (tx, rx) = channel();
    let config_notify = Config::default().with_poll_interval(Duration::from_secs(1));
    let mut watcher = notify::RecommendedWatcher::new(tx, config_notify)?;
    watcher.watch(&settings.source_root, RecursiveMode::Recursive)?;

    rebuild(settings);

    while rx.recv().is_ok() {
        // Debounce: editors tend to emit several events per save.
        std::thread::sleep(Duration::from_millis(100));
        while rx.try_recv().is_ok() {}
        println!("{} File changed. Rebuilding...", "🔄".yellow());
        rebuild(settings);
    }
    Ok(())
}

fn rebuild(settings: &Settings) {
    if let Err(e) = build_project(settings) {
        ui::error(e);
    }
}
