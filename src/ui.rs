//! Terminal status lines.
//!
//! Progress is reported as short human-readable lines with a coloured
//! marker, interleaved with whatever the compiler prints itself.
//!
//! ```text
//! ⚙ Compiling (debug)
//!    · Skipping src/util.c
//!    $ gcc src/main.c -Iinclude -Wall -g -DDEBUG -c -o obj/main.o
//! 🔗 Linking
//! ✓ Build finished in 1.32s
//! ```

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;

pub fn stage(glyph: &str, title: impl Display) {
    println!("{} {}", glyph.cyan(), title.to_string().bold());
}

pub fn command(line: impl Display) {
    println!("   {} {}", "$".dimmed(), line);
}

pub fn skipping(what: impl Display) {
    println!("   {} Skipping {}", "·".dimmed(), what);
}

pub fn removed(kind: &str, what: impl Display) {
    println!("   {} Removing {} {}", "🗑".red(), kind, what);
}

pub fn success(msg: impl Display) {
    println!("{} {}", "✓".green(), msg);
}

pub fn warn(msg: impl Display) {
    println!("{} {}", "!".yellow(), msg);
}

pub fn error(msg: impl Display) {
    eprintln!("{} {}", "x".red(), msg);
}

/// Bar shown while the driver sits on a wait barrier. Hidden automatically
/// when stdout is not a terminal.
pub fn wait_bar(len: usize, msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(msg);
    pb
}
