//! Shared fixtures: a scratch project and a fake `cc` that records every
//! invocation and touches whatever follows `-o`.

#![allow(dead_code)]

use filetime::{FileTime, set_file_mtime};
use kiln::build::{BuildProfile, Settings};
use kiln::config::KilnConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Project {
    pub dir: TempDir,
    pub log: PathBuf,
    pub script: PathBuf,
}

impl Project {
    /// The fake compiler exits with 3 when any argument contains `fail_marker`.
    pub fn new(fail_marker: Option<&str>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp project");
        let log = dir.path().join("cc.log");
        let script = dir.path().join("fake-cc.sh");

        let fail = match fail_marker {
            Some(marker) => format!("case \"$*\" in *\"{marker}\"*) exit 3 ;; esac\n"),
            None => String::new(),
        };
        let body = format!(
            r#"echo "$*" >> '{log}'
{fail}out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then out="$arg"; fi
  prev="$arg"
done
: > "$out"
"#,
            log = log.display(),
        );
        fs::write(&script, body).expect("Failed to write fake compiler");

        Self { dir, log, script }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn config(&self) -> KilnConfig {
        let mut config = KilnConfig::default();
        config.project.name = Some("game".into());
        // Run through `sh` so the test never execs a file it just wrote.
        config.project.compiler = format!("sh {}", self.script.display());
        config.build.flag_helpers.clear();
        config.build.libs = vec!["-lm".into()];
        config
    }

    pub fn settings(&self, config: &KilnConfig, profile: BuildProfile) -> Settings {
        Settings::from_config(self.root(), config, profile)
            .and_then(Settings::with_discovered_flags)
            .expect("Failed to resolve settings")
    }

    pub fn write_at(&self, rel: &str, secs: i64) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "int x;\n").unwrap();
        set_file_mtime(&path, FileTime::from_unix_time(secs, 0)).unwrap();
        path
    }

    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn compiles(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .filter(|line| line.split_whitespace().any(|w| w == "-c"))
            .collect()
    }

    pub fn links(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .filter(|line| !line.split_whitespace().any(|w| w == "-c"))
            .collect()
    }

    pub fn clear_log(&self) {
        let _ = fs::remove_file(&self.log);
    }
}
