//! Resolved build configuration.
//!
//! [`Settings`] is built once at startup from `kiln.toml` (or defaults) and
//! then only ever read. Every stage takes it by reference.

use super::command::ToolCommand;
use super::utils::discover_flags;
use crate::config::{DEBUG_FLAGS, DEBUG_OBJ_DIR, KilnConfig, RELEASE_FLAGS, RELEASE_OBJ_DIR};
use crate::error::BuildError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    pub fn name(self) -> &'static str {
        match self {
            BuildProfile::Debug => "debug",
            BuildProfile::Release => "release",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: BuildProfile,
    pub compiler: String,
    pub source_root: PathBuf,
    pub source_ext: String,
    pub include_dirs: Vec<PathBuf>,
    /// Object tree of the active profile.
    pub artifact_root: PathBuf,
    /// Object trees of every profile, removed by `clean`.
    pub all_artifact_roots: Vec<PathBuf>,
    pub object_ext: String,
    /// Final executable, at the project root. Shared by every profile.
    pub target: PathBuf,
    pub logs_dir: PathBuf,
    pub profile_flags: Vec<String>,
    pub cflags: Vec<String>,
    pub ldflags: Vec<String>,
    pub libs: Vec<String>,
    pub helper_cflags: Vec<String>,
    pub helper_libs: Vec<String>,
    pub scan_depth: Option<usize>,
    pub jobs: usize,
    pub dry_run: bool,
    flag_helpers: Vec<String>,
}

impl Settings {
    /// Resolves paths and flags relative to `root`. Flag helpers are not run
    /// yet; see [`Settings::with_discovered_flags`].
    pub fn from_config(
        root: &Path,
        config: &KilnConfig,
        profile: BuildProfile,
    ) -> Result<Self, BuildError> {
        let name = match &config.project.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => project_dir_name(root)?,
        };

        let profiles = &config.profile;
        let debug_dir = profiles.debug.obj_dir_or(DEBUG_OBJ_DIR);
        let release_dir = profiles.release.obj_dir_or(RELEASE_OBJ_DIR);
        let (obj_dir, profile_flags) = match profile {
            BuildProfile::Debug => (debug_dir, profiles.debug.flags_or(DEBUG_FLAGS)),
            BuildProfile::Release => (release_dir, profiles.release.flags_or(RELEASE_FLAGS)),
        };
        if obj_dir.trim().is_empty() {
            return Err(BuildError::Config(format!(
                "profile `{}` has an empty obj_dir",
                profile.name()
            )));
        }

        let mut all_artifact_roots = Vec::new();
        for dir in [debug_dir, release_dir] {
            if dir.trim().is_empty() {
                continue;
            }
            let dir = root.join(dir);
            if !all_artifact_roots.contains(&dir) {
                all_artifact_roots.push(dir);
            }
        }

        let target = if cfg!(target_os = "windows") {
            root.join(format!("{}.exe", name))
        } else {
            root.join(name)
        };

        Ok(Self {
            profile,
            compiler: config.project.compiler.clone(),
            source_root: root.join(&config.paths.src),
            source_ext: config.paths.source_ext.clone(),
            include_dirs: config.paths.include.iter().map(|d| root.join(d)).collect(),
            artifact_root: root.join(obj_dir),
            all_artifact_roots,
            object_ext: config.paths.object_ext.clone(),
            target,
            logs_dir: root.join(&config.paths.logs),
            profile_flags,
            cflags: config.build.cflags.clone(),
            ldflags: config.build.ldflags.clone(),
            libs: config.build.libs.clone(),
            helper_cflags: Vec::new(),
            helper_libs: Vec::new(),
            scan_depth: config.build.scan_depth,
            jobs: config.build.jobs,
            dry_run: config.build.dry_run,
            flag_helpers: config.build.flag_helpers.clone(),
        })
    }

    /// Runs every configured flag-discovery helper once. Any failure is a
    /// configuration error.
    pub fn with_discovered_flags(mut self) -> Result<Self, BuildError> {
        for helper in &self.flag_helpers {
            let flags = discover_flags(helper)?;
            self.helper_cflags.extend(flags.cflags);
            self.helper_libs.extend(flags.libs);
        }
        Ok(self)
    }

    /// `-I` for each include dir, then helper compile flags.
    pub fn include_flags(&self) -> Vec<String> {
        self.include_dirs
            .iter()
            .map(|dir| format!("-I{}", dir.display()))
            .chain(self.helper_cflags.iter().cloned())
            .collect()
    }

    pub fn compile_command(&self, source: &Path, object: &Path) -> ToolCommand {
        ToolCommand::compile(&self.compiler, source, object)
            .includes(self.include_flags())
            .extra(self.profile_flags.iter().chain(&self.cflags).cloned())
    }

    pub fn link_command(&self, objects: Vec<PathBuf>) -> ToolCommand {
        ToolCommand::link(&self.compiler, objects, &self.target)
            .libraries(self.helper_libs.iter().chain(&self.libs).cloned())
            .extra(self.profile_flags.iter().chain(&self.ldflags).cloned())
    }
}

fn project_dir_name(root: &Path) -> Result<String, BuildError> {
    let absolute = root.canonicalize()?;
    absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BuildError::Config(format!(
                "cannot name the executable after `{}`; set [project] name",
                absolute.display()
            ))
        })
}
