use serde::Deserialize;

/// File name looked up at the project root. The file is optional; every
/// field has a default matching a plain `src/` + `include/` C project.
pub const CONFIG_FILE: &str = "kiln.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct KilnConfig {
    pub project: ProjectConfig,
    pub paths: PathsConfig,
    pub build: BuildConfig,
    pub profile: ProfilesConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ProjectConfig {
    /// Executable name. Defaults to the project directory's name.
    pub name: Option<String>,
    /// Compiler driver used for both compiling and linking. May carry a
    /// launcher, e.g. `ccache gcc`.
    pub compiler: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            compiler: "gcc".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PathsConfig {
    pub src: String,
    pub include: Vec<String>,
    pub logs: String,
    pub source_ext: String,
    pub object_ext: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            src: "src".to_string(),
            include: vec!["include".to_string(), "vendor".to_string()],
            logs: "logs".to_string(),
            source_ext: ".c".to_string(),
            object_ext: ".o".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BuildConfig {
    pub cflags: Vec<String>,
    pub ldflags: Vec<String>,
    pub libs: Vec<String>,
    /// Commands queried once with `--cflags` and `--libs`, e.g. `sdl2-config`
    /// or `pkg-config sdl2`.
    pub flag_helpers: Vec<String>,
    pub scan_depth: Option<usize>,
    /// Maximum concurrent compilations. `0` spawns everything at once.
    pub jobs: usize,
    pub dry_run: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            cflags: Vec::new(),
            ldflags: Vec::new(),
            libs: ["-lncurses", "-lm", "-ldl", "-lSDL2"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            flag_helpers: vec!["sdl2-config".to_string()],
            scan_depth: None,
            jobs: 0,
            dry_run: false,
        }
    }
}

pub const DEBUG_OBJ_DIR: &str = "obj";
pub const DEBUG_FLAGS: &[&str] = &["-Wall", "-g", "-DDEBUG"];
pub const RELEASE_OBJ_DIR: &str = "obj_opt";
pub const RELEASE_FLAGS: &[&str] = &["-O3"];

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ProfilesConfig {
    pub debug: Profile,
    pub release: Profile,
}

/// Overrides for one profile. A field left out keeps that profile's own
/// default, so `[profile.release] flags = ["-O2"]` still builds into `obj_opt`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Profile {
    pub obj_dir: Option<String>,
    pub flags: Option<Vec<String>>,
}

impl Profile {
    pub fn obj_dir_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.obj_dir.as_deref().unwrap_or(default)
    }

    pub fn flags_or(&self, default: &[&str]) -> Vec<String> {
        match &self.flags {
            Some(flags) => flags.clone(),
            None => default.iter().map(|s| s.to_string()).collect(),
        }
    }
}
