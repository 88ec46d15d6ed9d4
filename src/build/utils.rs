use crate::config::{CONFIG_FILE, KilnConfig};
use crate::error::BuildError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::process::Command;

// --- Helper: Load Config (optional kiln.toml) ---
pub fn load_config(root: &Path) -> Result<KilnConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(KilnConfig::default());
    }

    let config_str = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;

    let config: KilnConfig = toml::from_str(&config_str).map_err(|e| {
        BuildError::Config(format!(
            "{} is invalid (check quotes, brackets and value types): {}",
            CONFIG_FILE, e
        ))
    })?;

    Ok(config)
}

/// Flags reported by a flag-discovery helper such as `sdl2-config`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HelperFlags {
    pub cflags: Vec<String>,
    pub libs: Vec<String>,
}

// --- Helper: Query a flag-discovery helper once for --cflags and --libs ---
pub fn discover_flags(helper: &str) -> Result<HelperFlags, BuildError> {
    Ok(HelperFlags {
        cflags: query_helper(helper, "--cflags")?,
        libs: query_helper(helper, "--libs")?,
    })
}

fn query_helper(helper: &str, query: &str) -> Result<Vec<String>, BuildError> {
    let mut words = helper.split_whitespace();
    let Some(program) = words.next() else {
        return Err(BuildError::Config("empty flag helper command".into()));
    };

    let output = Command::new(program)
        .args(words)
        .arg(query)
        .output()
        .map_err(|e| {
            BuildError::Config(format!(
                "flag helper `{}` could not be run: {}",
                helper, e
            ))
        })?;

    if !output.status.success() {
        return Err(BuildError::Config(format!(
            "`{} {}` failed ({}): {}",
            helper,
            query,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_file_is_default() {
        let dir = tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.project.compiler, "gcc");
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[project]\nname = \"miner\"\ncompiler = \"cc\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.project.name.as_deref(), Some("miner"));
        assert_eq!(config.project.compiler, "cc");
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[build\njobs = 1\n").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::Config(_))
        ));
    }

    #[test]
    fn test_missing_helper_is_fatal() {
        let err = discover_flags("kiln-no-such-helper-xyz").unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
        assert!(err.to_string().contains("kiln-no-such-helper-xyz"));
    }

    #[test]
    fn test_empty_helper_is_fatal() {
        assert!(discover_flags("   ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_output_is_split_into_flags() {
        // echo prints its arguments back, query word included.
        let flags = discover_flags("echo -I/usr/include/SDL2 -D_REENTRANT").unwrap();
        assert_eq!(
            flags.cflags,
            vec!["-I/usr/include/SDL2", "-D_REENTRANT", "--cflags"]
        );
        assert_eq!(flags.libs.last().map(String::as_str), Some("--libs"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_helper_is_fatal() {
        assert!(matches!(discover_flags("false"), Err(BuildError::Config(_))));
    }
}
