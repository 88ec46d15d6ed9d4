//! Typed compiler and linker invocations.
//!
//! A [`ToolCommand`] keeps each group of arguments in its own field and is
//! validated before it is flattened, so a malformed invocation is rejected
//! before anything is spawned.
//!
//! Flattened order:
//!
//! ```text
//! compile: <program> <source> <includes..> <extra..> -c -o <object>
//! link:    <program> <objects..> <libraries..> <extra..> -o <output>
//! ```

use crate::error::BuildError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Compile,
    Link,
}

#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    action: Action,
    inputs: Vec<PathBuf>,
    includes: Vec<String>,
    libraries: Vec<String>,
    extra: Vec<String>,
    output: PathBuf,
}

impl ToolCommand {
    pub fn compile(program: &str, source: &Path, object: &Path) -> Self {
        Self {
            program: program.to_string(),
            action: Action::Compile,
            inputs: vec![source.to_path_buf()],
            includes: Vec::new(),
            libraries: Vec::new(),
            extra: Vec::new(),
            output: object.to_path_buf(),
        }
    }

    pub fn link(program: &str, objects: Vec<PathBuf>, output: &Path) -> Self {
        Self {
            program: program.to_string(),
            action: Action::Link,
            inputs: objects,
            includes: Vec::new(),
            libraries: Vec::new(),
            extra: Vec::new(),
            output: output.to_path_buf(),
        }
    }

    pub fn includes<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn libraries<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libraries.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn extra<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.program.trim().is_empty() {
            return Err(BuildError::InvalidCommand("no compiler configured".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(BuildError::InvalidCommand(format!(
                "`{}` has no output path",
                self.program
            )));
        }
        // A link with zero objects is allowed; the linker reports it.
        if self.action == Action::Compile && self.inputs.len() != 1 {
            return Err(BuildError::InvalidCommand(format!(
                "a compile takes exactly one source, got {}",
                self.inputs.len()
            )));
        }
        let groups = [&self.includes, &self.libraries, &self.extra];
        if let Some(bad) = groups
            .iter()
            .flat_map(|g| g.iter())
            .find(|f| f.trim().is_empty())
        {
            return Err(BuildError::InvalidCommand(format!(
                "empty flag {:?} for `{}`",
                bad, self.program
            )));
        }
        Ok(())
    }

    /// Arguments after the program name.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(
            self.inputs.len() + self.includes.len() + self.libraries.len() + self.extra.len() + 3,
        );
        args.extend(self.inputs.iter().map(|p| p.as_os_str().to_owned()));
        args.extend(self.includes.iter().map(OsString::from));
        args.extend(self.libraries.iter().map(OsString::from));
        args.extend(self.extra.iter().map(OsString::from));
        if self.action == Action::Compile {
            args.push("-c".into());
        }
        args.push("-o".into());
        args.push(self.output.as_os_str().to_owned());
        args
    }

    /// The configured program may carry leading words, e.g. `ccache gcc` or
    /// `zig cc`; the first word is executed and the rest come before
    /// [`ToolCommand::args`].
    pub fn to_command(&self) -> Result<Command, BuildError> {
        self.validate()?;
        let mut words = self.program.split_whitespace();
        let Some(executable) = words.next() else {
            return Err(BuildError::InvalidCommand("no compiler configured".into()));
        };
        let mut cmd = Command::new(executable);
        cmd.args(words).args(self.args());
        Ok(cmd)
    }

    /// Shell-like rendering for progress output.
    pub fn display(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args().iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_argument_order() {
        let cmd = ToolCommand::compile("gcc", Path::new("src/main.c"), Path::new("obj/main.o"))
            .includes(["-Iinclude", "-I/usr/include/SDL2"])
            .extra(["-Wall", "-g"]);

        assert_eq!(
            cmd.display(),
            "gcc src/main.c -Iinclude -I/usr/include/SDL2 -Wall -g -c -o obj/main.o"
        );
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_link_argument_order() {
        let cmd = ToolCommand::link(
            "gcc",
            vec![PathBuf::from("obj/a.o"), PathBuf::from("obj/b.o")],
            Path::new("game"),
        )
        .libraries(["-lSDL2", "-lm"])
        .extra(["-g"]);

        assert_eq!(cmd.display(), "gcc obj/a.o obj/b.o -lSDL2 -lm -g -o game");
        assert_eq!(cmd.action, Action::Link);
        assert_eq!(cmd.inputs.len(), 2);
    }

    #[test]
    fn test_link_without_objects_is_valid() {
        let cmd = ToolCommand::link("gcc", Vec::new(), Path::new("game"));
        assert!(cmd.validate().is_ok());
        assert_eq!(cmd.display(), "gcc -o game");
    }

    #[test]
    fn test_rejects_empty_program() {
        let cmd = ToolCommand::compile("  ", Path::new("a.c"), Path::new("a.o"));
        assert!(matches!(cmd.validate(), Err(BuildError::InvalidCommand(_))));
        assert!(cmd.to_command().is_err());
    }

    #[test]
    fn test_rejects_empty_flag() {
        let cmd = ToolCommand::compile("gcc", Path::new("a.c"), Path::new("a.o")).extra(["-g", ""]);
        let err = cmd.validate().unwrap_err();
        assert!(err.to_string().contains("empty flag"));
    }

    #[test]
    fn test_launcher_words_precede_arguments() {
        let cmd = ToolCommand::compile("ccache gcc", Path::new("a.c"), Path::new("a.o"));
        let std_cmd = cmd.to_command().unwrap();
        assert_eq!(std_cmd.get_program(), "ccache");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, ["gcc", "a.c", "-c", "-o", "a.o"]);
    }

    #[test]
    fn test_rejects_empty_output() {
        let cmd = ToolCommand::link("gcc", Vec::new(), Path::new(""));
        assert!(cmd.validate().is_err());
    }
}
