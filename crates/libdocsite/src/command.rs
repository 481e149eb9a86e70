//! External command execution.
//!
//! The site builder only needs "run this program, fail loudly on non-zero
//! exit"; [`CommandRunner`] is the seam, [`ShellRunner`] the real
//! implementation.

use std::{fmt, path::Path, process::Command};

use crate::error::{DocsiteError, Result};

/// A program name plus its arguments, with no shell involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Build a command line from a program and its arguments.
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a shell-style string into a command line.
    ///
    /// Quoting follows POSIX shell word-splitting rules via `shell-words`.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = shell_words::split(line)?.into_iter();
        let program = words.next().ok_or(DocsiteError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Return a copy with `arg` appended.
    pub fn with_arg(&self, arg: impl Into<String>) -> Self {
        let mut out = self.clone();
        out.args.push(arg.into());
        out
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        write!(f, "{}", shell_words::join(words))
    }
}

/// Executes a command synchronously and surfaces failure as an error.
pub trait CommandRunner {
    /// Run `cmd` with `cwd` as its working directory, blocking until it
    /// exits. Non-zero exit is an error.
    fn run(&self, cmd: &CommandLine, cwd: &Path) -> Result<()>;
}

/// The real runner: resolves the program on PATH and spawns it.
pub struct ShellRunner {
    echo: bool,
}

impl ShellRunner {
    /// Create a runner. When `echo` is set the exact command line is
    /// printed to stdout as `+ <command>` before each execution.
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, cmd: &CommandLine, cwd: &Path) -> Result<()> {
        let program = which::which(cmd.program())
            .map_err(|_| DocsiteError::CommandNotFound(cmd.program().to_string()))?;

        if self.echo {
            println!("+ {cmd}");
        }

        let status = Command::new(program).args(cmd.args()).current_dir(cwd).status()?;
        if !status.success() {
            return Err(DocsiteError::CommandFailed {
                command: cmd.to_string(),
                status,
            });
        }
        Ok(())
    }
}
