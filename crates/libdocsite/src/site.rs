//! Site build orchestration.

use std::{fs, path::PathBuf};

use tracing::info;

use crate::{
    command::{CommandLine, CommandRunner},
    error::{DocsiteError, Result},
    guard::{self, ClobberPolicy},
};

/// Docsite builds a project documentation site in two steps: the site pages
/// (rendered by an external static-site tool, with the repository README
/// staged as the index page) and the API reference (rendered by an external
/// compiler).
///
/// While the site pages build runs, the index file is replaced by the
/// README; a scoped backup guarantees the original index is back on disk
/// when the operation returns, whether it succeeded or failed.
#[derive(Debug, Clone)]
pub struct Docsite {
    /// Project root; all other paths are resolved relative to it and
    /// external commands run with it as their working directory.
    root: PathBuf,

    /// The README staged as the site index page.
    readme: PathBuf,

    /// The documentation index file that gets temporarily replaced.
    index: PathBuf,

    /// Scratch location for the index snapshot during a build.
    backup: PathBuf,

    /// Command that builds the site pages.
    site_command: CommandLine,

    /// Switch appended to the site command to empty the output first.
    clean_flag: String,

    /// Command that compiles the API reference.
    api_command: CommandLine,

    /// Policy when the backup path already holds a file.
    clobber: ClobberPolicy,
}

impl Default for Docsite {
    fn default() -> Self {
        Self::new()
    }
}

impl Docsite {
    /// Creates a Docsite with the conventional layout: `README.md` and
    /// `docs/index.md` under the current directory, `mkdocs build` for the
    /// site pages and `lein codox` for the API reference.
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
            readme: PathBuf::from("README.md"),
            index: PathBuf::from("docs").join("index.md"),
            backup: PathBuf::from("index.md_original"),
            site_command: CommandLine::new("mkdocs", ["build"]),
            clean_flag: "--clean".to_string(),
            api_command: CommandLine::new("lein", ["codox"]),
            clobber: ClobberPolicy::Fail,
        }
    }

    /// Sets the project root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the README path, relative to the root.
    pub fn with_readme(mut self, readme: impl Into<PathBuf>) -> Self {
        self.readme = readme.into();
        self
    }

    /// Sets the index page path, relative to the root.
    pub fn with_index(mut self, index: impl Into<PathBuf>) -> Self {
        self.index = index.into();
        self
    }

    /// Sets the backup path, relative to the root.
    pub fn with_backup(mut self, backup: impl Into<PathBuf>) -> Self {
        self.backup = backup.into();
        self
    }

    /// Sets the site pages build command.
    pub fn with_site_command(mut self, command: CommandLine) -> Self {
        self.site_command = command;
        self
    }

    /// Sets the API reference build command.
    pub fn with_api_command(mut self, command: CommandLine) -> Self {
        self.api_command = command;
        self
    }

    /// Sets the policy for a pre-existing backup file.
    pub fn with_clobber(mut self, clobber: ClobberPolicy) -> Self {
        self.clobber = clobber;
        self
    }

    /// Builds the site pages only.
    ///
    /// The README is staged as the index page for the duration of the
    /// external build, then the original index is restored. When `clean` is
    /// set the site tool is told to empty its output directory first.
    pub fn build_pages(&self, runner: &dyn CommandRunner, clean: bool) -> Result<()> {
        let readme = self.root.join(&self.readme);
        let index = self.root.join(&self.index);
        let backup = self.root.join(&self.backup);

        if !readme.exists() {
            return Err(DocsiteError::MissingFile(readme));
        }

        info!("building site pages");
        guard::with_backup(&index, &backup, self.clobber, || {
            fs::copy(&readme, &index)?;
            let cmd = if clean {
                self.site_command.with_arg(&self.clean_flag)
            } else {
                self.site_command.clone()
            };
            runner.run(&cmd, &self.root)
        })
    }

    /// Compiles the API reference into the site folder.
    pub fn build_api(&self, runner: &dyn CommandRunner) -> Result<()> {
        info!("building API reference");
        runner.run(&self.api_command, &self.root)
    }

    /// Builds the full project site.
    ///
    /// The site pages build, including restoration of the index page, must
    /// complete before the API reference build starts; a pages failure
    /// aborts the invocation and the API step is not attempted.
    pub fn build_site(&self, runner: &dyn CommandRunner) -> Result<()> {
        self.build_pages(runner, true)?;
        self.build_api(runner)
    }
}
