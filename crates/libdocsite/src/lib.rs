//! Core library for the `docsite` documentation site builder.
//!
//! The site pages are rendered by an external static-site tool with the
//! repository README staged as the index page; the API reference is
//! rendered by an external compiler. The staging is protected by scoped
//! guards that restore the original files on every exit path.

mod command;
mod error;
pub mod guard;
mod site;

pub use crate::{
    command::{CommandLine, CommandRunner, ShellRunner},
    error::{DocsiteError, Result},
    guard::ClobberPolicy,
    site::Docsite,
};
