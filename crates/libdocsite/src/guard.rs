//! Scoped guards: acquire a filesystem resource, hand control to a caller
//! region, and release the resource on every exit path.
//!
//! The guards are closure-based rather than `Drop`-based so that a failure
//! during release can propagate to the caller instead of being swallowed in
//! a destructor.

use std::{
    fs::{self, File},
    path::Path,
};

use tracing::{debug, error};

use crate::error::{DocsiteError, Result};

/// What to do when a guard is asked to create a file at a path that already
/// holds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClobberPolicy {
    /// Refuse with [`DocsiteError::BackupExists`]. The pre-existing file is
    /// left untouched.
    #[default]
    Fail,
    /// Truncate the pre-existing file and proceed. It will be deleted when
    /// the guard exits.
    Overwrite,
}

/// Combine the region result with the outcome of a cleanup action.
///
/// A cleanup failure supersedes an in-region error, but the in-region error
/// is logged first so it is never silently dropped.
fn reconcile<T>(result: Result<T>, cleanup: Result<()>) -> Result<T> {
    match cleanup {
        Ok(()) => result,
        Err(cleanup_err) => {
            if let Err(region_err) = &result {
                error!("guarded region failed before cleanup did: {region_err}");
            }
            Err(cleanup_err)
        }
    }
}

/// Keep an empty file alive at `path` for the duration of `region`, then
/// remove it.
///
/// The file is created before the region runs and deleted after it returns,
/// whether it returned `Ok` or `Err`. If creation fails the region never
/// runs. `policy` decides whether a pre-existing file at `path` is an error.
pub fn with_temp_file<T>(
    path: &Path,
    policy: ClobberPolicy,
    region: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if path.exists() && policy == ClobberPolicy::Fail {
        return Err(DocsiteError::BackupExists(path.to_path_buf()));
    }
    debug!("create temp file {}", path.display());
    File::create(path)?;

    let result = region();

    debug!("remove temp file {}", path.display());
    let cleanup = fs::remove_file(path).map_err(DocsiteError::from);
    reconcile(result, cleanup)
}

/// Snapshot `target` into `backup` for the duration of `region`, then
/// restore it.
///
/// The region is free to modify, replace or delete `target`; on exit the
/// snapshot is copied back over `target` and only then is `backup` deleted.
/// Restore and deletion both happen even when the region fails. If the
/// entry copy fails the region and the restore are skipped, but `backup` is
/// still removed.
pub fn with_backup<T>(
    target: &Path,
    backup: &Path,
    policy: ClobberPolicy,
    region: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if !target.exists() {
        return Err(DocsiteError::MissingFile(target.to_path_buf()));
    }
    with_temp_file(backup, policy, || {
        debug!("copy {} to backup {}", target.display(), backup.display());
        fs::copy(target, backup)?;

        let result = region();

        debug!("recover {} from backup {}", target.display(), backup.display());
        let restore = fs::copy(backup, target)
            .map(|_| ())
            .map_err(DocsiteError::from);
        reconcile(result, restore)
    })
}

/// A single-slot process-wide resource with a current value that can be
/// read and replaced.
///
/// Implementations exist so [`with_slot`] can temporarily swap the value
/// and guarantee restoration; the working directory is the canonical case.
pub trait Slot {
    /// The value held by the slot.
    type Value;

    /// Read the slot's current value.
    fn get(&self) -> Result<Self::Value>;

    /// Replace the slot's value.
    fn set(&self, value: &Self::Value) -> Result<()>;
}

/// The process working directory as a [`Slot`].
///
/// Swapping it is process-global state; only meaningful in a
/// single-threaded invocation.
pub struct CurrentDir;

impl Slot for CurrentDir {
    type Value = std::path::PathBuf;

    fn get(&self) -> Result<Self::Value> {
        Ok(std::env::current_dir()?)
    }

    fn set(&self, value: &Self::Value) -> Result<()> {
        debug!("current dir: {}", value.display());
        Ok(std::env::set_current_dir(value)?)
    }
}

/// Set `slot` to `value` for the duration of `region`, then restore the
/// value it held at entry.
///
/// Restoration runs whether the region returned `Ok` or `Err`. If reading
/// or setting the slot at entry fails the region never runs.
pub fn with_slot<S: Slot, T>(
    slot: &S,
    value: &S::Value,
    region: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let saved = slot.get()?;
    slot.set(value)?;

    let result = region();

    let restore = slot.set(&saved);
    reconcile(result, restore)
}
