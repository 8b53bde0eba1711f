//! Filesystem primitives used by propagation.
//!
//! Every write goes through `fill_gap`, which opens the destination with
//! `create_new`: the existence check and the creation are one atomic step,
//! so concurrent workers racing for the same missing file produce exactly
//! one copy and never overwrite an existing artifact.
use super::PropagationError;
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::Path;

/// Copy `src` to `dest` unless `dest` already exists.
///
/// Returns `Ok(false)` when the destination was already present.
pub fn fill_gap(src: &Path, dest: &Path) -> Result<bool, PropagationError> {
    let copy_err = |source| PropagationError::Copy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };
    let mut input = File::open(src).map_err(copy_err)?;
    let mut output = match OpenOptions::new().write(true).create_new(true).open(dest) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(copy_err(err)),
    };
    if let Err(err) = io::copy(&mut input, &mut output) {
        drop(output);
        // Leave no truncated artifact behind; a later run can retry.
        let _ = fs::remove_file(dest);
        return Err(copy_err(err));
    }
    debug!("copied {} to {}", src.display(), dest.display());
    Ok(true)
}

/// Outcome of a quarantine attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quarantine {
    Moved,
    AlreadyThere,
}

/// Move `src` into `dir` under its own file name, unless that name is taken.
///
/// The destination is claimed with a hard link (or a `create_new` copy where
/// the filesystem has no hard links), so an entry that appears concurrently
/// is never replaced. The source is removed only once the claim succeeded.
pub fn quarantine(src: &Path, dir: &Path) -> Result<Quarantine, PropagationError> {
    fs::create_dir_all(dir).map_err(|source| PropagationError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let dest = match src.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    };
    let move_err = |source| PropagationError::Move {
        from: src.to_path_buf(),
        to: dest.clone(),
        source,
    };

    let claimed = match fs::hard_link(src, &dest) {
        Ok(()) => true,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => false,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(move_err(err)),
        Err(err) => {
            debug!("hard link to {} failed ({err}), copying", dest.display());
            fill_gap(src, &dest)?
        }
    };
    if !claimed {
        debug!("{} already exists, not moved", dest.display());
        return Ok(Quarantine::AlreadyThere);
    }
    fs::remove_file(src).map_err(move_err)?;
    debug!("moved {} to {}", src.display(), dest.display());
    Ok(Quarantine::Moved)
}

pub fn delete(path: &Path) -> Result<(), PropagationError> {
    fs::remove_file(path).map_err(|source| PropagationError::Delete {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("deleted {}", path.display());
    Ok(())
}
