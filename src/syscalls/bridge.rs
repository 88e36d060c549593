/*!
 * Typed Syscall Bridge
 *
 * Same requests as the raw layer, with `Result` returns that carry the
 * kernel's errno unchanged.
 */

use super::raw;
use super::types::{SyscallError, SyscallOp, SyscallResult};
use libc::c_int;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::{debug, instrument};

/// Turn a raw return value into a result, reading `errno` on -1
#[inline]
pub(crate) fn check(op: SyscallOp, ret: c_int) -> SyscallResult<c_int> {
    if ret != -1 {
        return Ok(ret);
    }

    let err = SyscallError::last(op);
    debug!(%op, error = %err, "kernel rejected request");
    Err(err)
}

fn path_to_cstring(path: &Path) -> SyscallResult<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| SyscallError::InvalidPath(path.display().to_string()))
}

/// Switch the root mount of the calling process's mount namespace
///
/// `new_root` must be a mount point and `put_old` a directory at or
/// beneath it. The old root stays reachable under `put_old`; unmounting
/// it is up to the caller.
#[instrument(
    level = "debug",
    skip_all,
    fields(new_root = %new_root.as_ref().display(), put_old = %put_old.as_ref().display())
)]
pub fn pivot_root<P: AsRef<Path>, Q: AsRef<Path>>(new_root: P, put_old: Q) -> SyscallResult<()> {
    let new_root = path_to_cstring(new_root.as_ref())?;
    let put_old = path_to_cstring(put_old.as_ref())?;

    check(SyscallOp::PivotRoot, raw::pivot_root(&new_root, &put_old))?;
    debug!("root switched");
    Ok(())
}

/// Become the subreaper for orphaned descendants
///
/// Lasts for the lifetime of the process. There is no way to undo it here.
#[instrument(level = "debug")]
pub fn set_child_subreaper() -> SyscallResult<()> {
    check(SyscallOp::SetChildSubreaper, raw::set_child_subreaper())?;
    Ok(())
}

/// Whether the calling process is currently a subreaper
pub fn is_child_subreaper() -> SyscallResult<bool> {
    let mut flag: c_int = 0;
    check(SyscallOp::GetChildSubreaper, raw::get_child_subreaper(&mut flag))?;
    Ok(flag != 0)
}
