/*!
 * Raw Syscall Bridge
 *
 * C calling convention: the kernel's return value is handed back as is,
 * 0 or a descriptor on success, -1 with `errno` set on failure. Nothing
 * here validates, retries or translates.
 */

use super::numbers::{SYS_PIDFD_GETFD, SYS_PIDFD_OPEN, SYS_PIVOT_ROOT};
use libc::{c_int, c_uint, c_ulong, pid_t};
use std::ffi::CStr;

/// Move the root mount to `new_root`, parking the old root at `put_old`
pub fn pivot_root(new_root: &CStr, put_old: &CStr) -> c_int {
    // SAFETY: both pointers are NUL-terminated and borrowed for the whole call
    unsafe { libc::syscall(SYS_PIVOT_ROOT, new_root.as_ptr(), put_old.as_ptr()) as c_int }
}

/// Mark the calling process as a child subreaper
pub fn set_child_subreaper() -> c_int {
    // SAFETY: PR_SET_CHILD_SUBREAPER takes integer arguments only
    unsafe {
        libc::prctl(
            libc::PR_SET_CHILD_SUBREAPER,
            1 as c_ulong,
            0 as c_ulong,
            0 as c_ulong,
            0 as c_ulong,
        )
    }
}

/// Store the calling process's subreaper flag into `out`
pub fn get_child_subreaper(out: &mut c_int) -> c_int {
    // SAFETY: the kernel writes one int through a pointer we hold exclusively
    unsafe {
        libc::prctl(
            libc::PR_GET_CHILD_SUBREAPER,
            out as *mut c_int,
            0 as c_ulong,
            0 as c_ulong,
            0 as c_ulong,
        )
    }
}

/// Obtain a pidfd for `pid`
///
/// The returned descriptor belongs to the caller.
pub fn pidfd_open(pid: pid_t, flags: c_uint) -> c_int {
    // SAFETY: integer-only arguments
    unsafe { libc::syscall(SYS_PIDFD_OPEN, pid, flags) as c_int }
}

/// Duplicate `targetfd` out of the process behind `pidfd`
///
/// The returned descriptor belongs to the caller. `flags` must be 0.
pub fn pidfd_getfd(pidfd: c_int, targetfd: c_int, flags: c_uint) -> c_int {
    // SAFETY: integer-only arguments
    unsafe { libc::syscall(SYS_PIDFD_GETFD, pidfd, targetfd, flags) as c_int }
}
