/*!
 * Syscall Numbers
 *
 * musl ships no wrappers for the pidfd calls, and older libc headers
 * don't define their numbers. Both sit in the unified table every
 * architecture shares since Linux 5.1, so one value fits all targets.
 */

use libc::{c_long, c_uint};

/// `pidfd_open(2)`, Linux 5.3
pub const SYS_PIDFD_OPEN: c_long = 434;

/// `pidfd_getfd(2)`, Linux 5.6
pub const SYS_PIDFD_GETFD: c_long = 438;

/// `pivot_root(2)` differs per architecture; libc has it everywhere
pub const SYS_PIVOT_ROOT: c_long = libc::SYS_pivot_root;

/// Open the pidfd in non-blocking mode (Linux 5.10)
pub const PIDFD_NONBLOCK: c_uint = libc::O_NONBLOCK as c_uint;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_numbers() {
        assert_eq!(SYS_PIDFD_OPEN, 434);
        assert_eq!(SYS_PIDFD_GETFD, 438);
    }

    #[test]
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    fn test_fallback_numbers_match_libc() {
        assert_eq!(SYS_PIDFD_OPEN, libc::SYS_pidfd_open);
        assert_eq!(SYS_PIDFD_GETFD, libc::SYS_pidfd_getfd);
    }
}
