/*!
 * Process File Descriptors
 *
 * Owned pidfds and descriptors duplicated out of other processes.
 * Both close on drop; `into_owned_fd` moves the descriptor out when the
 * caller needs to keep it.
 */

use super::bridge::check;
use super::numbers::PIDFD_NONBLOCK;
use super::raw;
use super::types::{SyscallOp, SyscallResult};
use crate::core::guard::{FdEvents, FdGuard, GuardMetadata, GuardResult};
use crate::core::types::{Pid, RawFd};
use libc::c_uint;
use std::ops::BitOr;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, OwnedFd};
use tracing::instrument;

const PIDFD_EVENTS: FdEvents = FdEvents {
    opened: "pidfd_opened",
    closed: "pidfd_closed",
    error: "pidfd_error",
};

const REMOTE_FD_EVENTS: FdEvents = FdEvents {
    opened: "remote_fd_acquired",
    closed: "remote_fd_closed",
    error: "remote_fd_error",
};

/// Flags accepted by `pidfd_open(2)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PidFdFlags(c_uint);

impl PidFdFlags {
    /// Poll/wait on the pidfd without blocking
    pub const NONBLOCK: Self = Self(PIDFD_NONBLOCK);

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Pass `bits` to the kernel unchanged, known or not
    #[inline]
    pub const fn from_bits_retain(bits: c_uint) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> c_uint {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PidFdFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Take ownership of a descriptor the kernel just returned
fn adopt(fd: RawFd) -> OwnedFd {
    // SAFETY: the kernel handed out `fd` to this call and nothing else owns it
    unsafe { OwnedFd::from_raw_fd(fd) }
}

/// Duplicate `targetfd` out of the process behind `pidfd`
///
/// `flags` is reserved by the kernel and must be 0; anything else is
/// passed through and rejected there.
#[instrument(level = "debug", skip_all, fields(pidfd = pidfd.as_raw_fd(), targetfd = targetfd, flags = flags))]
pub fn pidfd_getfd(pidfd: BorrowedFd<'_>, targetfd: RawFd, flags: c_uint) -> SyscallResult<OwnedFd> {
    let fd = check(
        SyscallOp::PidfdGetfd,
        raw::pidfd_getfd(pidfd.as_raw_fd(), targetfd, flags),
    )?;
    Ok(adopt(fd))
}

/// Owned handle on one specific process instance
///
/// Unlike a pid, a pidfd can't end up naming a different process after
/// the original exits and its pid is reused.
#[derive(Debug)]
pub struct PidFd {
    guard: FdGuard,
    pid: Pid,
}

impl PidFd {
    /// Open a pidfd for `pid`
    ///
    /// Fails with `ESRCH` when the process is gone, which can happen any
    /// time between learning the pid and this call.
    #[instrument(level = "debug", skip_all, fields(pid = pid.as_raw(), flags = flags.bits()))]
    pub fn open(pid: Pid, flags: PidFdFlags) -> SyscallResult<Self> {
        let fd = check(SyscallOp::PidfdOpen, raw::pidfd_open(pid.as_raw(), flags.bits()))?;
        Ok(Self::from_owned_fd(adopt(fd), pid))
    }

    /// Wrap a pidfd obtained elsewhere, e.g. from `clone3(CLONE_PIDFD)`
    pub fn from_owned_fd(fd: OwnedFd, pid: Pid) -> Self {
        let metadata = GuardMetadata::new("pidfd").with_pid(pid);
        Self {
            guard: FdGuard::new(fd, metadata, PIDFD_EVENTS),
            pid,
        }
    }

    /// Pid the descriptor was opened for
    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Guard metadata (creation time, owning pid)
    pub fn metadata(&self) -> &GuardMetadata {
        self.guard.metadata()
    }

    /// Duplicate descriptor `targetfd` of the target process into ours
    ///
    /// The copy is independent of the original: it stays valid after the
    /// target closes its descriptor or exits. `ESRCH` and `EBADF` mean the
    /// target raced us (see [`SyscallError::is_race`](super::SyscallError::is_race)).
    pub fn get_fd(&self, targetfd: RawFd) -> SyscallResult<RemoteFd> {
        self.guard.emit_used("pidfd_getfd");
        let fd = pidfd_getfd(self.as_fd(), targetfd, 0)?;
        Ok(RemoteFd::new(fd, self.pid, targetfd))
    }

    /// Close now and report a failing close(2)
    pub fn close(self) -> GuardResult<()> {
        self.guard.close_early()
    }

    /// Stop tracking the descriptor and hand it to the caller
    pub fn into_owned_fd(self) -> GuardResult<OwnedFd> {
        self.guard.into_owned()
    }
}

impl AsFd for PidFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        // SAFETY: the guard is only released by consuming `self`, so the
        // descriptor stays open for the lifetime of the borrow
        unsafe { BorrowedFd::borrow_raw(self.guard.raw()) }
    }
}

impl AsRawFd for PidFd {
    fn as_raw_fd(&self) -> RawFd {
        self.guard.raw()
    }
}

/// Descriptor duplicated out of another process
#[derive(Debug)]
pub struct RemoteFd {
    guard: FdGuard,
    source_pid: Pid,
    target_fd: RawFd,
}

impl RemoteFd {
    fn new(fd: OwnedFd, source_pid: Pid, target_fd: RawFd) -> Self {
        let metadata = GuardMetadata::new("remote_fd").with_pid(source_pid);
        Self {
            guard: FdGuard::new(fd, metadata, REMOTE_FD_EVENTS),
            source_pid,
            target_fd,
        }
    }

    /// Process the descriptor was copied from
    #[inline]
    pub fn source_pid(&self) -> Pid {
        self.source_pid
    }

    /// Descriptor number inside the source process
    #[inline]
    pub fn target_fd(&self) -> RawFd {
        self.target_fd
    }

    /// Guard metadata (creation time, source pid)
    pub fn metadata(&self) -> &GuardMetadata {
        self.guard.metadata()
    }

    /// Close now and report a failing close(2)
    pub fn close(self) -> GuardResult<()> {
        self.guard.close_early()
    }

    /// Stop tracking the descriptor and hand it to the caller
    pub fn into_owned_fd(self) -> GuardResult<OwnedFd> {
        self.guard.into_owned()
    }
}

impl AsFd for RemoteFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        // SAFETY: see `PidFd::as_fd`
        unsafe { BorrowedFd::borrow_raw(self.guard.raw()) }
    }
}

impl AsRawFd for RemoteFd {
    fn as_raw_fd(&self) -> RawFd {
        self.guard.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::unistd::{pipe, read, write};
    use serial_test::serial;

    /// pidfd_getfd needs Linux 5.6
    fn open_self() -> Option<PidFd> {
        match PidFd::open(Pid::this(), PidFdFlags::empty()) {
            Ok(pidfd) => Some(pidfd),
            Err(e) if e.is_unsupported() => None,
            Err(e) => panic!("pidfd_open on self failed: {e}"),
        }
    }

    #[test]
    fn test_flags() {
        assert_eq!(PidFdFlags::default(), PidFdFlags::empty());
        assert_eq!(PidFdFlags::empty().bits(), 0);
        assert!(PidFdFlags::NONBLOCK.contains(PidFdFlags::empty()));
        assert!(!PidFdFlags::empty().contains(PidFdFlags::NONBLOCK));
        assert_eq!(
            (PidFdFlags::empty() | PidFdFlags::NONBLOCK).bits(),
            libc::O_NONBLOCK as c_uint
        );
    }

    #[test]
    #[serial]
    fn test_open_self() {
        let Some(pidfd) = open_self() else { return };
        assert_eq!(pidfd.pid(), Pid::this());
        assert!(pidfd.as_raw_fd() >= 0);
        assert_eq!(pidfd.metadata().pid, Some(Pid::this()));
        pidfd.close().unwrap();
    }

    #[test]
    #[serial]
    fn test_get_fd_from_self_shares_pipe() {
        let Some(pidfd) = open_self() else { return };
        let (read_end, write_end) = pipe().unwrap();

        let remote = match pidfd.get_fd(write_end.as_raw_fd()) {
            Ok(remote) => remote,
            Err(e) if e.is_unsupported() => return,
            Err(e) => panic!("pidfd_getfd on self failed: {e}"),
        };
        assert_eq!(remote.source_pid(), Pid::this());
        assert_eq!(remote.target_fd(), write_end.as_raw_fd());
        assert_ne!(remote.as_raw_fd(), write_end.as_raw_fd());

        // The duplicate outlives the original
        drop(write_end);
        write(&remote, b"dup").unwrap();

        let mut buf = [0u8; 3];
        read(read_end.as_raw_fd(), &mut buf).unwrap();
        assert_eq!(&buf, b"dup");
    }

    #[test]
    #[serial]
    fn test_get_fd_with_unknown_target_fails() {
        let Some(pidfd) = open_self() else { return };

        let err = pidfd.get_fd(-1).unwrap_err();
        if err.is_unsupported() {
            return;
        }
        assert_eq!(err.op(), Some(SyscallOp::PidfdGetfd));
        assert!(err.is_race());
    }

    #[test]
    #[serial]
    fn test_nonzero_getfd_flags_rejected() {
        let Some(pidfd) = open_self() else { return };

        let err = pidfd_getfd(pidfd.as_fd(), 0, 1).unwrap_err();
        assert!(matches!(
            err.errno(),
            Some(nix::errno::Errno::EINVAL | nix::errno::Errno::ENOSYS)
        ));
    }

    #[test]
    #[serial]
    fn test_into_owned_fd_keeps_descriptor() {
        let Some(pidfd) = open_self() else { return };
        let raw = pidfd.as_raw_fd();

        let owned = pidfd.into_owned_fd().unwrap();
        assert_eq!(owned.as_raw_fd(), raw);
    }
}
