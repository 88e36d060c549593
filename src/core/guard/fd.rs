/*!
 * File Descriptor Guards
 *
 * RAII guards for descriptors handed out by the kernel, closed on drop
 */

use super::{GuardError, GuardMetadata, GuardResult};
use crate::core::types::Pid;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, IntoRawFd, OwnedFd, RawFd};
use tracing::{debug, error};

/// Event names emitted over the lifetime of an [`FdGuard`]
#[derive(Debug, Clone, Copy)]
pub struct FdEvents {
    pub opened: &'static str,
    pub closed: &'static str,
    pub error: &'static str,
}

/// File descriptor guard with automatic close
///
/// # Example
///
/// ```rust,ignore
/// let guard = FdGuard::new(owned, GuardMetadata::new("fd").with_pid(pid), events);
/// let fd = guard.as_raw_fd();
/// // Use file descriptor
/// // Automatically closed on drop
/// ```
#[derive(Debug)]
pub struct FdGuard {
    fd: Option<OwnedFd>,
    raw: RawFd,
    metadata: GuardMetadata,
    events: FdEvents,
}

impl FdGuard {
    /// Take ownership of `fd`
    pub fn new(fd: OwnedFd, metadata: GuardMetadata, events: FdEvents) -> Self {
        let guard = Self {
            raw: fd.as_raw_fd(),
            fd: Some(fd),
            metadata,
            events,
        };

        guard.emit_acquired();
        guard
    }

    /// Descriptor number in this process
    ///
    /// Still returns the last value after release; check [`FdGuard::is_active`].
    #[inline]
    pub fn raw(&self) -> RawFd {
        self.raw
    }

    /// Borrow the descriptor, or `None` once released
    #[inline]
    pub fn try_borrow(&self) -> Option<BorrowedFd<'_>> {
        self.fd.as_ref().map(|fd| fd.as_fd())
    }

    /// Give up the guard and hand the descriptor to the caller
    ///
    /// Returns `AlreadyReleased` if the guard was closed earlier.
    pub fn into_owned(mut self) -> GuardResult<OwnedFd> {
        self.fd.take().ok_or(GuardError::AlreadyReleased)
    }

    /// Manually close the file descriptor early
    pub fn close_early(mut self) -> GuardResult<()> {
        self.release()
    }

    /// Kind of descriptor, e.g. `pidfd` or `remote_fd`
    #[inline]
    pub fn resource_type(&self) -> &'static str {
        self.metadata.resource_type
    }

    /// Creation time and owning pid
    #[inline]
    pub fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    /// False once the descriptor was closed or moved out
    #[inline]
    pub fn is_active(&self) -> bool {
        self.fd.is_some()
    }

    /// Close the descriptor now
    ///
    /// Returns `AlreadyReleased` on a second call and `Close` when the
    /// kernel rejects close(2).
    pub fn release(&mut self) -> GuardResult<()> {
        let fd = self.fd.take().ok_or(GuardError::AlreadyReleased)?;

        // OwnedFd swallows close(2) failures; go through nix to see them
        nix::unistd::close(fd.into_raw_fd()).map_err(GuardError::Close)?;

        self.emit_closed();
        Ok(())
    }

    /// Record an operation performed through the descriptor
    pub fn emit_used(&self, operation: &str) {
        debug!(
            event = "fd_operation",
            resource = self.metadata.resource_type,
            fd = self.raw,
            operation,
            "descriptor used"
        );
    }

    fn emit_acquired(&self) {
        debug!(
            event = self.events.opened,
            pid = self.metadata.pid.map(Pid::as_raw),
            fd = self.raw,
            "descriptor acquired"
        );
    }

    fn emit_closed(&self) {
        debug!(
            event = self.events.closed,
            pid = self.metadata.pid.map(Pid::as_raw),
            fd = self.raw,
            lifetime_micros = self.metadata.lifetime_micros(),
            "descriptor closed"
        );
    }

    fn emit_close_failed(&self, error: &GuardError) {
        error!(
            event = self.events.error,
            resource = self.metadata.resource_type,
            pid = self.metadata.pid.map(Pid::as_raw),
            fd = self.raw,
            error = %error,
            "descriptor close failed"
        );
    }
}

impl Drop for FdGuard {
    fn drop(&mut self) {
        if self.is_active() {
            if let Err(e) = self.release() {
                self.emit_close_failed(&e);
            }
        }
    }
}
