/*!
 * RAII Resource Guards
 *
 * Descriptor guards with automatic cleanup.
 *
 * Descriptors the kernel hands back (pidfds, duplicated remote
 * descriptors) are wrapped in a guard so every exit path closes them,
 * error paths included. Ownership can be moved out explicitly when the
 * caller needs to keep the descriptor past the guard.
 *
 * ## Example
 *
 * ```rust,ignore
 * let pidfd = PidFd::open(pid, PidFdFlags::empty())?;
 * let stdout = pidfd.get_fd(1)?;
 * // Use descriptor
 * // Both closed on drop
 * ```
 */

mod fd;

pub use fd::{FdEvents, FdGuard};

use crate::core::types::Pid;
use nix::errno::Errno;

/// Result type for guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur during guard operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum GuardError {
    #[error("Resource already released")]
    #[diagnostic(
        code(guard::already_released),
        help("The descriptor was closed or moved out of the guard earlier.")
    )]
    AlreadyReleased,

    #[error("close failed: {0}")]
    #[diagnostic(code(guard::close_failed))]
    Close(Errno),
}

/// Guard metadata for observability
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub creation_time: std::time::Instant,
    pub pid: Option<Pid>,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            creation_time: std::time::Instant::now(),
            pid: None,
        }
    }

    #[inline]
    pub fn with_pid(mut self, pid: Pid) -> Self {
        self.pid = Some(pid);
        self
    }

    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}
