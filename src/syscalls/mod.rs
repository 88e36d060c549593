/*!
 * Syscalls Module
 *
 * Kernel requests the container init needs but musl does not wrap:
 * pivot_root, child-subreaper registration, pidfd_open and pidfd_getfd.
 * `raw` keeps the C convention (-1 plus errno); the rest returns
 * `Result` with owned descriptors.
 */

mod bridge;
pub mod numbers;
mod pidfd;
pub mod raw;
mod types;

// Re-export public API
pub use bridge::{is_child_subreaper, pivot_root, set_child_subreaper};
pub use pidfd::{pidfd_getfd, PidFd, PidFdFlags, RemoteFd};
pub use types::{SyscallError, SyscallOp, SyscallResult};
