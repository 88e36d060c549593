/*!
 * vminit Syscall Shim
 *
 * Direct syscall access for a container init running as PID 1 inside a
 * lightweight VM: pivot_root, child-subreaper registration, and
 * pidfd_open/pidfd_getfd, which musl does not wrap.
 */

#[cfg(not(target_os = "linux"))]
compile_error!("vminit-shim talks to Linux-only syscalls");

pub mod config;
pub mod core;
pub mod monitoring;
pub mod syscalls;

// Re-exports
pub use crate::config::TracingConfig;
pub use crate::core::errors::{GuardError, ShimError, SyscallError};
pub use crate::core::types::{Pid, RawFd, ShimResult};
pub use monitoring::init_tracing;
pub use syscalls::{
    is_child_subreaper, pidfd_getfd, pivot_root, set_child_subreaper, PidFd, PidFdFlags, RemoteFd,
    SyscallOp, SyscallResult,
};
