/*!
 * Core Types
 * Common types used across the shim
 */

/// Process ID type
pub use nix::unistd::Pid;

/// Descriptor number as the kernel sees it
pub use std::os::fd::RawFd;

/// Common result type for shim operations
pub type ShimResult<T> = Result<T, super::errors::ShimError>;
