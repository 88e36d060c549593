/*!
 * Syscall Types Module
 * Operation names and error types
 */

mod errors;
mod syscall;

// Re-export all public types
pub use errors::SyscallError;
pub use syscall::SyscallOp;

/// Result type for bridge operations
pub type SyscallResult<T> = Result<T, SyscallError>;
