use error_stack::ResultExt;
use kernel::KernelError;

use crate::error::ConvertError;

pub mod clock;
pub mod config;
pub mod database;
pub mod error;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .convert_error()
        .attach_printable_lazy(|| format!("Failed to read env var {key}"))
}

/// Unset variables fall back to `default`; any other read failure is an error.
pub(crate) fn env_or(key: &str, default: &str) -> error_stack::Result<String, KernelError> {
    match dotenvy::var(key) {
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default.to_string()),
        other => other
            .convert_error()
            .attach_printable_lazy(|| format!("Failed to read env var {key}")),
    }
}
