//! Error types for the simulator.
//!
//! Translation outcomes such as an out-of-range address or a fault with no
//! free frame are ordinary values of [`TranslationResult`](crate::TranslationResult),
//! not errors. The types here cover configuration, I/O and budget exhaustion.

use std::process::ExitCode;
use thiserror::Error;

/// Invalid startup configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    #[error("page count must be greater than zero")]
    ZeroPageCount,

    #[error("frame count must be greater than zero")]
    ZeroFrameCount,

    #[error("page count {page_count} exceeds the limit of {limit}")]
    TooManyPages { page_count: usize, limit: usize },

    #[error("frame count {frame_count} exceeds the limit of {limit}")]
    TooManyFrames { frame_count: usize, limit: usize },

    #[error("max attempts must be greater than zero")]
    ZeroMaxAttempts,

    #[error("address space of {page_count} pages x {page_size} bytes does not fit in a logical address")]
    AddressSpaceOverflow { page_size: usize, page_count: usize },
}

/// Returned by [`AttemptBudget::submit`](crate::AttemptBudget::submit) once every attempt is spent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("attempt budget of {max_attempts} exhausted; reset to continue")]
pub struct Rejected {
    pub max_attempts: usize,
}

/// Top-level error for the command-line front-end
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::from(2),
            Self::Io(_) => ExitCode::from(3),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
