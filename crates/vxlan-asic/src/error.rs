//! ASIC status codes and error types.
//!
//! Providers report results as raw status codes in the style of a C driver
//! API; this module converts them into Rust's `Result` world.

use std::fmt;
use thiserror::Error;

/// Status codes reported by ASIC capability calls.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsicStatus {
    Success = 0,
    Failure = -1,
    NotSupported = -2,
    InvalidParameter = -3,
    ItemNotFound = -4,
    ItemAlreadyExists = -5,
    TableFull = -6,
    Uninitialized = -7,
}

impl AsicStatus {
    /// Creates a status from a raw i32 value.
    pub fn from_raw(status: i32) -> Self {
        match status {
            0 => AsicStatus::Success,
            -1 => AsicStatus::Failure,
            -2 => AsicStatus::NotSupported,
            -3 => AsicStatus::InvalidParameter,
            -4 => AsicStatus::ItemNotFound,
            -5 => AsicStatus::ItemAlreadyExists,
            -6 => AsicStatus::TableFull,
            -7 => AsicStatus::Uninitialized,
            _ => AsicStatus::Failure,
        }
    }

    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        *self == AsicStatus::Success
    }

    /// Returns true if the provider declined the operation as unsupported.
    pub fn is_not_supported(&self) -> bool {
        *self == AsicStatus::NotSupported
    }

    /// Converts to a Result, returning Ok(()) for success.
    pub fn into_result(self) -> AsicResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(AsicError::Status { status: self })
        }
    }
}

impl fmt::Display for AsicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AsicStatus::Success => "ASIC_STATUS_SUCCESS",
            AsicStatus::Failure => "ASIC_STATUS_FAILURE",
            AsicStatus::NotSupported => "ASIC_STATUS_NOT_SUPPORTED",
            AsicStatus::InvalidParameter => "ASIC_STATUS_INVALID_PARAMETER",
            AsicStatus::ItemNotFound => "ASIC_STATUS_ITEM_NOT_FOUND",
            AsicStatus::ItemAlreadyExists => "ASIC_STATUS_ITEM_ALREADY_EXISTS",
            AsicStatus::TableFull => "ASIC_STATUS_TABLE_FULL",
            AsicStatus::Uninitialized => "ASIC_STATUS_UNINITIALIZED",
        };
        write!(f, "{}", s)
    }
}

/// Error type for ASIC boundary operations.
#[derive(Debug, Clone, Error)]
pub enum AsicError {
    /// A capability call returned a non-success status.
    #[error("ASIC operation failed: {status}")]
    Status { status: AsicStatus },

    /// No registered provider matched the requested name/version.
    #[error("Provider '{name}' (v{major}.{minor}) not found")]
    ProviderNotFound {
        name: String,
        major: u32,
        minor: u32,
    },

    /// A provider with the same name and major version is already registered.
    #[error("Provider '{name}' (major {major}) already registered")]
    AlreadyRegistered { name: String, major: u32 },
}

impl AsicError {
    /// Creates a provider-not-found error.
    pub fn provider_not_found(name: impl Into<String>, major: u32, minor: u32) -> Self {
        AsicError::ProviderNotFound {
            name: name.into(),
            major,
            minor,
        }
    }

    /// Creates an already-registered error.
    pub fn already_registered(name: impl Into<String>, major: u32) -> Self {
        AsicError::AlreadyRegistered {
            name: name.into(),
            major,
        }
    }

    /// Returns the underlying status if this is a Status error.
    pub fn status(&self) -> Option<AsicStatus> {
        match self {
            AsicError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for ASIC boundary operations.
pub type AsicResult<T> = Result<T, AsicError>;
