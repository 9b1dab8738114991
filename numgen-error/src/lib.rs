// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the numgen publish/notify engine
//!
//! Every fallible numgen operation returns [`Result`], whose error side is the
//! single root [`NumGenError`]. The variants split into usage faults (a caller
//! passed something the engine cannot accept) and internal faults (a subscriber
//! broke the attach/detach discipline).
//!
//! # Examples
//!
//! ```
//! use numgen_error::{NumGenError, Result};
//!
//! fn check_bounds(lower: i32, upper: i32) -> Result<()> {
//!     if lower > upper {
//!         return Err(NumGenError::invalid_argument(format!(
//!             "lower bound {lower} exceeds upper bound {upper}"
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_bounds(10, 20).is_ok());
//! assert!(check_bounds(20, 10).unwrap_err().is_usage_fault());
//! ```

/// Root error type for all numgen operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumGenError {
    /// An argument was rejected before any state changed
    ///
    /// Raised for inverted range bounds on subscribers and value sources.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// The subscriber is already a member of the registry
    #[error("Subscriber is already registered")]
    DuplicateSubscriber,

    /// The subscriber is not a member of the registry
    #[error("Subscriber is not registered")]
    NotRegistered,

    /// An operation was attempted in a state that forbids it
    ///
    /// This indicates an internal-consistency fault: a subscriber detaching
    /// twice, a delivery re-entering a subscriber that is still handling the
    /// previous one, or a second `run` while one is in progress.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of the forbidden operation
        message: String,
    },

    /// Host configuration could not be read
    #[error("Invalid configuration: {context}")]
    Config {
        /// Details from the configuration parser
        context: String,
    },
}

impl NumGenError {
    /// Create an invalid argument error with the given message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid operation error with the given message
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create a configuration error with the given context
    pub fn config(context: impl Into<String>) -> Self {
        Self::Config {
            context: context.into(),
        }
    }

    /// Check if the caller is at fault
    ///
    /// Usage faults leave the engine state untouched.
    #[must_use]
    pub const fn is_usage_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::DuplicateSubscriber
                | Self::NotRegistered
                | Self::Config { .. }
        )
    }

    /// Check if this error reports a broken attach/detach discipline
    #[must_use]
    pub const fn is_internal_fault(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }
}

/// Specialized Result type for numgen operations
pub type Result<T> = std::result::Result<T, NumGenError>;
