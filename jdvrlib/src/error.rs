// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for bridge operations.
//!
//! The C ABI only knows two results, so every variant collapses to
//! `JDVRLIB_JNI_ERR` at the boundary. The variants exist for the logs.

use std::fmt;

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// The three kinds of handle the bridge hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    File,
    Recorder,
    Player,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandleKind::File => "file",
            HandleKind::Recorder => "recorder",
            HandleKind::Player => "player",
        })
    }
}

/// Errors that can occur while serving a bridge call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The handle is not (or no longer) present in its registry.
    #[error("given {kind} handle {addr:#x} is invalid")]
    InvalidHandle { kind: HandleKind, addr: usize },

    /// A pointer argument that must not be null was null.
    #[error("given {0} pointer is null")]
    NullPointer(&'static str),

    /// A create call was made without an event callback.
    #[error("given callback is null")]
    NullCallback,

    /// A call arrived before the bridge was initialized.
    #[error("bridge is not initialized")]
    NotInitialized,

    /// No JNI environment could be obtained for the calling thread.
    #[error("failed to get JNIEnv: {0}")]
    EnvUnavailable(String),

    /// The Java side threw or a JNI call failed.
    #[error("java call {call} failed: {reason}")]
    Java { call: &'static str, reason: String },

    /// The Java method ran and reported failure.
    #[error("java call {0} returned false")]
    Rejected(&'static str),

    /// The wrapper's Java object was never constructed.
    #[error("underlying java object is null")]
    Unbound,

    /// An event arrived for a Java object that no wrapper owns.
    #[error("event source is not a registered {0}")]
    UnknownSource(HandleKind),

    /// A string argument was not valid UTF-8 or contained a NUL byte.
    #[error("invalid string argument: {0}")]
    InvalidString(String),
}

impl Error {
    /// Builds a [`Error::Java`] for the named call.
    pub fn java(call: &'static str, reason: impl fmt::Display) -> Self {
        Error::Java {
            call,
            reason: reason.to_string(),
        }
    }

    /// Maps a result onto the two-valued C result code.
    ///
    /// Errors are logged here, since the code itself carries no detail.
    pub fn code(result: Result<()>, call: &str) -> jdvrlib_sys::DvrResult {
        match result {
            Ok(()) => jdvrlib_sys::JDVRLIB_JNI_OK,
            Err(err) => {
                tracing::error!("{call}, {err}");
                jdvrlib_sys::JDVRLIB_JNI_ERR
            }
        }
    }
}
