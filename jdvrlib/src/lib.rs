// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! # jdvrlib: core of the JDvrLib native bridge
//!
//! The Java DVR library records, timeshifts and plays back broadcast
//! transport streams. Native callers reach it through opaque handles; this
//! crate is everything between those handles and the VM:
//!
//! - **Handle registries**: one per entity kind, validating every handle a
//!   caller passes in ([`Registry`])
//! - **Facades**: [`Dvr`] with the File, Recorder and Player operations
//! - **Event dispatch**: matching Java event sources to native callbacks and
//!   handing over progress payloads ([`event`])
//! - **Configuration**: environment-driven logging setup ([`config`])
//!
//! The VM itself stays behind the [`Backend`] traits, implemented over JNI by
//! the `jdvrlib-jni` crate, so everything here can be exercised without one.
//!
//! ## Thread safety
//!
//! [`Dvr`] is `Send + Sync`. Calls may come from any native thread; the
//! registries are mutex-protected and no lock is held across a backend call
//! or a native callback.

pub mod backend;
pub mod config;
mod dvr;
mod error;
pub mod event;
mod file;
pub mod out;
mod player;
mod recorder;
mod registry;

pub use backend::{Backend, FileOps, FileSpec, PlayerOps, RecorderOps};
pub use config::Config;
pub use dvr::{Dvr, accepted};
pub use error::{Error, HandleKind, Result};
pub use file::DvrFile;
pub use player::{DvrPlayer, PlayerCallback};
pub use recorder::{DvrRecorder, RecorderCallback};
pub use registry::Registry;
