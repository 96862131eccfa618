// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Capability interfaces over the wrapped Java library.
//!
//! One trait per entity kind plus a [`Backend`] factory. The JNI crate
//! implements them on top of global references; tests implement them in
//! memory. Everything above this module is independent of the VM.

use jdvrlib_sys::jobject;

use crate::Result;

/// How a recording file is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSpec {
    /// A normal recording. `trunc` clears existing content.
    Persistent { path_prefix: String, trunc: bool },
    /// A timeshift recording bounded by size (bytes) and length (seconds).
    Timeshift {
        path_prefix: String,
        limit_size: i64,
        limit_seconds: i32,
        trunc: bool,
    },
    /// An existing recording opened for playback.
    Existing { path_prefix: String },
}

impl FileSpec {
    pub fn path_prefix(&self) -> &str {
        match self {
            FileSpec::Persistent { path_prefix, .. }
            | FileSpec::Timeshift { path_prefix, .. }
            | FileSpec::Existing { path_prefix } => path_prefix,
        }
    }
}

/// Proxy for a `JDvrFile`.
///
/// `duration` and `size` return 0 when the Java object is missing; the other
/// accessors fail with [`crate::Error::Unbound`].
pub trait FileOps: Send + Sync + 'static {
    fn is_timeshift(&self) -> Result<bool>;
    fn duration(&self) -> Result<i64>;
    fn size(&self) -> Result<i64>;
    fn playing_time(&self) -> Result<i64>;
    fn start_time(&self) -> Result<i64>;
    fn segment_id_being_read(&self) -> Result<i32>;
    fn first_segment_id(&self) -> Result<i32>;
    fn last_segment_id(&self) -> Result<i32>;
    fn number_of_segments(&self) -> Result<i32>;
    fn video_pid(&self) -> Result<i32>;
    fn video_format(&self) -> Result<i32>;
    fn video_mime_type(&self) -> Result<String>;
    fn audio_pid(&self) -> Result<i32>;
    fn audio_format(&self) -> Result<i32>;
    fn audio_mime_type(&self) -> Result<String>;
    fn close(&self) -> Result<()>;
}

/// Proxy for a `JDvrRecorder`. Actions report the Java boolean.
pub trait RecorderOps: Send + Sync + 'static {
    fn add_stream(&self, pid: i32, stream_type: i32, format: i32) -> Result<bool>;
    fn remove_stream(&self, pid: i32) -> Result<bool>;
    fn start(&self) -> Result<bool>;
    fn pause(&self) -> Result<bool>;
    fn stop(&self) -> Result<bool>;
}

/// Proxy for a `JDvrPlayer`. Actions report the Java boolean.
pub trait PlayerOps: Send + Sync + 'static {
    fn play(&self) -> Result<bool>;
    fn pause(&self) -> Result<bool>;
    fn stop(&self) -> Result<bool>;
    fn seek(&self, seconds: i32) -> Result<bool>;
    fn set_speed(&self, speed: f64) -> Result<bool>;
}

/// Factory for the Java objects and the static `JDvrFile` helpers.
///
/// `tuner`, `asplayer` and `settings` are caller-owned JNI references that
/// are passed through untouched.
pub trait Backend: Send + Sync + 'static {
    type File: FileOps;
    type Recorder: RecorderOps;
    type Player: PlayerOps;

    fn create_file(&self, spec: &FileSpec) -> Result<Self::File>;

    fn create_recorder(
        &self,
        tuner: jobject,
        file: &Self::File,
        settings: jobject,
    ) -> Result<Self::Recorder>;

    fn create_player(
        &self,
        asplayer: jobject,
        file: &Self::File,
        settings: jobject,
    ) -> Result<Self::Player>;

    /// Removes every on-disk artifact of the recording at `path_prefix`.
    fn delete_record(&self, path_prefix: &str) -> Result<bool>;

    /// Duration in ms of the recording at `path_prefix`, without opening it.
    fn record_duration(&self, path_prefix: &str) -> Result<i64>;

    /// Size in bytes of the recording at `path_prefix`, without opening it.
    fn record_size(&self, path_prefix: &str) -> Result<i64>;
}
