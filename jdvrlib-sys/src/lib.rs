// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! # jdvrlib-sys: Raw C ABI of the JDvrLib native bridge
//!
//! This crate defines the plain C types that cross the boundary between
//! native callers and the bridge: opaque handles, result codes, event codes,
//! progress payload structs, init parameter structs and callback typedefs.
//! The layouts match `include/JDvrLibJNI.h`, which native callers compile
//! against.
//!
//! ## Usage
//!
//! **Most users should NOT use this crate directly.** The safe `jdvrlib`
//! crate wraps these types with handle validation and ownership rules.
//!
//! ## Safety
//!
//! Everything here is plain data. The invariants live with the users:
//! - Handles are only meaningful while registered with the bridge
//! - `jobject` fields must be valid JNI references for the calling thread
//! - Progress payloads passed to callbacks are owned by the receiver

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(clippy::missing_safety_doc)]

use std::os::raw::{c_int, c_void};

pub use jni_sys::{JNIEnv, jobject};

/// Function result.
pub type DvrResult = c_int;
pub const JDVRLIB_JNI_OK: DvrResult = 0;
pub const JDVRLIB_JNI_ERR: DvrResult = -1;

/// Recording file handle.
pub type FileHandle = *mut c_void;
/// Recorder handle.
pub type RecorderHandle = *mut c_void;
/// Player handle.
pub type PlayerHandle = *mut c_void;

/// Elementary stream type.
pub type StreamType = c_int;
pub const AM_DVR_STREAM_TYPE_VIDEO: StreamType = 0;
pub const AM_DVR_STREAM_TYPE_AUDIO: StreamType = 1;
pub const AM_DVR_STREAM_TYPE_AD: StreamType = 2;
pub const AM_DVR_STREAM_TYPE_SUBTITLE: StreamType = 3;
pub const AM_DVR_STREAM_TYPE_TELETEXT: StreamType = 4;
pub const AM_DVR_STREAM_TYPE_ECM: StreamType = 5;
pub const AM_DVR_STREAM_TYPE_EMM: StreamType = 6;
pub const AM_DVR_STREAM_TYPE_OTHER: StreamType = 7;

/// Recorder event code.
pub type RecorderEvent = c_int;
pub const AM_DVR_RECORDER_EVENT_PROGRESS: RecorderEvent = 2001;
pub const AM_DVR_RECORDER_EVENT_INITIAL_STATE: RecorderEvent = 3001;
pub const AM_DVR_RECORDER_EVENT_STARTING_STATE: RecorderEvent = 3002;
pub const AM_DVR_RECORDER_EVENT_STARTED_STATE: RecorderEvent = 3003;
pub const AM_DVR_RECORDER_EVENT_PAUSED_STATE: RecorderEvent = 3004;
pub const AM_DVR_RECORDER_EVENT_STOPPING_STATE: RecorderEvent = 3005;
pub const AM_DVR_RECORDER_EVENT_NO_DATA_ERROR: RecorderEvent = 4001;
pub const AM_DVR_RECORDER_EVENT_IO_ERROR: RecorderEvent = 4002;
pub const AM_DVR_RECORDER_EVENT_DISK_FULL_ERROR: RecorderEvent = 4003;

/// Player event code.
pub type PlayerEvent = c_int;
pub const AM_DVR_PLAYER_EVENT_PROGRESS: PlayerEvent = 2001;
pub const AM_DVR_PLAYER_EVENT_EOS: PlayerEvent = 2002;
pub const AM_DVR_PLAYER_EVENT_EDGE_LEAVING: PlayerEvent = 2003;
pub const AM_DVR_PLAYER_EVENT_INITIAL_STATE: PlayerEvent = 3001;
pub const AM_DVR_PLAYER_EVENT_STARTING_STATE: PlayerEvent = 3002;
pub const AM_DVR_PLAYER_EVENT_SMOOTH_PLAYING_STATE: PlayerEvent = 3003;
pub const AM_DVR_PLAYER_EVENT_SKIPPING_PLAYING_STATE: PlayerEvent = 3004;
pub const AM_DVR_PLAYER_EVENT_PAUSED_STATE: PlayerEvent = 3005;
pub const AM_DVR_PLAYER_EVENT_STOPPING_STATE: PlayerEvent = 3006;

pub type OnRecorderEventCallback =
    Option<unsafe extern "C" fn(handle: RecorderHandle, event: RecorderEvent, data: *mut c_void)>;
pub type OnPlayerEventCallback =
    Option<unsafe extern "C" fn(handle: PlayerHandle, event: PlayerEvent, data: *mut c_void)>;

/// Recording progress, delivered with `AM_DVR_RECORDER_EVENT_PROGRESS`.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RecordingProgress {
    /// in ms
    pub duration: i64,
    /// in ms
    pub startTime: i64,
    /// in ms
    pub endTime: i64,
    pub numberOfSegments: i32,
    pub firstSegmentId: i32,
    pub lastSegmentId: i32,
    /// in bytes
    pub size: i64,
}

/// Playback progress, delivered with `AM_DVR_PLAYER_EVENT_PROGRESS`.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PlaybackProgress {
    pub sessionNumber: i32,
    pub state: i32,
    pub speed: f64,
    /// in ms, from origin
    pub currTime: i64,
    /// in ms, from origin
    pub startTime: i64,
    /// in ms, from origin
    pub endTime: i64,
    /// in ms
    pub duration: i64,
    pub currSegmentId: i32,
    pub firstSegmentId: i32,
    pub lastSegmentId: i32,
    pub numberOfSegments: i32,
}

/// Input of `AmDvr_Recorder_create`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct RecorderInitParams {
    /// `android.media.tv.tuner.Tuner`
    pub tuner: jobject,
    pub jdvrfile_handle: FileHandle,
    /// `com.droidlogic.jdvrlib.JDvrRecorderSettings`
    pub settings: jobject,
    pub callback: OnRecorderEventCallback,
}

/// Input of `AmDvr_Player_create`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct PlayerInitParams {
    /// `com.amlogic.asplayer.api.ASPlayer`
    pub asplayer: jobject,
    pub jdvrfile_handle: FileHandle,
    /// `com.droidlogic.jdvrlib.JDvrPlayerSettings`
    pub settings: jobject,
    pub callback: OnPlayerEventCallback,
}

impl Default for RecorderInitParams {
    fn default() -> Self {
        Self {
            tuner: std::ptr::null_mut(),
            jdvrfile_handle: std::ptr::null_mut(),
            settings: std::ptr::null_mut(),
            callback: None,
        }
    }
}

impl Default for PlayerInitParams {
    fn default() -> Self {
        Self {
            asplayer: std::ptr::null_mut(),
            jdvrfile_handle: std::ptr::null_mut(),
            settings: std::ptr::null_mut(),
            callback: None,
        }
    }
}
