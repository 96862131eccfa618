// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Event codes and progress payload ownership.
//!
//! Progress payloads are boxed per event and handed to the native callback
//! as `void*`. From then on the receiver owns them and must give them back
//! through [`free_recording_progress`] / [`free_playback_progress`].

use std::ffi::c_void;

use jdvrlib_sys::{PlaybackProgress, PlayerEvent, RecorderEvent, RecordingProgress};

/// Symbolic name of a recorder event code, for logs.
pub fn recorder_event_name(event: RecorderEvent) -> &'static str {
    match event {
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_PROGRESS => "PROGRESS",
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_INITIAL_STATE => "INITIAL_STATE",
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_STARTING_STATE => "STARTING_STATE",
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_STARTED_STATE => "STARTED_STATE",
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_PAUSED_STATE => "PAUSED_STATE",
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_STOPPING_STATE => "STOPPING_STATE",
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_NO_DATA_ERROR => "NO_DATA_ERROR",
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_IO_ERROR => "IO_ERROR",
        jdvrlib_sys::AM_DVR_RECORDER_EVENT_DISK_FULL_ERROR => "DISK_FULL_ERROR",
        _ => "UNKNOWN",
    }
}

/// Symbolic name of a player event code, for logs.
pub fn player_event_name(event: PlayerEvent) -> &'static str {
    match event {
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_PROGRESS => "PROGRESS",
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_EOS => "EOS",
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_EDGE_LEAVING => "EDGE_LEAVING",
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_INITIAL_STATE => "INITIAL_STATE",
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_STARTING_STATE => "STARTING_STATE",
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_SMOOTH_PLAYING_STATE => "SMOOTH_PLAYING_STATE",
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_SKIPPING_PLAYING_STATE => "SKIPPING_PLAYING_STATE",
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_PAUSED_STATE => "PAUSED_STATE",
        jdvrlib_sys::AM_DVR_PLAYER_EVENT_STOPPING_STATE => "STOPPING_STATE",
        _ => "UNKNOWN",
    }
}

/// Moves a payload to the heap and releases ownership as `void*`.
pub(crate) fn into_event_data<T>(payload: T) -> *mut c_void {
    Box::into_raw(Box::new(payload)).cast()
}

/// Releases a recording progress payload received in a callback.
///
/// # Safety
///
/// `progress` must be null or a pointer delivered with
/// `AM_DVR_RECORDER_EVENT_PROGRESS` that has not been freed yet.
pub unsafe fn free_recording_progress(progress: *mut RecordingProgress) {
    if !progress.is_null() {
        drop(unsafe { Box::from_raw(progress) });
    }
}

/// Releases a playback progress payload received in a callback.
///
/// # Safety
///
/// `progress` must be null or a pointer delivered with
/// `AM_DVR_PLAYER_EVENT_PROGRESS` that has not been freed yet.
pub unsafe fn free_playback_progress(progress: *mut PlaybackProgress) {
    if !progress.is_null() {
        drop(unsafe { Box::from_raw(progress) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_survives_the_handoff() {
        let progress = PlaybackProgress {
            speed: -2.0,
            currTime: 12_000,
            numberOfSegments: 4,
            ..Default::default()
        };
        let data = into_event_data(progress);
        let received = unsafe { *data.cast::<PlaybackProgress>() };
        assert_eq!(received, progress);
        unsafe { free_playback_progress(data.cast()) };
    }

    #[test]
    fn freeing_null_is_a_no_op() {
        unsafe {
            free_recording_progress(std::ptr::null_mut());
            free_playback_progress(std::ptr::null_mut());
        }
    }

    #[test]
    fn unknown_codes_have_a_name() {
        assert_eq!(recorder_event_name(4003), "DISK_FULL_ERROR");
        assert_eq!(player_event_name(2003), "EDGE_LEAVING");
        assert_eq!(player_event_name(9999), "UNKNOWN");
    }
}
