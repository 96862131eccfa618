// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Smoke tests pinning the C layouts shared with `include/JDvrLibJNI.h`.

use std::mem::{align_of, offset_of, size_of};

/// Native callers index these structs by the offsets their compiler picks for
/// the header; any drift here breaks them silently.
#[test]
fn recording_progress_matches_c_layout() {
    assert_eq!(offset_of!(jdvrlib_sys::RecordingProgress, duration), 0);
    assert_eq!(offset_of!(jdvrlib_sys::RecordingProgress, startTime), 8);
    assert_eq!(offset_of!(jdvrlib_sys::RecordingProgress, endTime), 16);
    assert_eq!(offset_of!(jdvrlib_sys::RecordingProgress, numberOfSegments), 24);
    assert_eq!(offset_of!(jdvrlib_sys::RecordingProgress, firstSegmentId), 28);
    assert_eq!(offset_of!(jdvrlib_sys::RecordingProgress, lastSegmentId), 32);
    assert_eq!(offset_of!(jdvrlib_sys::RecordingProgress, size), 40);
    assert_eq!(size_of::<jdvrlib_sys::RecordingProgress>(), 48);
    assert_eq!(align_of::<jdvrlib_sys::RecordingProgress>(), 8);
}

#[test]
fn playback_progress_matches_c_layout() {
    assert_eq!(offset_of!(jdvrlib_sys::PlaybackProgress, sessionNumber), 0);
    assert_eq!(offset_of!(jdvrlib_sys::PlaybackProgress, state), 4);
    assert_eq!(offset_of!(jdvrlib_sys::PlaybackProgress, speed), 8);
    assert_eq!(offset_of!(jdvrlib_sys::PlaybackProgress, currTime), 16);
    assert_eq!(offset_of!(jdvrlib_sys::PlaybackProgress, duration), 40);
    assert_eq!(offset_of!(jdvrlib_sys::PlaybackProgress, currSegmentId), 48);
    assert_eq!(offset_of!(jdvrlib_sys::PlaybackProgress, numberOfSegments), 60);
    assert_eq!(size_of::<jdvrlib_sys::PlaybackProgress>(), 64);
}

#[test]
fn init_params_are_four_pointers_wide() {
    let ptr = size_of::<*mut std::ffi::c_void>();
    assert_eq!(size_of::<jdvrlib_sys::RecorderInitParams>(), 4 * ptr);
    assert_eq!(size_of::<jdvrlib_sys::PlayerInitParams>(), 4 * ptr);
    // The nullable callback is pointer sized thanks to the niche in `Option<fn>`.
    assert_eq!(size_of::<jdvrlib_sys::OnRecorderEventCallback>(), ptr);

    let params = jdvrlib_sys::RecorderInitParams::default();
    assert!(params.tuner.is_null());
    assert!(params.callback.is_none());
}

#[test]
fn event_codes_keep_their_wire_values() {
    assert_eq!(jdvrlib_sys::AM_DVR_RECORDER_EVENT_PROGRESS, 2001);
    assert_eq!(jdvrlib_sys::AM_DVR_PLAYER_EVENT_PROGRESS, 2001);
    assert_eq!(jdvrlib_sys::AM_DVR_PLAYER_EVENT_STOPPING_STATE, 3006);
    assert_eq!(jdvrlib_sys::AM_DVR_RECORDER_EVENT_DISK_FULL_ERROR, 4003);
    assert_eq!(jdvrlib_sys::JDVRLIB_JNI_ERR, -1);
}
